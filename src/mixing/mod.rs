//! Mixing matrices in the standard parametrisation and extraction of their angles and phases.

use num_complex::Complex;

pub mod phases;
pub mod standard;

/// Complex element type of all mixing and rotation matrices.
pub type C128 = Complex<f64>;
