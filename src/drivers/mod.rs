//! Drivers to carry out mixphase functionalities.

use anyhow::{self, ensure};
use ndarray::Array2;

use crate::io::format::{mixphase_warn, nice_bool};
use crate::mixing::standard::unitarity_deviation;
use crate::mixing::C128;

pub mod phase_extraction;
pub mod rephasing;

// =================
// Trait definitions
// =================

/// Trait defining behaviours of mixphase drivers.
pub trait MixPhaseDriver {
    /// The type of the parameter structure controlling the driver.
    type Params;

    /// The type of the successful outcome when executing the driver.
    type Outcome;

    /// Executes the driver and stores the result internally.
    fn run(&mut self) -> Result<(), anyhow::Error>;

    /// Returns the result of the driver execution.
    fn result(&self) -> Result<&Self::Outcome, anyhow::Error>;
}

// =========
// Functions
// =========

/// Checks that a matrix is $`3 \times 3`$ and measures how far it is from being unitary.
///
/// # Arguments
///
/// * `label` - A label for the matrix used in messages.
/// * `mat` - The matrix to be checked.
/// * `threshold` - The largest acceptable deviation of $`\mathbf{U}^{\dagger}\mathbf{U}`$ from the
/// identity.
/// * `strict` - If `true`, a deviation above `threshold` is an error. Otherwise, it is only
/// reported as a warning.
///
/// # Returns
///
/// The unitarity deviation of the matrix.
///
/// # Errors
///
/// Errors if the matrix is not $`3 \times 3`$, or if `strict` is set and the matrix is not
/// unitary within `threshold`.
pub(crate) fn check_unitarity(
    label: &str,
    mat: &Array2<C128>,
    threshold: f64,
    strict: bool,
) -> Result<f64, anyhow::Error> {
    ensure!(
        mat.dim() == (3, 3),
        "Matrix `{label}` has shape {:?}, but a 3 × 3 matrix is required.",
        mat.dim()
    );
    let deviation = unitarity_deviation(mat);
    log::debug!("Unitarity deviation of `{label}`: {deviation:.3e}");
    if deviation > threshold {
        ensure!(
            !strict,
            "Matrix `{label}` deviates from unitarity by {deviation:.3e}, which exceeds the threshold of {threshold:.3e}."
        );
        mixphase_warn!(
            "Matrix `{}` deviates from unitarity by {:.3e} (threshold {:.3e}). Extracted phases may not be meaningful.",
            label,
            deviation,
            threshold
        );
    }
    Ok(deviation)
}

/// Writes the control parameters shared by all drivers.
pub(crate) fn write_common_params(
    f: &mut std::fmt::Formatter<'_>,
    unitarity_threshold: f64,
    strict_unitarity: bool,
    write_matrices: bool,
) -> std::fmt::Result {
    writeln!(f, "Unitarity threshold: {unitarity_threshold:.3e}")?;
    writeln!(
        f,
        "Fail on unitarity violation: {}",
        nice_bool(strict_unitarity)
    )?;
    writeln!(f, "Write matrices: {}", nice_bool(write_matrices))?;
    Ok(())
}
