//! Extraction of the mixing angles and phases of a $`3 \times 3`$ unitary matrix in an arbitrary
//! phase convention.
//!
//! Any $`3 \times 3`$ unitary matrix $`\mathbf{U}`$ can be written as
//!
//! ```math
//! \mathbf{U} = \mathbf{F}_{\delta} \, \mathbf{V}(\theta_{12}, \theta_{13}, \theta_{23}, \delta)
//!     \, \mathbf{F}_{\phi},
//! ```
//!
//! where $`\mathbf{V}`$ is the standard parametrisation (see
//! [`crate::mixing::standard::standard_mixing_matrix`]),
//! $`\mathbf{F}_{\delta} = \mathrm{diag}(e^{i\delta_1}, e^{i\delta_2}, e^{i\delta_3})`$ and
//! $`\mathbf{F}_{\phi} = \mathrm{diag}(e^{-i\phi_1/2}, e^{-i\phi_2/2}, 1)`$. Which entries of
//! $`\mathbf{U}`$ determine the phases depends on which angles sit at $`0`$ or $`\pi/2`$, where
//! entries of $`\mathbf{V}`$ vanish and some phases become unphysical.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::mixing::standard::{phase_diagonal, standard_mixing_matrix};
use crate::mixing::C128;

#[cfg(test)]
#[path = "phases_tests.rs"]
mod phases_tests;

/// Threshold below which a sine or cosine of a mixing angle is considered to vanish.
///
/// Changing this value changes which branch of the extraction is taken near degenerate
/// configurations.
pub const PHASE_TOLERANCE: f64 = 1e-7;

/// Magnitude of $`U_{13}`$ at or beyond which $`\theta_{13}`$ is set to $`\pi/2`$ without
/// evaluating the arcsine.
pub const SIN_T13_CLAMP: f64 = 1.0;

// ==================
// Struct definitions
// ==================

/// An enumerated type classifying a mixing angle $`\theta \in [0, \pi/2]`$ by whether it sits at
/// one of its boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngleRegime {
    /// $`|\sin\theta| <`$ [`PHASE_TOLERANCE`], *i.e.* $`\theta \approx 0`$.
    Vanishing,

    /// $`|\cos\theta| <`$ [`PHASE_TOLERANCE`], *i.e.* $`\theta \approx \pi/2`$.
    Maximal,

    /// Neither the sine nor the cosine vanishes.
    Generic,
}

impl AngleRegime {
    /// Classifies an angle from its sine and cosine.
    pub fn classify(sin: f64, cos: f64) -> Self {
        if sin.abs() < PHASE_TOLERANCE {
            AngleRegime::Vanishing
        } else if cos.abs() < PHASE_TOLERANCE {
            AngleRegime::Maximal
        } else {
            AngleRegime::Generic
        }
    }

    /// Classifies an angle given in radians.
    pub fn from_angle(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::classify(sin, cos)
    }
}

impl fmt::Display for AngleRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleRegime::Vanishing => write!(f, "0"),
            AngleRegime::Maximal => write!(f, "π/2"),
            AngleRegime::Generic => write!(f, "generic"),
        }
    }
}

/// A structure recording the regimes of the three mixing angles. This fully determines which
/// entries of the mixing matrix are used to extract each phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MixingRegime {
    /// The regime of $`\theta_{12}`$.
    pub t12: AngleRegime,

    /// The regime of $`\theta_{13}`$.
    pub t13: AngleRegime,

    /// The regime of $`\theta_{23}`$.
    pub t23: AngleRegime,
}

impl MixingRegime {
    /// Returns `true` if none of the three angles sits at a boundary, in which case the Dirac
    /// phase is physical.
    pub fn is_generic(&self) -> bool {
        self.t12 == AngleRegime::Generic
            && self.t13 == AngleRegime::Generic
            && self.t23 == AngleRegime::Generic
    }
}

impl fmt::Display for MixingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "θ12: {}, θ13: {}, θ23: {}", self.t12, self.t13, self.t23)
    }
}

/// A structure containing the mixing angles and phases extracted from a unitary matrix.
///
/// All quantities are in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MixingPhases {
    /// The mixing angle $`\theta_{12} \in [0, \pi/2]`$.
    pub t12: f64,

    /// The mixing angle $`\theta_{13} \in [0, \pi/2]`$.
    pub t13: f64,

    /// The mixing angle $`\theta_{23} \in [0, \pi/2]`$.
    pub t23: f64,

    /// The Dirac phase $`\delta \in (-\pi, \pi]`$. This is zero whenever any angle sits at a
    /// boundary.
    pub delta: f64,

    /// The first Majorana-type phase $`\phi_1`$.
    pub phi1: f64,

    /// The second Majorana-type phase $`\phi_2`$.
    pub phi2: f64,

    /// The unphysical rephasing angle of the first row, $`\delta_1`$.
    pub delta1: f64,

    /// The unphysical rephasing angle of the second row, $`\delta_2`$.
    pub delta2: f64,

    /// The unphysical rephasing angle of the third row, $`\delta_3`$.
    pub delta3: f64,
}

impl MixingPhases {
    /// Returns the regimes of the three mixing angles.
    pub fn regime(&self) -> MixingRegime {
        MixingRegime {
            t12: AngleRegime::from_angle(self.t12),
            t13: AngleRegime::from_angle(self.t13),
            t23: AngleRegime::from_angle(self.t23),
        }
    }

    /// Returns the mixing matrix in the standard parametrisation built from the extracted angles
    /// and Dirac phase.
    pub fn standard_matrix(&self) -> Array2<C128> {
        standard_mixing_matrix(self.t12, self.t13, self.t23, self.delta)
    }

    /// Returns $`\mathbf{F}_{\delta} = \mathrm{diag}(e^{i\delta_1}, e^{i\delta_2}, e^{i\delta_3})`$.
    pub fn delta_matrix(&self) -> Array2<C128> {
        phase_diagonal([self.delta1, self.delta2, self.delta3])
    }

    /// Returns $`\mathbf{F}_{\phi} = \mathrm{diag}(e^{-i\phi_1/2}, e^{-i\phi_2/2}, 1)`$.
    pub fn majorana_matrix(&self) -> Array2<C128> {
        phase_diagonal([-self.phi1 / 2.0, -self.phi2 / 2.0, 0.0])
    }
}

impl fmt::Display for MixingPhases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Angle regimes: {}", self.regime())?;
        writeln!(f, "{}", "┈".repeat(40))?;
        writeln!(f, "{:>9} {:>14} {:>14}", "Quantity", "Radians", "Degrees")?;
        writeln!(f, "{}", "┈".repeat(40))?;
        [
            ("θ12", self.t12),
            ("θ13", self.t13),
            ("θ23", self.t23),
            ("δ", self.delta),
            ("φ1", self.phi1),
            ("φ2", self.phi2),
            ("δ1", self.delta1),
            ("δ2", self.delta2),
            ("δ3", self.delta3),
        ]
        .iter()
        .try_for_each(|(name, value)| {
            writeln!(
                f,
                "{:>9} {:>+14.9} {:>+14.7}",
                name,
                value,
                value.to_degrees()
            )
        })?;
        writeln!(f, "{}", "┈".repeat(40))?;
        Ok(())
    }
}

// =========
// Functions
// =========

/// Principal argument of a complex number in $`(-\pi, \pi]`$, with zero mapped to zero.
fn phase(z: C128) -> f64 {
    z.arg()
}

/// Returns $`\arctan(\textit{opposite}/\textit{adjacent})`$, or $`\pi/2`$ if `adjacent` is exactly
/// zero.
fn ratio_angle(adjacent: f64, opposite: f64) -> f64 {
    if adjacent == 0.0 {
        FRAC_PI_2
    } else {
        (opposite / adjacent).atan()
    }
}

/// Extracts the mixing angles, the Dirac and Majorana-type phases, and the unphysical rephasing
/// angles of a unitary matrix in an arbitrary phase convention.
///
/// The returned phases satisfy
///
/// ```math
/// \mathbf{F}_{\delta}^{\dagger} \, \mathbf{U} \, \mathbf{F}_{\phi}^{*}
///     = \mathbf{V}(\theta_{12}, \theta_{13}, \theta_{23}, \delta).
/// ```
///
/// # Arguments
///
/// * `u` - A $`3 \times 3`$ unitary matrix. Unitarity is assumed and not checked: a non-unitary
/// matrix yields numbers without physical meaning.
///
/// # Returns
///
/// The extracted angles and phases.
///
/// # Panics
///
/// Panics if `u` is not a $`3 \times 3`$ matrix.
pub fn mixing_phases(u: &Array2<C128>) -> MixingPhases {
    assert_eq!(u.dim(), (3, 3), "A 3 × 3 mixing matrix is required.");
    let p = |i: usize, j: usize| phase(u[(i, j)]);
    let pm = |i: usize, j: usize| phase(-u[(i, j)]);
    // phase(conj(U[i, j]) U[k, l])
    let pr = |i: usize, j: usize, k: usize, l: usize| phase(u[(i, j)].conj() * u[(k, l)]);

    // Angles
    let abs13 = u[(0, 2)].norm();
    let t13 = if abs13 >= SIN_T13_CLAMP {
        FRAC_PI_2
    } else {
        abs13.asin()
    };
    let t13_regime = AngleRegime::from_angle(t13);
    let (t12, t23) = if t13_regime == AngleRegime::Maximal {
        // U[0, 0], U[0, 1], U[1, 2] and U[2, 2] all vanish here.
        (ratio_angle(u[(1, 1)].norm(), u[(2, 1)].norm()), 0.0)
    } else {
        (
            ratio_angle(u[(0, 0)].norm(), u[(0, 1)].norm()),
            ratio_angle(u[(2, 2)].norm(), u[(1, 2)].norm()),
        )
    };
    let regime = MixingRegime {
        t12: AngleRegime::from_angle(t12),
        t13: t13_regime,
        t23: AngleRegime::from_angle(t23),
    };
    log::debug!("Mixing-phase extraction in regime {regime}.");

    // Dirac phase
    let delta = if regime.is_generic() {
        let (s12, c12) = t12.sin_cos();
        let (s13, c13) = t13.sin_cos();
        let (s23, c23) = t23.sin_cos();
        let j = u[(0, 0)].conj() * u[(0, 2)] * u[(2, 0)] * u[(2, 2)].conj();
        -phase((j / (c12 * c13 * c13 * c23 * s13) + c12 * c23 * s13) / (s12 * s23))
    } else {
        0.0
    };

    // Majorana-type phases and unphysical rephasing angles
    use AngleRegime::{Generic, Maximal, Vanishing};
    let (phi1, phi2, delta1, delta2, delta3) = match (regime.t12, regime.t13, regime.t23) {
        // θ13 = π/2, with θ23 fixed to zero
        (Vanishing, Maximal, _) => (0.0, 0.0, p(0, 2), p(1, 1), pm(2, 0)),
        (Maximal, Maximal, _) => (0.0, 0.0, p(0, 2), pm(1, 0), pm(2, 1)),
        (Generic, Maximal, _) => {
            let delta2 = p(1, 1);
            let phi1 = 2.0 * phase(-C128::from_polar(1.0, delta2) * u[(1, 0)].conj());
            (phi1, 0.0, p(0, 2), delta2, pm(2, 1))
        }

        // θ12 = 0
        (Vanishing, r13, r23) => {
            let (phi1, delta1) = if r13 == Vanishing {
                (0.0, p(0, 0))
            } else {
                (2.0 * pr(0, 0, 0, 2), p(0, 2))
            };
            let (phi2, delta2, delta3) = match r23 {
                Vanishing => (0.0, p(1, 1), p(2, 2)),
                Maximal => (0.0, p(1, 2), pm(2, 1)),
                Generic => (2.0 * pr(1, 1, 1, 2), p(1, 2), p(2, 2)),
            };
            (phi1, phi2, delta1, delta2, delta3)
        }

        // θ12 = π/2
        (Maximal, r13, r23) => {
            let (phi2, delta1) = if r13 == Vanishing {
                (0.0, p(0, 1))
            } else {
                (2.0 * pr(0, 1, 0, 2), p(0, 2))
            };
            let (phi1, delta2, delta3) = match r23 {
                Vanishing => (0.0, pm(1, 0), p(2, 2)),
                Maximal => (0.0, p(1, 2), p(2, 0)),
                Generic => (2.0 * pr(2, 0, 2, 2), p(1, 2), p(2, 2)),
            };
            (phi1, phi2, delta1, delta2, delta3)
        }

        // θ13 = 0
        (Generic, Vanishing, Vanishing) => {
            (2.0 * pr(0, 0, 0, 1), 0.0, p(0, 1), p(1, 1), p(2, 2))
        }
        (Generic, Vanishing, Maximal) => {
            (2.0 * pr(0, 0, 0, 1), 0.0, p(0, 1), p(1, 2), pm(2, 1))
        }
        (Generic, Vanishing, Generic) => {
            let phi1 = 2.0 * pr(2, 0, 2, 2);
            let phi2 = 2.0 * pr(1, 1, 1, 2);
            let delta1 = phase(C128::from_polar(1.0, phi1 / 2.0) * u[(0, 0)]);
            (phi1, phi2, delta1, p(1, 2), p(2, 2))
        }

        // θ23 at a boundary
        (Generic, Generic, Vanishing) => {
            let phi1 = 2.0 * pr(0, 0, 0, 2);
            let phi2 = 2.0 * pr(0, 1, 0, 2);
            let delta2 = phase(C128::from_polar(1.0, phi2 / 2.0) * u[(1, 1)]);
            (phi1, phi2, p(0, 2), delta2, p(2, 2))
        }
        (Generic, Generic, Maximal) => {
            let phi1 = 2.0 * pr(0, 0, 0, 2);
            let phi2 = 2.0 * pr(0, 1, 0, 2);
            let delta3 = phase(C128::from_polar(1.0, phi1 / 2.0) * u[(2, 0)]);
            (phi1, phi2, p(0, 2), p(1, 2), delta3)
        }

        // No degeneracy
        (Generic, Generic, Generic) => {
            let delta1 = phase(C128::from_polar(1.0, delta) * u[(0, 2)]);
            let e_d1 = C128::from_polar(1.0, delta1);
            let phi1 = 2.0 * phase(e_d1 * u[(0, 0)].conj());
            let phi2 = 2.0 * phase(e_d1 * u[(0, 1)].conj());
            (phi1, phi2, delta1, p(1, 2), p(2, 2))
        }
    };

    MixingPhases {
        t12,
        t13,
        t23,
        delta,
        phi1,
        phi2,
        delta1,
        delta2,
        delta3,
    }
}
