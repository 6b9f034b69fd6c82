//! The standard (PDG) parametrisation of $`3 \times 3`$ unitary mixing matrices.

use ndarray::{array, Array2};
use num_traits::{One, Zero};

use crate::mixing::C128;

#[cfg(test)]
#[path = "standard_tests.rs"]
mod standard_tests;

/// Returns the mixing matrix in the standard parametrisation,
///
/// ```math
/// \mathbf{V} =
/// \begin{pmatrix}
///     c_{12} c_{13} & s_{12} c_{13} & s_{13} e^{-i\delta} \\
///     -s_{12} c_{23} - c_{12} s_{23} s_{13} e^{i\delta}
///         & c_{12} c_{23} - s_{12} s_{23} s_{13} e^{i\delta} & s_{23} c_{13} \\
///     s_{12} s_{23} - c_{12} c_{23} s_{13} e^{i\delta}
///         & -c_{12} s_{23} - s_{12} c_{23} s_{13} e^{i\delta} & c_{23} c_{13}
/// \end{pmatrix},
/// ```
///
/// where $`s_{ij} = \sin\theta_{ij}`$ and $`c_{ij} = \cos\theta_{ij}`$.
///
/// # Arguments
///
/// * `t12` - The mixing angle $`\theta_{12}`$ in radians.
/// * `t13` - The mixing angle $`\theta_{13}`$ in radians.
/// * `t23` - The mixing angle $`\theta_{23}`$ in radians.
/// * `delta` - The Dirac phase $`\delta`$ in radians.
///
/// # Returns
///
/// The unitary matrix $`\mathbf{V}(\theta_{12}, \theta_{13}, \theta_{23}, \delta)`$.
pub fn standard_mixing_matrix(t12: f64, t13: f64, t23: f64, delta: f64) -> Array2<C128> {
    let (s12, c12) = t12.sin_cos();
    let (s13, c13) = t13.sin_cos();
    let (s23, c23) = t23.sin_cos();
    let e_pd = C128::from_polar(1.0, delta);
    let e_md = e_pd.conj();
    array![
        [
            C128::from(c12 * c13),
            C128::from(s12 * c13),
            s13 * e_md
        ],
        [
            -s12 * c23 - c12 * s23 * s13 * e_pd,
            c12 * c23 - s12 * s23 * s13 * e_pd,
            C128::from(s23 * c13)
        ],
        [
            s12 * s23 - c12 * c23 * s13 * e_pd,
            -c12 * s23 - s12 * c23 * s13 * e_pd,
            C128::from(c23 * c13)
        ]
    ]
}

/// Returns the diagonal unitary matrix $`\mathrm{diag}(e^{i p_0}, e^{i p_1}, e^{i p_2})`$.
pub fn phase_diagonal(phases: [f64; 3]) -> Array2<C128> {
    let mut fmat = Array2::<C128>::zeros((3, 3));
    fmat.diag_mut()
        .iter_mut()
        .zip(phases.iter())
        .for_each(|(f, p)| *f = C128::from_polar(1.0, *p));
    fmat
}

/// Returns the conjugate transpose of a complex matrix.
pub fn adjoint(mat: &Array2<C128>) -> Array2<C128> {
    mat.t().mapv(|x| x.conj())
}

/// Returns the largest absolute deviation of $`\mathbf{U}^{\dagger}\mathbf{U}`$ from the identity.
///
/// This is zero (to floating-point precision) if and only if $`\mathbf{U}`$ is unitary.
pub fn unitarity_deviation(mat: &Array2<C128>) -> f64 {
    let udu = adjoint(mat).dot(mat);
    udu.indexed_iter()
        .map(|((i, j), x)| {
            let target = if i == j { C128::one() } else { C128::zero() };
            (x - target).norm()
        })
        .fold(0.0, f64::max)
}

/// Returns the largest absolute element-wise difference between two complex matrices.
pub fn max_abs_difference(a: &Array2<C128>, b: &Array2<C128>) -> f64 {
    (a - b).iter().map(|x| x.norm()).fold(0.0, f64::max)
}
