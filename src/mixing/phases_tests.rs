use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI};

use approx;
use ndarray::{array, Array2};
use num_traits::Zero;
use proptest::prelude::*;

use crate::mixing::phases::{
    mixing_phases, AngleRegime, MixingPhases, MixingRegime, PHASE_TOLERANCE, SIN_T13_CLAMP,
};
use crate::mixing::standard::{
    adjoint, max_abs_difference, phase_diagonal, standard_mixing_matrix,
};
use crate::mixing::C128;

/// Builds $`\mathrm{diag}(e^{ia}) \mathbf{V} \mathrm{diag}(e^{ib})`$.
fn rephased_standard(
    angles: (f64, f64, f64, f64),
    left: [f64; 3],
    right: [f64; 3],
) -> Array2<C128> {
    let (t12, t13, t23, delta) = angles;
    phase_diagonal(left)
        .dot(&standard_mixing_matrix(t12, t13, t23, delta))
        .dot(&phase_diagonal(right))
}

/// Returns the largest deviation of $`\mathbf{F}_\delta^\dagger \mathbf{U} \mathbf{F}_\phi^*`$
/// from the standard-parametrisation matrix built from the extracted quantities.
fn standard_form_deviation(u: &Array2<C128>, phases: &MixingPhases) -> f64 {
    let k = adjoint(&phases.delta_matrix())
        .dot(u)
        .dot(&phases.majorana_matrix().mapv(|x| x.conj()));
    max_abs_difference(&k, &phases.standard_matrix())
}

#[test]
fn test_phases_identity() {
    let u = Array2::<C128>::eye(3);
    let phases = mixing_phases(&u);
    assert_eq!(
        phases,
        MixingPhases {
            t12: 0.0,
            t13: 0.0,
            t23: 0.0,
            delta: 0.0,
            phi1: 0.0,
            phi2: 0.0,
            delta1: 0.0,
            delta2: 0.0,
            delta3: 0.0,
        }
    );
    assert_eq!(
        phases.regime(),
        MixingRegime {
            t12: AngleRegime::Vanishing,
            t13: AngleRegime::Vanishing,
            t23: AngleRegime::Vanishing,
        }
    );
}

#[test]
fn test_phases_real_rotation_12() {
    let c = C128::from(FRAC_1_SQRT_2);
    let z = C128::zero();
    let one = C128::from(1.0);
    let u = array![[c, c, z], [-c, c, z], [z, z, one]];
    let phases = mixing_phases(&u);
    approx::assert_relative_eq!(phases.t12, FRAC_PI_4, epsilon = 1e-15);
    assert_eq!(phases.t13, 0.0);
    assert_eq!(phases.t23, 0.0);
    assert_eq!(phases.delta, 0.0);
    assert_eq!(phases.phi1, 0.0);
    assert_eq!(phases.phi2, 0.0);
    assert_eq!(phases.delta1, 0.0);
    assert_eq!(phases.delta2, 0.0);
    assert_eq!(phases.delta3, 0.0);
    assert_eq!(phases.regime().t12, AngleRegime::Generic);
}

#[test]
fn test_phases_maximal_t13_exact() {
    let (s, c) = 0.6_f64.sin_cos();
    let z = C128::zero();
    // |U[0, 2]| is exactly one.
    let u = array![
        [z, z, C128::i()],
        [C128::new(0.0, -s), C128::new(0.0, c), z],
        [C128::from(-c), C128::new(-s, 0.0), z],
    ];
    let phases = mixing_phases(&u);
    assert_eq!(phases.t13, FRAC_PI_2);
    assert_eq!(phases.t23, 0.0);
    assert_eq!(phases.delta, 0.0);
    assert_eq!(phases.phi2, 0.0);
    approx::assert_relative_eq!(phases.t12, 0.6, epsilon = 1e-14);
    approx::assert_relative_eq!(phases.delta2, FRAC_PI_2, epsilon = 1e-15);
    approx::assert_relative_eq!(phases.delta1, FRAC_PI_2, epsilon = 1e-15);
    assert_eq!(phases.regime().t13, AngleRegime::Maximal);
    approx::assert_abs_diff_eq!(standard_form_deviation(&u, &phases), 0.0, epsilon = 1e-14);
}

#[test]
fn test_phases_t13_clamp() {
    // Rounding can push |U[0, 2]| slightly past one.
    let z = C128::zero();
    let one = C128::from(1.0);
    let u = array![
        [z, z, C128::from(SIN_T13_CLAMP + 4.0 * f64::EPSILON)],
        [-one, z, z],
        [z, -one, z],
    ];
    let phases = mixing_phases(&u);
    assert_eq!(phases.t13, FRAC_PI_2);
    assert!(phases.t12.is_finite());
    assert_eq!(phases.t12, FRAC_PI_2);
    assert_eq!(phases.phi1, 0.0);
    assert_eq!(phases.delta2, 0.0);
    assert_eq!(phases.delta3, 0.0);
}

#[test]
fn test_phases_regime_classification() {
    assert_eq!(AngleRegime::from_angle(0.0), AngleRegime::Vanishing);
    assert_eq!(AngleRegime::from_angle(FRAC_PI_2), AngleRegime::Maximal);
    assert_eq!(AngleRegime::from_angle(0.3), AngleRegime::Generic);
    assert_eq!(
        AngleRegime::classify(0.5 * PHASE_TOLERANCE, 1.0),
        AngleRegime::Vanishing
    );
    assert_eq!(
        AngleRegime::classify(PHASE_TOLERANCE, 1.0),
        AngleRegime::Generic
    );
    assert_eq!(
        AngleRegime::classify(1.0, 0.5 * PHASE_TOLERANCE),
        AngleRegime::Maximal
    );
    assert_eq!(
        AngleRegime::classify(1.0, PHASE_TOLERANCE),
        AngleRegime::Generic
    );
}

#[test]
fn test_phases_tolerance_boundary_t12() {
    // Just below the tolerance, θ12 counts as zero and the Dirac phase is dropped.
    let below = 0.5 * PHASE_TOLERANCE;
    let u = standard_mixing_matrix(below, 0.2, 0.7, 1.1);
    let phases = mixing_phases(&u);
    assert_eq!(phases.regime().t12, AngleRegime::Vanishing);
    assert_eq!(phases.delta, 0.0);

    // Well above the tolerance, the Dirac phase is recovered.
    let above = 1.0e-3;
    let u = standard_mixing_matrix(above, 0.2, 0.7, 1.1);
    let phases = mixing_phases(&u);
    assert_eq!(phases.regime().t12, AngleRegime::Generic);
    approx::assert_relative_eq!(phases.delta, 1.1, epsilon = 1e-8);
}

#[test]
fn test_phases_ckm_like() {
    let angles = (0.22735, 0.003683, 0.04175, 1.196);
    let u = rephased_standard(angles, [0.3, -1.2, 2.9], [-0.4, 1.7, 0.25]);
    let phases = mixing_phases(&u);
    approx::assert_relative_eq!(phases.t12, angles.0, max_relative = 1e-12);
    approx::assert_relative_eq!(phases.t13, angles.1, max_relative = 1e-12);
    approx::assert_relative_eq!(phases.t23, angles.2, max_relative = 1e-12);
    approx::assert_relative_eq!(phases.delta, angles.3, max_relative = 1e-9);
    assert!(phases.regime().is_generic());
    approx::assert_abs_diff_eq!(standard_form_deviation(&u, &phases), 0.0, epsilon = 1e-12);
}

#[test]
fn test_phases_all_regimes_standard_form() {
    let left = [1.1, -0.6, 2.3];
    let right = [-2.7, 0.45, 0.9];
    use AngleRegime::{Generic as G, Maximal as M, Vanishing as Z};

    // (angles, expected regime, tolerance)
    let cases = [
        ((0.4, 0.3, 0.5, -2.1), (G, G, G), 1e-12),
        ((0.0, 0.0, 0.0, 0.8), (Z, Z, Z), 1e-12),
        ((0.0, 0.0, FRAC_PI_2, 0.8), (Z, Z, M), 1e-12),
        ((0.0, 0.0, 0.5, 0.8), (Z, Z, G), 1e-12),
        ((0.0, 0.3, 0.0, 0.8), (Z, G, Z), 1e-12),
        ((0.0, 0.3, FRAC_PI_2, 0.8), (Z, G, M), 1e-12),
        ((0.0, 0.3, 0.5, 0.8), (Z, G, G), 1e-12),
        ((FRAC_PI_2, 0.0, 0.0, 0.8), (M, Z, Z), 1e-12),
        ((FRAC_PI_2, 0.0, FRAC_PI_2, 0.8), (M, Z, M), 1e-12),
        ((FRAC_PI_2, 0.0, 0.5, 0.8), (M, Z, G), 1e-12),
        ((FRAC_PI_2, 0.3, 0.0, 0.8), (M, G, Z), 1e-12),
        ((FRAC_PI_2, 0.3, FRAC_PI_2, 0.8), (M, G, M), 1e-12),
        ((FRAC_PI_2, 0.3, 0.5, 0.8), (M, G, G), 1e-12),
        ((0.4, 0.0, 0.0, 0.8), (G, Z, Z), 1e-12),
        ((0.4, 0.0, FRAC_PI_2, 0.8), (G, Z, M), 1e-12),
        ((0.4, 0.0, 0.5, 0.8), (G, Z, G), 1e-12),
        ((0.4, 0.3, 0.0, 0.8), (G, G, Z), 1e-12),
        ((0.4, 0.3, FRAC_PI_2, 0.8), (G, G, M), 1e-12),
        // θ13 = π/2: the arcsine may land up to ~1.5e-8 below π/2.
        ((0.0, FRAC_PI_2, 0.0, 0.0), (Z, M, Z), 1e-7),
        ((FRAC_PI_2, FRAC_PI_2, 0.0, 0.0), (M, M, Z), 1e-7),
        ((0.4, FRAC_PI_2, 0.0, 0.0), (G, M, Z), 1e-7),
        ((0.4, FRAC_PI_2, 0.5, 1.3), (G, M, Z), 1e-7),
    ];
    for (angles, (r12, r13, r23), tol) in cases {
        let u = rephased_standard(angles, left, right);
        let phases = mixing_phases(&u);
        assert_eq!(
            phases.regime(),
            MixingRegime {
                t12: r12,
                t13: r13,
                t23: r23
            },
            "Unexpected regime for angles {angles:?}."
        );
        if !phases.regime().is_generic() {
            assert_eq!(phases.delta, 0.0);
        }
        if r13 == AngleRegime::Maximal {
            assert_eq!(phases.t23, 0.0);
            assert_eq!(phases.phi2, 0.0);
        } else {
            approx::assert_abs_diff_eq!(phases.t12, angles.0, epsilon = 1e-12);
            approx::assert_abs_diff_eq!(phases.t13, angles.1, epsilon = 1e-12);
            approx::assert_abs_diff_eq!(phases.t23, angles.2, epsilon = 1e-12);
        }
        let dev = standard_form_deviation(&u, &phases);
        assert!(
            dev < tol,
            "Standard form not reached for angles {angles:?}: deviation {dev:.3e}."
        );
    }
}

#[test]
fn test_phases_display() {
    let phases = mixing_phases(&standard_mixing_matrix(0.4, 0.3, 0.5, -2.1));
    let out = phases.to_string();
    assert!(out.contains("θ12: generic, θ13: generic, θ23: generic"));
    assert!(out.contains("δ3"));
    assert_eq!(out.lines().count(), 14);
}

proptest! {
    #[test]
    fn test_phases_round_trip(
        t12 in 0.05f64..1.52,
        t13 in 0.05f64..1.52,
        t23 in 0.05f64..1.52,
        delta in -3.1f64..3.1,
    ) {
        let phases = mixing_phases(&standard_mixing_matrix(t12, t13, t23, delta));
        prop_assert!((phases.t12 - t12).abs() < 1e-12);
        prop_assert!((phases.t13 - t13).abs() < 1e-12);
        prop_assert!((phases.t23 - t23).abs() < 1e-12);
        prop_assert!((phases.delta - delta).abs() < 1e-8);
    }

    #[test]
    fn test_phases_rephasing_invariance(
        t12 in 0.05f64..1.52,
        t13 in 0.05f64..1.52,
        t23 in 0.05f64..1.52,
        delta in -3.1f64..3.1,
        left in prop::array::uniform3(-PI..PI),
        right in prop::array::uniform3(-PI..PI),
    ) {
        let v = standard_mixing_matrix(t12, t13, t23, delta);
        let u = phase_diagonal(left).dot(&v).dot(&phase_diagonal(right));
        let phases_v = mixing_phases(&v);
        let phases_u = mixing_phases(&u);
        prop_assert!((phases_u.t12 - phases_v.t12).abs() < 1e-12);
        prop_assert!((phases_u.t13 - phases_v.t13).abs() < 1e-12);
        prop_assert!((phases_u.t23 - phases_v.t23).abs() < 1e-12);
        prop_assert!((phases_u.delta - phases_v.delta).abs() < 1e-8);
        prop_assert!(standard_form_deviation(&u, &phases_u) < 1e-10);
    }
}
