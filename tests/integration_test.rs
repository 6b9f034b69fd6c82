use std::env;
use std::f64::consts::FRAC_PI_2;
use std::fs;

use approx;
use ndarray::Array2;

use mixphase::drivers::phase_extraction::PhaseExtractionResult;
use mixphase::drivers::rephasing::{RephasingResult, RotationSet};
use mixphase::interfaces::input::Input;
use mixphase::interfaces::InputHandle;
use mixphase::io::{read_mixphase_binary, read_mixphase_yaml, MixPhaseFileType};
use mixphase::mixing::standard::{adjoint, max_abs_difference};
use mixphase::mixing::C128;

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

/// Reads an input file from `tests/input`, redirects its results to a temporary binary file and
/// handles it.
fn handle_with_save(file: &str, stem: &str) -> String {
    let mut inp = read_mixphase_yaml::<Input, _>(format!("{ROOT}/tests/input/{file}")).unwrap();
    let save_name = env::temp_dir()
        .join(format!("{stem}_{}", std::process::id()))
        .to_string_lossy()
        .to_string();
    let mut params = inp.parameters.clone().unwrap_or_default();
    params.result_save_name = Some(save_name.clone());
    inp.parameters = Some(params);
    inp.handle().unwrap();
    save_name
}

#[test]
fn test_integration_mixing_matrix() {
    let name = handle_with_save("test_input_mixing_matrix.yml", "mixphase_it_matrix");
    let res: PhaseExtractionResult = read_mixphase_binary(&name, MixPhaseFileType::Phs).unwrap();
    let _ = fs::remove_file(format!("{name}.{}", MixPhaseFileType::Phs.ext()));

    assert!(res.regime.is_generic());
    approx::assert_abs_diff_eq!(res.phases.t12, 0.2270, epsilon = 1e-3);
    approx::assert_abs_diff_eq!(res.phases.t13, 0.0037, epsilon = 1e-4);
    approx::assert_abs_diff_eq!(res.phases.t23, 0.0418, epsilon = 1e-3);
    assert!(res.phases.delta > 1.0 && res.phases.delta < 1.3);
}

#[test]
fn test_integration_quark_rotations() {
    let name = handle_with_save("test_input_quark_rotations.yml", "mixphase_it_quark");
    let res: RephasingResult = read_mixphase_binary(&name, MixPhaseFileType::Rph).unwrap();
    let _ = fs::remove_file(format!("{name}.{}", MixPhaseFileType::Rph.ext()));

    approx::assert_relative_eq!(res.phases.t12, 0.8f64.atan2(0.6), max_relative = 1e-14);
    assert_eq!(res.phases.t13, 0.0);
    approx::assert_relative_eq!(res.phases.t23, FRAC_PI_2, max_relative = 1e-14);
    assert_eq!(res.phases.delta, 0.0);
    approx::assert_abs_diff_eq!(res.standard_form_deviation, 0.0, epsilon = 1e-14);

    if let RotationSet::Quark { uu_l, ud_l, .. } = &res.rotations {
        let ckm = adjoint(uu_l).dot(ud_l);
        approx::assert_abs_diff_eq!(
            max_abs_difference(&ckm, &res.phases.standard_matrix()),
            0.0,
            epsilon = 1e-14
        );
    } else {
        panic!("Quark rotations are expected.");
    }
}

#[test]
fn test_integration_lepton_rotations() {
    let name = handle_with_save("test_input_lepton_rotations.yml", "mixphase_it_lepton");
    let res: RephasingResult = read_mixphase_binary(&name, MixPhaseFileType::Rph).unwrap();
    let _ = fs::remove_file(format!("{name}.{}", MixPhaseFileType::Rph.ext()));

    assert_eq!(res.phases.t12, FRAC_PI_2);
    assert_eq!(res.phases.t13, 0.0);
    assert_eq!(res.phases.t23, 0.0);
    approx::assert_abs_diff_eq!(res.standard_form_deviation, 0.0, epsilon = 1e-15);

    if let RotationSet::Lepton { unu, ue_r, .. } = &res.rotations {
        assert_eq!(unu[(1, 0)], C128::new(1.0, 0.0));
        let id: Array2<C128> = Array2::eye(3);
        approx::assert_abs_diff_eq!(
            max_abs_difference(&adjoint(ue_r).dot(ue_r), &id),
            0.0,
            epsilon = 1e-15
        );
    } else {
        panic!("Lepton rotations are expected.");
    }
}
