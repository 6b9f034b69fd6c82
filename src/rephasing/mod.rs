//! Rephasing of fermion rotation matrices so that the resulting CKM or PMNS matrix is in the
//! standard parametrisation.

use std::fmt;

use itertools::Itertools;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::mixing::phases::{mixing_phases, MixingPhases};
use crate::mixing::standard::adjoint;
use crate::mixing::C128;


// ==================
// Struct definitions
// ==================

/// A structure containing rephased quark rotation matrices.
///
/// The matrices diagonalise the up-type and down-type quark mass matrices via
///
/// ```math
/// \mathbf{U}_{uL}^{\dagger} \mathbf{M}_u \mathbf{U}_{uR} = \mathbf{M}_u^{\mathrm{diag}},
/// \qquad
/// \mathbf{U}_{dL}^{\dagger} \mathbf{M}_d \mathbf{U}_{dR} = \mathbf{M}_d^{\mathrm{diag}}.
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuarkRotations {
    /// The left-handed up-type rotation $`\mathbf{U}_{uL}`$.
    pub uu_l: Array2<C128>,

    /// The left-handed down-type rotation $`\mathbf{U}_{dL}`$.
    pub ud_l: Array2<C128>,

    /// The right-handed up-type rotation $`\mathbf{U}_{uR}`$.
    pub uu_r: Array2<C128>,

    /// The right-handed down-type rotation $`\mathbf{U}_{dR}`$.
    pub ud_r: Array2<C128>,

    /// The angles and phases extracted from the CKM matrix before rephasing.
    pub phases: MixingPhases,
}

impl QuarkRotations {
    /// Returns the CKM matrix $`\mathbf{U}_{uL}^{\dagger} \mathbf{U}_{dL}`$.
    pub fn ckm(&self) -> Array2<C128> {
        adjoint(&self.uu_l).dot(&self.ud_l)
    }
}

/// A structure containing rephased lepton rotation matrices.
///
/// The matrices diagonalise the charged-lepton and neutrino mass matrices via
///
/// ```math
/// \mathbf{U}_{eL}^{\dagger} \mathbf{M}_e \mathbf{U}_{eR} = \mathbf{M}_e^{\mathrm{diag}},
/// \qquad
/// \mathbf{U}_{\nu}^{\mathsf{T}} \mathbf{M}_{\nu} \mathbf{U}_{\nu} = \mathbf{M}_{\nu}^{\mathrm{diag}}.
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeptonRotations {
    /// The neutrino rotation $`\mathbf{U}_{\nu}`$. This is never rephased, so that the Majorana
    /// phases stay with the neutrinos.
    pub unu: Array2<C128>,

    /// The left-handed charged-lepton rotation $`\mathbf{U}_{eL}`$.
    pub ue_l: Array2<C128>,

    /// The right-handed charged-lepton rotation $`\mathbf{U}_{eR}`$.
    pub ue_r: Array2<C128>,

    /// The angles and phases extracted from the PMNS matrix before rephasing.
    pub phases: MixingPhases,
}

impl LeptonRotations {
    /// Returns the PMNS matrix $`\mathbf{U}_{eL}^{\dagger} \mathbf{U}_{\nu}`$.
    pub fn pmns(&self) -> Array2<C128> {
        adjoint(&self.ue_l).dot(&self.unu)
    }
}

impl fmt::Display for QuarkRotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_matrix(f, "Rephased U_uL", &self.uu_l)?;
        write_matrix(f, "Rephased U_dL", &self.ud_l)?;
        write_matrix(f, "Rephased U_uR", &self.uu_r)?;
        write_matrix(f, "Rephased U_dR", &self.ud_r)?;
        write_matrix(f, "CKM matrix", &self.ckm())?;
        Ok(())
    }
}

impl fmt::Display for LeptonRotations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_matrix(f, "U_nu", &self.unu)?;
        write_matrix(f, "Rephased U_eL", &self.ue_l)?;
        write_matrix(f, "Rephased U_eR", &self.ue_r)?;
        write_matrix(f, "PMNS matrix", &self.pmns())?;
        Ok(())
    }
}

// =========
// Functions
// =========

/// Writes a labelled complex matrix, one row per line.
pub(crate) fn write_matrix(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    mat: &Array2<C128>,
) -> fmt::Result {
    writeln!(f, "{label}:")?;
    mat.rows().into_iter().try_for_each(|row| {
        let line = row
            .iter()
            .map(|x| format!("{:+.9} {:+.9}i", x.re, x.im))
            .join("   ");
        writeln!(f, "  [ {line} ]")
    })?;
    writeln!(f)?;
    Ok(())
}

/// Rephases the quark rotation matrices so that the CKM matrix
/// $`\mathbf{U}_{uL}^{\dagger} \mathbf{U}_{dL}`$ is in the standard parametrisation.
///
/// With the phases extracted from the CKM matrix, the left- and right-handed up-type rotations
/// are multiplied on the right by $`\mathbf{F}_{\delta}`$ and the down-type rotations by
/// $`\mathbf{F}_{\phi}^{*}`$. Both diagonalisation relations are preserved.
///
/// # Arguments
///
/// * `uu_l` - The left-handed up-type rotation matrix.
/// * `ud_l` - The left-handed down-type rotation matrix.
/// * `uu_r` - The right-handed up-type rotation matrix.
/// * `ud_r` - The right-handed down-type rotation matrix.
///
/// # Returns
///
/// The rephased rotation matrices together with the extracted phases.
///
/// # Panics
///
/// Panics if any matrix is not $`3 \times 3`$.
pub fn rephase_standard(
    uu_l: &Array2<C128>,
    ud_l: &Array2<C128>,
    uu_r: &Array2<C128>,
    ud_r: &Array2<C128>,
) -> QuarkRotations {
    let ckm = adjoint(uu_l).dot(ud_l);
    let phases = mixing_phases(&ckm);
    let fdelta = phases.delta_matrix();
    let fphi_conj = phases.majorana_matrix().mapv(|x| x.conj());
    QuarkRotations {
        uu_l: uu_l.dot(&fdelta),
        ud_l: ud_l.dot(&fphi_conj),
        uu_r: uu_r.dot(&fdelta),
        ud_r: ud_r.dot(&fphi_conj),
        phases,
    }
}

/// Rephases the lepton rotation matrices so that the PMNS matrix
/// $`\mathbf{U}_{eL}^{\dagger} \mathbf{U}_{\nu}`$ is the standard parametrisation times
/// $`\mathbf{F}_{\phi}`$.
///
/// Only the charged-lepton rotations are rephased, by $`\mathbf{F}_{\delta}`$.
///
/// # Arguments
///
/// * `unu` - The neutrino rotation matrix.
/// * `ue_l` - The left-handed charged-lepton rotation matrix.
/// * `ue_r` - The right-handed charged-lepton rotation matrix.
///
/// # Returns
///
/// The rephased rotation matrices together with the extracted phases.
///
/// # Panics
///
/// Panics if any matrix is not $`3 \times 3`$.
pub fn rephase_pmns_standard(
    unu: &Array2<C128>,
    ue_l: &Array2<C128>,
    ue_r: &Array2<C128>,
) -> LeptonRotations {
    let pmns = adjoint(ue_l).dot(unu);
    let phases = mixing_phases(&pmns);
    let fdelta = phases.delta_matrix();
    LeptonRotations {
        unu: unu.clone(),
        ue_l: ue_l.dot(&fdelta),
        ue_r: ue_r.dot(&fdelta),
        phases,
    }
}
