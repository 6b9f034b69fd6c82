//! Driver for the rephasing of quark or lepton rotation matrices to the standard
//! parametrisation.

use std::fmt;

use anyhow::{self, format_err};
use derive_builder::Builder;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::drivers::phase_extraction::PhaseExtractionParams;
use crate::drivers::{check_unitarity, MixPhaseDriver};
use crate::io::format::{
    log_macsec_begin, log_macsec_end, log_subtitle, log_title, mixphase_output, write_subtitle,
    MixPhaseOutput,
};
use crate::io::{write_mixphase_binary, MixPhaseFileType};
use crate::mixing::phases::MixingPhases;
use crate::mixing::standard::max_abs_difference;
use crate::mixing::C128;
use crate::rephasing::{
    rephase_pmns_standard, rephase_standard, write_matrix, LeptonRotations, QuarkRotations,
};


// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

/// A structure containing control parameters for rephasing. These are the same as those for
/// phase extraction.
pub type RephasingParams = PhaseExtractionParams;

// -------------
// Rotation sets
// -------------

/// An enumerated type for the sets of rotation matrices that can be rephased.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RotationSet {
    /// Quark rotation matrices, $`\mathbf{U}_{uL}`$, $`\mathbf{U}_{dL}`$, $`\mathbf{U}_{uR}`$ and
    /// $`\mathbf{U}_{dR}`$. The mixing matrix is the CKM matrix.
    Quark {
        uu_l: Array2<C128>,
        ud_l: Array2<C128>,
        uu_r: Array2<C128>,
        ud_r: Array2<C128>,
    },

    /// Lepton rotation matrices, $`\mathbf{U}_{\nu}`$, $`\mathbf{U}_{eL}`$ and $`\mathbf{U}_{eR}`$.
    /// The mixing matrix is the PMNS matrix.
    Lepton {
        unu: Array2<C128>,
        ue_l: Array2<C128>,
        ue_r: Array2<C128>,
    },
}

impl RotationSet {
    /// Returns the labelled matrices in this set.
    pub fn matrices(&self) -> Vec<(&'static str, &Array2<C128>)> {
        match self {
            RotationSet::Quark {
                uu_l,
                ud_l,
                uu_r,
                ud_r,
            } => vec![("U_uL", uu_l), ("U_dL", ud_l), ("U_uR", uu_r), ("U_dR", ud_r)],
            RotationSet::Lepton { unu, ue_l, ue_r } => {
                vec![("U_nu", unu), ("U_eL", ue_l), ("U_eR", ue_r)]
            }
        }
    }

    /// Returns the name of the mixing matrix formed by this set.
    pub fn mixing_name(&self) -> &'static str {
        match self {
            RotationSet::Quark { .. } => "CKM",
            RotationSet::Lepton { .. } => "PMNS",
        }
    }
}

impl From<QuarkRotations> for RotationSet {
    fn from(rotations: QuarkRotations) -> Self {
        RotationSet::Quark {
            uu_l: rotations.uu_l,
            ud_l: rotations.ud_l,
            uu_r: rotations.uu_r,
            ud_r: rotations.ud_r,
        }
    }
}

impl From<LeptonRotations> for RotationSet {
    fn from(rotations: LeptonRotations) -> Self {
        RotationSet::Lepton {
            unu: rotations.unu,
            ue_l: rotations.ue_l,
            ue_r: rotations.ue_r,
        }
    }
}

impl fmt::Display for RotationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.matrices()
            .into_iter()
            .try_for_each(|(label, mat)| write_matrix(f, label, mat))
    }
}

// ------
// Result
// ------

/// A structure to contain rephasing results.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct RephasingResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: RephasingParams,

    /// The angles and phases extracted from the mixing matrix before rephasing.
    pub phases: MixingPhases,

    /// The rephased rotation matrices.
    pub rotations: RotationSet,

    /// The mixing matrix formed by the rephased rotation matrices.
    pub mixing_matrix: Array2<C128>,

    /// The largest element-wise deviation of [`Self::mixing_matrix`] from its standard form. For
    /// leptons, the standard form includes the Majorana-type phases on the right.
    pub standard_form_deviation: f64,
}

impl RephasingResult {
    /// Returns a builder to construct a [`RephasingResult`] structure.
    fn builder() -> RephasingResultBuilder {
        RephasingResultBuilder::default()
    }
}

impl fmt::Display for RephasingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.phases)?;
        writeln!(f)?;
        if self.parameters.write_matrices {
            write_subtitle(f, "Rephased rotation matrices")?;
            writeln!(f)?;
            write!(f, "{}", self.rotations)?;
            write_matrix(
                f,
                &format!("{} matrix", self.rotations.mixing_name()),
                &self.mixing_matrix,
            )?;
        }
        writeln!(
            f,
            "Deviation of the rephased {} matrix from standard form: {:.3e}",
            self.rotations.mixing_name(),
            self.standard_form_deviation
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for rephasing rotation matrices to the standard parametrisation.
#[derive(Clone, Builder)]
pub struct RephasingDriver<'a> {
    /// The control parameters for rephasing.
    parameters: &'a RephasingParams,

    /// The rotation matrices to be rephased.
    rotations: &'a RotationSet,

    /// The result of the rephasing.
    #[builder(setter(skip), default = "None")]
    result: Option<RephasingResult>,
}

impl<'a> RephasingDriver<'a> {
    /// Returns a builder to construct a [`RephasingDriver`] structure.
    pub fn builder() -> RephasingDriverBuilder<'a> {
        RephasingDriverBuilder::default()
    }

    /// Executes the rephasing.
    fn rephase(&mut self) -> Result<(), anyhow::Error> {
        let name = self.rotations.mixing_name();
        log_title(&format!("{name} Rephasing"));
        mixphase_output!("");
        let params = self.parameters;
        params.log_output_display();

        log_macsec_begin("Unitarity checks");
        mixphase_output!("");
        mixphase_output!("{}", "┈".repeat(28));
        mixphase_output!("{:>8} {:>19}", "Matrix", "Deviation");
        mixphase_output!("{}", "┈".repeat(28));
        for (label, mat) in self.rotations.matrices() {
            let deviation = check_unitarity(
                label,
                mat,
                params.unitarity_threshold,
                params.strict_unitarity,
            )?;
            mixphase_output!("{:>8} {:>19.3e}", label, deviation);
        }
        mixphase_output!("{}", "┈".repeat(28));
        mixphase_output!("");
        log_macsec_end("Unitarity checks");
        mixphase_output!("");

        let (phases, rotations, mixing_matrix, standard_form) = match self.rotations {
            RotationSet::Quark {
                uu_l,
                ud_l,
                uu_r,
                ud_r,
            } => {
                let rephased = rephase_standard(uu_l, ud_l, uu_r, ud_r);
                let phases = rephased.phases;
                let ckm = rephased.ckm();
                (
                    phases,
                    RotationSet::from(rephased),
                    ckm,
                    phases.standard_matrix(),
                )
            }
            RotationSet::Lepton { unu, ue_l, ue_r } => {
                let rephased = rephase_pmns_standard(unu, ue_l, ue_r);
                let phases = rephased.phases;
                let pmns = rephased.pmns();
                (
                    phases,
                    RotationSet::from(rephased),
                    pmns,
                    phases.standard_matrix().dot(&phases.majorana_matrix()),
                )
            }
        };
        let standard_form_deviation = max_abs_difference(&mixing_matrix, &standard_form);
        log::debug!("{name} standard-form deviation after rephasing: {standard_form_deviation:.3e}");

        self.result = Some(
            RephasingResult::builder()
                .parameters(params.clone())
                .phases(phases)
                .rotations(rotations)
                .mixing_matrix(mixing_matrix)
                .standard_form_deviation(standard_form_deviation)
                .build()
                .map_err(|err| format_err!(err))?,
        );

        if let Some(res) = self.result.as_ref() {
            log_subtitle(&format!("{name} angles and phases"));
            mixphase_output!("");
            res.log_output_display();
            if let Some(save_name) = params.result_save_name.as_ref() {
                let path = write_mixphase_binary(save_name, MixPhaseFileType::Rph, res)?;
                mixphase_output!("Rephasing results saved as {}.", path.display());
                mixphase_output!("");
            }
        }

        Ok(())
    }
}

impl MixPhaseDriver for RephasingDriver<'_> {
    type Params = RephasingParams;

    type Outcome = RephasingResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No rephasing results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.rephase()
    }
}
