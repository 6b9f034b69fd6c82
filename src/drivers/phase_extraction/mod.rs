//! Driver for the extraction of mixing angles and phases from a single mixing matrix.

use std::fmt;

use anyhow::{self, format_err};
use derive_builder::Builder;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::drivers::{check_unitarity, write_common_params, MixPhaseDriver};
use crate::io::format::{log_subtitle, log_title, mixphase_output, nice_bool, MixPhaseOutput};
use crate::io::{write_mixphase_binary, MixPhaseFileType};
use crate::mixing::phases::{mixing_phases, MixingPhases, MixingRegime};
use crate::mixing::C128;
use crate::rephasing::write_matrix;


// ==================
// Struct definitions
// ==================

// ----------
// Parameters
// ----------

fn default_unitarity_threshold() -> f64 {
    1.0e-10
}

/// A structure containing control parameters for mixing-phase extraction.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct PhaseExtractionParams {
    /// The largest acceptable deviation of $`\mathbf{U}^{\dagger}\mathbf{U}`$ from the identity.
    #[builder(default = "default_unitarity_threshold()")]
    #[serde(default = "default_unitarity_threshold")]
    pub unitarity_threshold: f64,

    /// Boolean indicating if a unitarity violation beyond [`Self::unitarity_threshold`] is an
    /// error. If `false`, only a warning is logged and the extraction proceeds.
    #[builder(default = "false")]
    #[serde(default)]
    pub strict_unitarity: bool,

    /// Boolean indicating if the input matrix is to be written to the output.
    #[builder(default = "false")]
    #[serde(default)]
    pub write_matrices: bool,

    /// Optional name for saving the result as a binary file, without extensions. Phase-extraction
    /// results are saved as [`MixPhaseFileType::Phs`] files and rephasing results as
    /// [`MixPhaseFileType::Rph`] files. If `None`, the result will not be saved.
    #[builder(default = "None")]
    #[serde(default)]
    pub result_save_name: Option<String>,
}

impl PhaseExtractionParams {
    /// Returns a builder to construct a [`PhaseExtractionParams`] structure.
    pub fn builder() -> PhaseExtractionParamsBuilder {
        PhaseExtractionParamsBuilder::default()
    }
}

impl Default for PhaseExtractionParams {
    fn default() -> Self {
        Self::builder()
            .build()
            .expect("Unable to construct a default `PhaseExtractionParams`.")
    }
}

impl fmt::Display for PhaseExtractionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_common_params(
            f,
            self.unitarity_threshold,
            self.strict_unitarity,
            self.write_matrices,
        )?;
        writeln!(
            f,
            "Save results to binary file: {}",
            if let Some(name) = self.result_save_name.as_ref() {
                name.clone()
            } else {
                nice_bool(false)
            }
        )?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Result
// ------

/// A structure to contain mixing-phase extraction results.
#[derive(Clone, Builder, Debug, Serialize, Deserialize)]
pub struct PhaseExtractionResult {
    /// The control parameters used to obtain this set of results.
    pub parameters: PhaseExtractionParams,

    /// The mixing matrix from which the phases have been extracted.
    pub matrix: Array2<C128>,

    /// The deviation of the mixing matrix from unitarity.
    pub unitarity_deviation: f64,

    /// The extracted angles and phases.
    pub phases: MixingPhases,

    /// The regimes of the three extracted angles.
    pub regime: MixingRegime,
}

impl PhaseExtractionResult {
    /// Returns a builder to construct a [`PhaseExtractionResult`] structure.
    fn builder() -> PhaseExtractionResultBuilder {
        PhaseExtractionResultBuilder::default()
    }
}

impl fmt::Display for PhaseExtractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.parameters.write_matrices {
            write_matrix(f, "Mixing matrix", &self.matrix)?;
        }
        writeln!(f, "Unitarity deviation: {:.3e}", self.unitarity_deviation)?;
        writeln!(f)?;
        write!(f, "{}", self.phases)?;
        writeln!(f)?;
        Ok(())
    }
}

// ------
// Driver
// ------

/// A driver for the extraction of mixing angles and phases.
#[derive(Clone, Builder)]
pub struct PhaseExtractionDriver<'a> {
    /// The control parameters for phase extraction.
    parameters: &'a PhaseExtractionParams,

    /// The mixing matrix in an arbitrary phase convention.
    matrix: &'a Array2<C128>,

    /// The result of the phase extraction.
    #[builder(setter(skip), default = "None")]
    result: Option<PhaseExtractionResult>,
}

impl<'a> PhaseExtractionDriver<'a> {
    /// Returns a builder to construct a [`PhaseExtractionDriver`] structure.
    pub fn builder() -> PhaseExtractionDriverBuilder<'a> {
        PhaseExtractionDriverBuilder::default()
    }

    /// Executes the phase extraction.
    fn extract_phases(&mut self) -> Result<(), anyhow::Error> {
        log_title("Mixing-Phase Extraction");
        mixphase_output!("");
        let params = self.parameters;
        params.log_output_display();

        let deviation = check_unitarity(
            "U",
            self.matrix,
            params.unitarity_threshold,
            params.strict_unitarity,
        )?;
        let phases = mixing_phases(self.matrix);

        self.result = Some(
            PhaseExtractionResult::builder()
                .parameters(params.clone())
                .matrix(self.matrix.clone())
                .unitarity_deviation(deviation)
                .phases(phases)
                .regime(phases.regime())
                .build()
                .map_err(|err| format_err!(err))?,
        );

        if let Some(res) = self.result.as_ref() {
            log_subtitle("Standard-parametrisation angles and phases");
            mixphase_output!("");
            res.log_output_display();
            if let Some(name) = params.result_save_name.as_ref() {
                let path = write_mixphase_binary(name, MixPhaseFileType::Phs, res)?;
                mixphase_output!("Phase-extraction results saved as {}.", path.display());
                mixphase_output!("");
            }
        }

        Ok(())
    }
}

impl MixPhaseDriver for PhaseExtractionDriver<'_> {
    type Params = PhaseExtractionParams;

    type Outcome = PhaseExtractionResult;

    fn result(&self) -> Result<&Self::Outcome, anyhow::Error> {
        self.result
            .as_ref()
            .ok_or_else(|| format_err!("No phase-extraction results found."))
    }

    fn run(&mut self) -> Result<(), anyhow::Error> {
        self.extract_phases()
    }
}
