//! Input specification for mixphase from a YAML configuration file.

use anyhow::{self, ensure, format_err};
use ndarray::Array2;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::drivers::phase_extraction::{PhaseExtractionDriver, PhaseExtractionParams};
use crate::drivers::rephasing::{RephasingDriver, RotationSet};
use crate::drivers::MixPhaseDriver;
use crate::interfaces::InputHandle;
use crate::io::format::mixphase_error;
use crate::mixing::C128;


/// A serialisable/deserialisable $`3 \times 3`$ complex matrix given by its real and imaginary
/// parts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexMatrixInput {
    /// The real parts of the matrix elements, row by row.
    pub real: [[f64; 3]; 3],

    /// The imaginary parts of the matrix elements, row by row.
    ///
    /// # Default
    ///
    /// If not specified, all imaginary parts are zero.
    #[serde(default)]
    pub imag: [[f64; 3]; 3],
}

impl ComplexMatrixInput {
    /// Constructs the complex matrix.
    pub fn to_array(&self) -> Array2<C128> {
        Array2::from_shape_fn((3, 3), |(i, j)| {
            Complex::new(self.real[i][j], self.imag[i][j])
        })
    }
}

impl TryFrom<&Array2<C128>> for ComplexMatrixInput {
    type Error = anyhow::Error;

    /// Splits a $`3 \times 3`$ complex matrix into its real and imaginary parts.
    ///
    /// # Errors
    ///
    /// Errors if the matrix is not $`3 \times 3`$.
    fn try_from(mat: &Array2<C128>) -> Result<Self, Self::Error> {
        ensure!(
            mat.dim() == (3, 3),
            "Matrix has shape {:?}, but a 3 × 3 matrix is required.",
            mat.dim()
        );
        let mut input = ComplexMatrixInput::default();
        mat.indexed_iter().for_each(|((i, j), x)| {
            input.real[i][j] = x.re;
            input.imag[i][j] = x.im;
        });
        Ok(input)
    }
}

/// An enumerated type for the possible targets of a mixphase calculation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum InputTarget {
    /// Variant for a single mixing matrix whose angles and phases are to be extracted.
    MixingMatrix { matrix: ComplexMatrixInput },

    /// Variant for quark rotation matrices that are to be rephased so that the CKM matrix is in
    /// the standard parametrisation.
    QuarkRotations {
        uu_l: ComplexMatrixInput,
        ud_l: ComplexMatrixInput,
        uu_r: ComplexMatrixInput,
        ud_r: ComplexMatrixInput,
    },

    /// Variant for lepton rotation matrices that are to be rephased so that the PMNS matrix is in
    /// the standard parametrisation up to the Majorana-type phases.
    LeptonRotations {
        unu: ComplexMatrixInput,
        ue_l: ComplexMatrixInput,
        ue_r: ComplexMatrixInput,
    },
}

impl InputTarget {
    /// Constructs the rotation set to be rephased, or `None` if this target is a single mixing
    /// matrix.
    fn rotation_set(&self) -> Option<RotationSet> {
        match self {
            InputTarget::MixingMatrix { .. } => None,
            InputTarget::QuarkRotations {
                uu_l,
                ud_l,
                uu_r,
                ud_r,
            } => Some(RotationSet::Quark {
                uu_l: uu_l.to_array(),
                ud_l: ud_l.to_array(),
                uu_r: uu_r.to_array(),
                ud_r: ud_r.to_array(),
            }),
            InputTarget::LeptonRotations { unu, ue_l, ue_r } => Some(RotationSet::Lepton {
                unu: unu.to_array(),
                ue_l: ue_l.to_array(),
                ue_r: ue_r.to_array(),
            }),
        }
    }
}

/// A structure containing mixphase input parameters which can be serialised into and deserialised
/// from a YAML input file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Input {
    /// Control parameters for the calculation. The same parameters are used for phase extraction
    /// and rephasing.
    ///
    /// # Default
    ///
    /// If not specified, default parameters are used.
    #[serde(default)]
    pub parameters: Option<PhaseExtractionParams>,

    /// The target of the calculation.
    pub target: InputTarget,
}

impl InputHandle for Input {
    /// Handles the mixphase input specification.
    fn handle(&self) -> Result<(), anyhow::Error> {
        let params = self.parameters.clone().unwrap_or_default();
        let outcome = match &self.target {
            InputTarget::MixingMatrix { matrix } => {
                let u = matrix.to_array();
                let mut driver = PhaseExtractionDriver::builder()
                    .parameters(&params)
                    .matrix(&u)
                    .build()
                    .map_err(|err| format_err!(err))?;
                driver.run()
            }
            target => {
                let rotations = target
                    .rotation_set()
                    .ok_or_else(|| format_err!("Rotation matrices expected but not found."))?;
                let mut driver = RephasingDriver::builder()
                    .parameters(&params)
                    .rotations(&rotations)
                    .build()
                    .map_err(|err| format_err!(err))?;
                driver.run()
            }
        };
        outcome.map_err(|err| {
            mixphase_error!("{err}");
            err
        })
    }
}
