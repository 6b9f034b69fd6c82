//! # mixphase: Mixing Angles and Phases in the Standard Parametrisation
//!
//! mixphase extracts the three mixing angles and all six phases of a $`3 \times 3`$ unitary
//! mixing matrix in the standard (PDG) parametrisation, with the following capabilities:
//! - extraction of $`\theta_{12}`$, $`\theta_{13}`$, $`\theta_{23}`$, the Dirac phase $`\delta`$,
//!   the Majorana-type phases $`\phi_1`$ and $`\phi_2`$, and the three unphysical phases
//!   $`\delta_1`$, $`\delta_2`$ and $`\delta_3`$,
//! - well-defined results in every degenerate configuration where one or more angles sit at
//!   $`0`$ or $`\pi/2`$, and
//! - rephasing of quark or lepton rotation matrices so that the resulting CKM or PMNS matrix is in
//!   the standard parametrisation while the mass matrices remain diagonalised
//!
//! for the following targets:
//! - CKM matrices, together with the up-type and down-type quark rotation matrices, and
//! - PMNS matrices, together with the neutrino and charged-lepton rotation matrices.
//!
//! This documentation details the public API of the `mixphase` crate.
//!
//! ## Getting started
//!
//! To use mixphase in your Rust project, simply add this crate to your project's `Cargo.toml`.
//! The core functionalities are available as
//! - [`mixing_phases`], which extracts the angles and phases of a mixing matrix,
//! - [`rephase_standard`], which rephases quark rotation matrices, and
//! - [`rephase_pmns_standard`], which rephases lepton rotation matrices.
//!
//! The `mixphase` binary reads a YAML configuration file describing either a mixing matrix or a
//! set of rotation matrices, and writes a formatted report of the results. Run `mixphase --help`
//! for the available options.
//!
//! ## Examples and usage
//!
//! For most items (structs, enums, functions, and traits), their usages are illustrated in test
//! functions. Example configuration files can be found in `tests/input`.
//!
//! ## License
//!
//! GNU Lesser General Public License v3.0.

pub mod drivers;
pub mod interfaces;
pub mod io;
pub mod mixing;
pub mod rephasing;

pub use mixing::phases::{mixing_phases, MixingPhases};
pub use rephasing::{rephase_pmns_standard, rephase_standard};
