//! Reading and writing of mixphase input and result files.
//!
//! Configuration files are YAML. Driver results are saved as bincode binaries whose type is
//! marked by a double extension: phase-extraction results as `<name>.mixphase.phs` and rephasing
//! results as `<name>.mixphase.rph`. The extension is always appended to the given name, so
//! names containing dots are kept intact.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{self, format_err};
use bincode;
use serde::{de::DeserializeOwned, Serialize};
use serde_yaml;

pub(crate) mod format;


/// An enumerated type for mixphase binary file types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixPhaseFileType {
    /// Variant for binary files containing phase-extraction results.
    Phs,

    /// Variant for binary files containing rephasing results.
    Rph,
}

impl MixPhaseFileType {
    /// Returns the extension of the file type.
    pub fn ext(&self) -> String {
        match self {
            MixPhaseFileType::Phs => "mixphase.phs".to_string(),
            MixPhaseFileType::Rph => "mixphase.rph".to_string(),
        }
    }
}

/// Appends an extension to a file name without replacing any existing extension.
fn append_extension<P: AsRef<Path>>(name: P, ext: &str) -> PathBuf {
    let mut path = OsString::from(name.as_ref().as_os_str());
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

/// Returns the path of a mixphase binary file.
///
/// # Arguments
///
/// * `name` - The name of the file (without mixphase-specific extensions).
/// * `file_type` - The type of the mixphase file.
///
/// # Returns
///
/// The path `<name>.<ext>`, where `<ext>` is given by [`MixPhaseFileType::ext`].
pub fn mixphase_binary_path<P: AsRef<Path>>(name: P, file_type: MixPhaseFileType) -> PathBuf {
    append_extension(name, &file_type.ext())
}

/// Reads a mixphase binary file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (without mixphase-specific extensions).
/// * `file_type` - The type of the mixphase file to be read in.
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_mixphase_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: MixPhaseFileType,
) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let path = mixphase_binary_path(name, file_type);
    let mut reader = BufReader::new(File::open(path).map_err(|err| format_err!(err))?);
    bincode::deserialize_from(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes into a mixphase binary file.
///
/// # Arguments
///
/// * `name` - The name of the file to be written (without mixphase-specific extensions).
/// * `file_type` - The type of the mixphase file to be written.
/// * `value` - The structure to be serialised.
///
/// # Returns
///
/// A `Result` containing the path of the written file.
pub fn write_mixphase_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: MixPhaseFileType,
    value: &T,
) -> Result<PathBuf, anyhow::Error>
where
    T: Serialize,
{
    let path = mixphase_binary_path(name, file_type);
    let mut writer = BufWriter::new(File::create(&path)?);
    bincode::serialize_into(&mut writer, value).map_err(|err| format_err!(err))?;
    Ok(path)
}

/// Reads a mixphase configuration YAML file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (with its `.yml` or `.yaml` extension).
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_mixphase_yaml<T, P: AsRef<Path>>(name: P) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(File::open(name).map_err(|err| format_err!(err))?);
    serde_yaml::from_reader(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes into a mixphase configuration YAML file.
///
/// # Arguments
///
/// * `name` - The name of the YAML file to be written (without extensions). The resulting file
/// will have the `.yml` extension appended.
/// * `value` - The structure to be serialised.
///
/// # Returns
///
/// A `Result` containing the path of the written file.
pub fn write_mixphase_yaml<T, P: AsRef<Path>>(
    name: P,
    value: &T,
) -> Result<PathBuf, anyhow::Error>
where
    T: Serialize,
{
    let path = append_extension(name, "yml");
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_yaml::to_writer(&mut writer, value).map_err(|err| format_err!(err))?;
    Ok(path)
}
