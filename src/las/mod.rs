//! LAS 2.0 well-log files
//!
//! Narrow reader/writer for the curve store the batch driver works against:
//! `~V`, `~W`, `~C`, `~P`, `~O` and `~A` sections, one line per depth step.
//! Wrapped data and LAS 3.0 are rejected rather than guessed at.
//!
//! ```ignore
//! use las_window::las::LasFile;
//!
//! let mut las = LasFile::read(Path::new("logs/well_1.las"))?;
//! las_window::engine::process_well(&mut las.log, &params)?;
//! las.write(Path::new("out/well_1_calculated.las"))?;
//! ```

mod reader;
mod writer;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::WellLog;

pub use reader::parse_header_line;

/// Default LAS NULL value when the `~W` section does not declare one.
pub const DEFAULT_NULL_VALUE: f64 = -999.25;

#[derive(Error, Debug)]
pub enum LasError {
    #[error("I/O error ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing ~{0} section")]
    MissingSection(&'static str),

    #[error("Missing {0} item in ~Well section")]
    MissingHeader(&'static str),

    #[error("~Well item {mnemonic} value '{value}' is not a number")]
    NonNumericHeader { mnemonic: &'static str, value: String },

    #[error("Invalid header at line {line}: {message}")]
    Header { line: usize, message: String },

    #[error("Invalid data at line {line}: {message}")]
    Data { line: usize, message: String },

    #[error("Unsupported LAS feature: {0}")]
    Unsupported(String),
}

/// One `MNEM.UNIT VALUE : DESCRIPTION` header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub description: String,
}

impl HeaderItem {
    pub fn new(mnemonic: &str, unit: &str, value: &str, description: &str) -> Self {
        Self {
            mnemonic: mnemonic.to_string(),
            unit: unit.to_string(),
            value: value.to_string(),
            description: description.to_string(),
        }
    }
}

/// A parsed LAS file: header sections kept verbatim, curves in a [`WellLog`].
#[derive(Debug, Clone, PartialEq)]
pub struct LasFile {
    pub version: Vec<HeaderItem>,
    pub well: Vec<HeaderItem>,
    pub parameters: Vec<HeaderItem>,
    pub other: Vec<String>,
    pub null_value: f64,
    pub log: WellLog,
}

impl LasFile {
    /// Read and parse a LAS file. Non-UTF-8 bytes are replaced, not rejected.
    pub fn read(path: &Path) -> Result<Self, LasError> {
        let bytes = std::fs::read(path).map_err(|source| LasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let fallback_id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        reader::parse(&String::from_utf8_lossy(&bytes), &fallback_id)
    }

    /// Parse LAS text. `fallback_id` names the well when neither UWI nor API is set.
    pub fn parse(text: &str, fallback_id: &str) -> Result<Self, LasError> {
        reader::parse(text, fallback_id)
    }

    pub fn write(&self, path: &Path) -> Result<(), LasError> {
        std::fs::write(path, self.to_string()).map_err(|source| LasError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn well_id(&self) -> &str {
        &self.log.well_id
    }
}

pub(crate) fn find_item<'a>(items: &'a [HeaderItem], mnemonic: &str) -> Option<&'a HeaderItem> {
    items
        .iter()
        .find(|item| item.mnemonic.eq_ignore_ascii_case(mnemonic))
}

/// Well identifier from the `~W` section: UWI, then API, then `fallback`.
pub fn well_identifier(well: &[HeaderItem], fallback: &str) -> String {
    ["UWI", "API"]
        .iter()
        .filter_map(|m| find_item(well, m))
        .map(|item| item.value.trim())
        .find(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_identifier_prefers_uwi() {
        let items = vec![
            HeaderItem::new("API", "", "4212345678", ""),
            HeaderItem::new("UWI", "", "05-123-45678-00-00", ""),
        ];
        assert_eq!(well_identifier(&items, "file"), "05-123-45678-00-00");
    }

    #[test]
    fn test_well_identifier_falls_back_to_api_then_file() {
        let items = vec![
            HeaderItem::new("UWI", "", "  ", ""),
            HeaderItem::new("API", "", "4212345678", ""),
        ];
        assert_eq!(well_identifier(&items, "file"), "4212345678");
        assert_eq!(well_identifier(&[], "well_7"), "well_7");
    }
}
