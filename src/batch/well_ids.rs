//! Well identifier listing
//!
//! Identifiers are reported exactly as they appear in the header (UWI, else
//! API, else the file stem); no dash stripping or truncation is applied.

use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

use crate::las::LasFile;

use super::{list_log_files, BatchError};

/// Read the well identifier of every matching file in `folder`.
///
/// Unreadable files are logged and skipped.
pub fn collect_well_ids(folder: &Path, extension: &str) -> Result<Vec<String>, BatchError> {
    let files = list_log_files(folder, extension, "")?;
    let ids = files
        .iter()
        .filter_map(|path| match LasFile::read(path) {
            Ok(las) => Some(las.log.well_id),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Skipping unreadable log file");
                None
            }
        })
        .collect();
    Ok(ids)
}

/// Write one identifier per line to `path`.
pub fn write_well_ids(ids: &[String], path: &Path) -> Result<(), BatchError> {
    let to_err = |source| BatchError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(path).map_err(to_err)?;
    let mut out = BufWriter::new(file);
    for id in ids {
        writeln!(out, "{id}").map_err(to_err)?;
    }
    out.flush().map_err(to_err)?;
    info!(count = ids.len(), path = %path.display(), "Well identifiers written");
    Ok(())
}
