//! Batch driver: runs the engine over every log file in a folder
//!
//! Files are processed in parallel, one task per well. A well that cannot be
//! read, lacks an input curve or cannot be written is logged and counted; the
//! rest of the batch carries on. Only problems with the folders themselves
//! abort a run.

mod summary;
mod well_ids;

pub use summary::{BatchSummary, FailureKind, ProcessedWell, WellFailure};
pub use well_ids::{collect_well_ids, write_well_ids};

use chrono::Utc;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{ConfigError, RunConfig};
use crate::engine::{self, DerivationParams};
use crate::las::LasFile;

/// Errors that stop a whole batch.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Cannot read folder {path}: {source}")]
    ReadFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create output folder {path}: {source}")]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Outcome of one file.
#[derive(Debug)]
pub enum WellOutcome {
    Processed { well_id: String, output: PathBuf },
    Failed(WellFailure),
}

/// List files in `folder` (non-recursive) whose extension matches
/// `extension` case-insensitively, sorted by path.
///
/// Files whose stem already ends with `skip_suffix` are previous outputs and
/// are left out; pass `""` to keep everything.
pub fn list_log_files(
    folder: &Path,
    extension: &str,
    skip_suffix: &str,
) -> Result<Vec<PathBuf>, BatchError> {
    let wanted = extension.trim_start_matches('.');
    let entries = std::fs::read_dir(folder).map_err(|source| BatchError::ReadFolder {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
        })
        .filter(|path| {
            skip_suffix.is_empty()
                || !path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .is_some_and(|s| s.ends_with(skip_suffix))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Runs SoPhiH/OOIP derivation over a folder of LAS files.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    folder: PathBuf,
    extension: String,
    output_dir: PathBuf,
    suffix: String,
    params: DerivationParams,
}

impl BatchRunner {
    /// Build a runner from a validated config.
    pub fn new(config: &RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            folder: config.input.folder.clone(),
            extension: config.input.extension.clone(),
            output_dir: config.output_dir().to_path_buf(),
            suffix: config.input.suffix.clone(),
            params: config.derivation_params()?,
        })
    }

    /// Output path for an input file: `<output_dir>/<stem><suffix>.<ext>`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = input
            .extension()
            .map_or_else(|| self.extension.clone(), |e| e.to_string_lossy().into_owned());
        self.output_dir.join(format!("{stem}{}.{ext}", self.suffix))
    }

    /// Process every matching file in the folder.
    pub fn run(&self) -> Result<BatchSummary, BatchError> {
        let started_at = Utc::now();
        info!(
            folder = %self.folder.display(),
            output = %self.output_dir.display(),
            ft_above = self.params.window.ft_above(),
            ft_below = self.params.window.ft_below(),
            "Batch started"
        );

        let files = list_log_files(&self.folder, &self.extension, &self.suffix)?;
        if files.is_empty() {
            warn!(folder = %self.folder.display(), extension = %self.extension, "No log files found");
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|source| BatchError::CreateOutput {
            path: self.output_dir.clone(),
            source,
        })?;

        let outcomes: Vec<WellOutcome> = files.par_iter().map(|path| self.process_file(path)).collect();

        let summary = BatchSummary::from_outcomes(outcomes, started_at, Utc::now());
        info!(
            processed = summary.processed,
            errors = summary.errors,
            runtime_ms = summary.runtime_ms,
            "Batch completed"
        );
        Ok(summary)
    }

    /// Read, derive and write a single well. Never panics on bad input.
    pub fn process_file(&self, path: &Path) -> WellOutcome {
        let mut las = match LasFile::read(path) {
            Ok(las) => las,
            Err(e) => {
                error!(file = %path.display(), error = %e, "Failed to read log file");
                return WellOutcome::Failed(WellFailure::new(path, None, FailureKind::Read, &e));
            }
        };

        if let Err(e) = engine::process_well(&mut las.log, &self.params) {
            let kind = FailureKind::from(&e);
            warn!(well = %las.well_id(), file = %path.display(), error = %e, "Well skipped");
            return WellOutcome::Failed(WellFailure::new(
                path,
                Some(las.well_id().to_string()),
                kind,
                &e,
            ));
        }

        let output = self.output_path(path);
        if let Err(e) = las.write(&output) {
            error!(well = %las.well_id(), file = %output.display(), error = %e, "Failed to write output");
            return WellOutcome::Failed(WellFailure::new(
                path,
                Some(las.well_id().to_string()),
                FailureKind::Write,
                &e,
            ));
        }

        info!(well = %las.well_id(), output = %output.display(), "Well processed");
        WellOutcome::Processed {
            well_id: las.log.well_id,
            output,
        }
    }
}
