//! End-of-batch reporting

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::engine::EngineError;

use super::WellOutcome;

/// Why a well was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Read,
    MissingInputCurve,
    InvalidStep,
    InvalidWindow,
    LengthMismatch,
    Write,
}

impl From<&EngineError> for FailureKind {
    fn from(e: &EngineError) -> Self {
        match e {
            EngineError::InvalidStep(_) => Self::InvalidStep,
            EngineError::InvalidWindow(_) => Self::InvalidWindow,
            EngineError::MissingInputCurve { .. } => Self::MissingInputCurve,
            EngineError::LengthMismatch { .. } => Self::LengthMismatch,
        }
    }
}

/// One skipped well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WellFailure {
    pub file: PathBuf,
    /// `None` when the file could not be read far enough to identify the well
    pub well_id: Option<String>,
    pub kind: FailureKind,
    pub message: String,
}

impl WellFailure {
    pub fn new(file: &Path, well_id: Option<String>, kind: FailureKind, err: &dyn fmt::Display) -> Self {
        Self {
            file: file.to_path_buf(),
            well_id,
            kind,
            message: err.to_string(),
        }
    }
}

/// One well written successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedWell {
    pub well_id: String,
    pub output: PathBuf,
}

/// Totals for a batch run. `processed` counts every file attempted, failed ones
/// included; `errors` counts the failures.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub errors: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub runtime_ms: i64,
    pub outputs: Vec<ProcessedWell>,
    pub failures: Vec<WellFailure>,
}

impl BatchSummary {
    pub fn from_outcomes(
        outcomes: Vec<WellOutcome>,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        let processed = outcomes.len();
        let mut outputs = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                WellOutcome::Processed { well_id, output } => {
                    outputs.push(ProcessedWell { well_id, output });
                }
                WellOutcome::Failed(f) => failures.push(f),
            }
        }

        Self {
            processed,
            errors: failures.len(),
            started_at,
            completed_at,
            runtime_ms: (completed_at - started_at).num_milliseconds(),
            outputs,
            failures,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.processed - self.errors
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} wells processed with {} errors.", self.processed, self.errors)?;
        for failure in &self.failures {
            writeln!(
                f,
                "  - {} ({}): {}",
                failure.file.display(),
                failure.well_id.as_deref().unwrap_or("unidentified"),
                failure.message
            )?;
        }
        write!(
            f,
            "Completed at {} in {:.3}s",
            self.completed_at.format("%Y-%m-%d %H:%M:%S"),
            self.runtime_ms as f64 / 1000.0
        )
    }
}
