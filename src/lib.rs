//! las-window: hydrocarbon-column and oil-in-place window aggregation
//!
//! Derives SoPhiH (step x phi x (1 - Sw)) and OOIP (7758 x A x SoPhiH / Bo) for
//! every well in a folder of LAS files, together with an asymmetric depth-window
//! rolling total of each, and writes the curves back alongside the inputs.
//!
//! ## Architecture
//!
//! - **Engine**: pure per-well computations (derived quantities, windowed sums)
//! - **LAS**: LAS 2.0 reader/writer used as the curve store
//! - **Batch**: parallel folder driver with per-well skip-and-count error policy
//! - **Config**: TOML run configuration with typo detection and range checks

pub mod batch;
pub mod config;
pub mod engine;
pub mod las;
pub mod types;

// Re-export run configuration
pub use config::{ConfigError, RunConfig};

// Re-export commonly used types
pub use types::{Curve, Sample, SamplingStep, WellLog, WindowSamples, WindowSpec};

// Re-export engine entry points
pub use engine::{
    compute_derived_quantity, compute_windowed_aggregate, derive_well, process_well,
    DerivationParams, DerivedCurves, EngineError,
};

// Re-export I/O and batch components
pub use batch::{BatchError, BatchRunner, BatchSummary, FailureKind, ProcessedWell, WellFailure};
pub use las::{LasError, LasFile};
