//! Rolling Aggregation Engine
//!
//! Pure, synchronous computations over one well's curve table. Nothing here
//! performs I/O or keeps state between calls, so wells can be processed in
//! parallel without coordination.
//!
//! - `compute_derived_quantity()` - pointwise formula over named input curves
//! - `compute_windowed_aggregate()` - asymmetric trailing + forward depth-window sum
//! - `derive_well()` / `process_well()` - SoPhiH, OOIP and their aggregates for a well

mod derived;
mod window;

pub use derived::{
    compute_derived_quantity, derive_pointwise, derive_well, ooip, process_well, so_phi_h,
    DerivationParams, DerivedCurves, BBL_PER_ACRE_FT, OOIP_MNEMONIC, OOIP_UNIT, SOPHIH_MNEMONIC,
    SOPHIH_UNIT,
};
pub use window::{
    combine_window_sums, compute_windowed_aggregate, forward_window_sums, trailing_window_sums,
    RollingSum,
};

use thiserror::Error;

/// Failures that abort the derivation for a single well.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid sampling step: {0} (must be a positive, finite depth increment)")]
    InvalidStep(f64),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Well {well} is missing required input curve '{curve}'")]
    MissingInputCurve { curve: String, well: String },

    #[error("Curve '{curve}' has {actual} samples, expected {expected}")]
    LengthMismatch {
        curve: String,
        expected: usize,
        actual: usize,
    },
}
