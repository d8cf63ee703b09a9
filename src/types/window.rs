//! Sampling step and depth-window definitions

use serde::Serialize;
use std::fmt;

use crate::engine::EngineError;

/// Tolerance applied before flooring a feet-to-samples division, so that
/// `0.3 / 0.1` (= 2.9999999999999996) resolves to 3 samples.
const SAMPLE_COUNT_EPSILON: f64 = 1e-9;

/// Validated depth increment between consecutive samples (always > 0).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct SamplingStep(f64);

impl SamplingStep {
    pub fn new(step: f64) -> Result<Self, EngineError> {
        if step.is_finite() && step > 0.0 {
            Ok(Self(step))
        } else {
            Err(EngineError::InvalidStep(step))
        }
    }

    pub const fn value(self) -> f64 {
        self.0
    }

    /// Whole samples covered by `distance`, truncated toward zero.
    // Negative or NaN ratios saturate to 0 in the cast.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn samples_in(self, distance: f64) -> usize {
        (distance / self.0 + SAMPLE_COUNT_EPSILON).floor() as usize
    }
}

impl fmt::Display for SamplingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Asymmetric aggregation window, in depth units (feet for US LAS files).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowSpec {
    ft_above: f64,
    ft_below: f64,
}

/// A [`WindowSpec`] converted to sample counts for one sampling step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowSamples {
    /// Trailing window length, current sample included
    pub above: usize,
    /// Forward window length, starting one sample below the current one
    pub below: usize,
}

impl WindowSpec {
    pub fn new(ft_above: f64, ft_below: f64) -> Result<Self, EngineError> {
        if !ft_above.is_finite() || ft_above < 0.0 {
            return Err(EngineError::InvalidWindow(format!(
                "ft_above must be a finite, non-negative distance (got {ft_above})"
            )));
        }
        if !ft_below.is_finite() || ft_below < 0.0 {
            return Err(EngineError::InvalidWindow(format!(
                "ft_below must be a finite, non-negative distance (got {ft_below})"
            )));
        }
        Ok(Self { ft_above, ft_below })
    }

    pub const fn ft_above(&self) -> f64 {
        self.ft_above
    }

    pub const fn ft_below(&self) -> f64 {
        self.ft_below
    }

    /// Total window height (`ft_above + ft_below`).
    pub fn total_ft(&self) -> f64 {
        self.ft_above + self.ft_below
    }

    /// Convert the window to sample counts.
    ///
    /// `below == 0` is an empty forward window. `above == 0` is rejected: the
    /// trailing window always owns the current sample, so it needs at least one.
    pub fn sample_counts(&self, step: SamplingStep) -> Result<WindowSamples, EngineError> {
        let above = step.samples_in(self.ft_above);
        if above == 0 {
            return Err(EngineError::InvalidWindow(format!(
                "ft_above = {} is shorter than one sampling step ({step})",
                self.ft_above
            )));
        }
        Ok(WindowSamples {
            above,
            below: step.samples_in(self.ft_below),
        })
    }

    /// Name of the aggregate curve for `quantity`, e.g.
    /// `SoPhiH_150ft_window_100ft_up_50ft_down`.
    pub fn curve_name(&self, quantity: &str) -> String {
        format!(
            "{quantity}_{}ft_window_{}ft_up_{}ft_down",
            self.total_ft(),
            self.ft_above,
            self.ft_below
        )
    }
}
