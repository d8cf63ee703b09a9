//! Directional rolling sums and the asymmetric depth-window aggregate.
//!
//! Boundary policy: a window that runs off either end of the curve, or that
//! contains an absent sample, yields `None`. Partial windows are never summed.

use std::collections::VecDeque;

use crate::types::{Curve, Sample, SamplingStep, WindowSamples, WindowSpec};

use super::EngineError;

/// Upper bound on the ring buffer allocated up front; larger windows grow on push.
const PREALLOC_LIMIT: usize = 4096;

/// Running sum over the most recent `capacity` samples pushed.
///
/// A zero-capacity window is always full and always sums to zero.
#[derive(Debug, Clone)]
pub struct RollingSum {
    capacity: usize,
    window: VecDeque<Sample>,
    sum: f64,
    missing: usize,
    since_resync: usize,
}

impl RollingSum {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            window: VecDeque::with_capacity(capacity.min(PREALLOC_LIMIT)),
            sum: 0.0,
            missing: 0,
            since_resync: 0,
        }
    }

    /// Push the next sample, evicting the oldest once the window is full.
    pub fn push(&mut self, sample: Sample) {
        if self.capacity == 0 {
            return;
        }

        if self.window.len() == self.capacity {
            match self.window.pop_front() {
                Some(Some(old)) => self.sum -= old,
                Some(None) => self.missing -= 1,
                None => {}
            }
        }

        match sample {
            Some(v) => self.sum += v,
            None => self.missing += 1,
        }
        self.window.push_back(sample);

        // Re-sum once per window length so add/subtract rounding cannot build up
        // along a long log.
        self.since_resync += 1;
        if self.since_resync >= self.capacity {
            self.sum = self.window.iter().flatten().sum();
            self.since_resync = 0;
        }
    }

    pub fn is_full(&self) -> bool {
        self.window.len() == self.capacity
    }

    /// Sum of the window, or `None` when it is not yet full or holds an absent sample.
    pub fn value(&self) -> Option<f64> {
        (self.is_full() && self.missing == 0).then_some(self.sum)
    }
}

/// `out[i]` = sum of `values[i + 1 - n ..= i]` (trailing window ending at, and
/// including, `i`). Undefined for `i < n - 1`.
pub fn trailing_window_sums(values: &[Sample], n: usize) -> Vec<Sample> {
    if n > values.len() {
        return vec![None; values.len()];
    }
    let mut acc = RollingSum::new(n);
    values
        .iter()
        .map(|&v| {
            acc.push(v);
            acc.value()
        })
        .collect()
}

/// `out[i]` = sum of `values[i + 1 ..= i + n]` (forward window starting one
/// sample past `i`). Undefined for `i > len - 1 - n`; `n == 0` yields zeros.
pub fn forward_window_sums(values: &[Sample], n: usize) -> Vec<Sample> {
    if n > 0 && n >= values.len() {
        return vec![None; values.len()];
    }
    let mut acc = RollingSum::new(n);
    let mut out = vec![None; values.len()];
    for (i, &v) in values.iter().enumerate().rev() {
        out[i] = acc.value();
        acc.push(v);
    }
    out
}

/// Combine the two directional sums: `above[i] + below[i] - values[i]`.
pub fn combine_window_sums(values: &[Sample], samples: WindowSamples) -> Vec<Sample> {
    let above = trailing_window_sums(values, samples.above);
    let below = forward_window_sums(values, samples.below);

    values
        .iter()
        .zip(above.iter().zip(below.iter()))
        .map(|(&v, (&a, &b))| match (v, a, b) {
            (Some(v), Some(a), Some(b)) => Some(a + b - v),
            _ => None,
        })
        .collect()
}

/// Windowed aggregate of `curve` over `window`, as a new curve named by
/// [`WindowSpec::curve_name`] and carrying the source curve's unit.
pub fn compute_windowed_aggregate(
    curve: &Curve,
    step: SamplingStep,
    window: &WindowSpec,
) -> Result<Curve, EngineError> {
    let samples = window.sample_counts(step)?;
    tracing::debug!(
        curve = %curve.mnemonic,
        n_above = samples.above,
        n_below = samples.below,
        "Computing windowed aggregate"
    );

    Ok(Curve::new(
        window.curve_name(&curve.mnemonic),
        combine_window_sums(&curve.values, samples),
    )
    .with_unit(curve.unit.clone()))
}
