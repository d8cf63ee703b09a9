//! Depth-indexed curve storage for a single well

use serde::{Deserialize, Serialize};

use crate::engine::EngineError;

/// One curve sample. `None` marks an absent reading (LAS NULL) or a depth where a
/// derived value is undefined.
pub type Sample = Option<f64>;

/// A named, depth-ordered series of samples with LAS unit/description metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Curve mnemonic, e.g. `PHIT`
    pub mnemonic: String,
    /// Unit string written to the `~Curve` section
    #[serde(default)]
    pub unit: String,
    /// Free-text description written to the `~Curve` section
    #[serde(default)]
    pub description: String,
    /// One sample per depth position
    pub values: Vec<Sample>,
}

impl Curve {
    pub fn new(mnemonic: impl Into<String>, values: Vec<Sample>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            unit: String::new(),
            description: String::new(),
            values,
        }
    }

    /// Build a curve where every sample is present.
    pub fn from_values(mnemonic: impl Into<String>, values: &[f64]) -> Self {
        Self::new(mnemonic, values.iter().copied().map(Some).collect())
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The curve table of one well: index (depth) curve, data curves and sampling step.
///
/// Every curve shares the index of `depth`; `step` is the raw header value and is
/// only validated when the engine converts it to a [`super::SamplingStep`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellLog {
    /// Well identifier used in logs and error reports
    pub well_id: String,
    /// Depth increment between consecutive samples
    pub step: f64,
    /// Index curve (usually `DEPT`)
    pub depth: Curve,
    /// Data curves in file order
    pub curves: Vec<Curve>,
}

impl WellLog {
    pub fn new(well_id: impl Into<String>, step: f64, depth: Curve) -> Self {
        Self {
            well_id: well_id.into(),
            step,
            depth,
            curves: Vec::new(),
        }
    }

    /// Number of depth positions.
    pub fn len(&self) -> usize {
        self.depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depth.is_empty()
    }

    /// Look up a data curve by exact mnemonic.
    pub fn get(&self, mnemonic: &str) -> Option<&Curve> {
        self.curves.iter().find(|c| c.mnemonic == mnemonic)
    }

    /// Look up a curve that a derivation cannot proceed without.
    pub fn require(&self, mnemonic: &str) -> Result<&Curve, EngineError> {
        self.get(mnemonic).ok_or_else(|| EngineError::MissingInputCurve {
            curve: mnemonic.to_string(),
            well: self.well_id.clone(),
        })
    }

    /// Attach a curve, replacing any existing curve with the same mnemonic.
    pub fn insert(&mut self, curve: Curve) {
        match self.curves.iter_mut().find(|c| c.mnemonic == curve.mnemonic) {
            Some(existing) => *existing = curve,
            None => self.curves.push(curve),
        }
    }

    pub fn mnemonics(&self) -> impl Iterator<Item = &str> {
        self.curves.iter().map(|c| c.mnemonic.as_str())
    }
}
