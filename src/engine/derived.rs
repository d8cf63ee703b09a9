//! Pointwise derived quantities: SoPhiH (hydrocarbon-column feet) and OOIP
//! (original oil in place per acre), plus the per-well derivation that attaches
//! them and their windowed aggregates to a curve table.

use serde::Serialize;
use tracing::debug;

use crate::types::{Curve, Sample, SamplingStep, WellLog, WindowSpec};

use super::window::compute_windowed_aggregate;
use super::EngineError;

/// Barrels per acre-foot.
pub const BBL_PER_ACRE_FT: f64 = 7758.0;

pub const SOPHIH_MNEMONIC: &str = "SoPhiH";
pub const OOIP_MNEMONIC: &str = "OOIP";
pub const SOPHIH_UNIT: &str = "hydrocarbon ft";
pub const OOIP_UNIT: &str = "bbls/acre";

/// Hydrocarbon-filled thickness of one sample: `step * phi * (1 - sw)`.
pub fn so_phi_h(step: f64, phi: f64, sw: f64) -> f64 {
    step * phi * (1.0 - sw)
}

/// Oil in place per acre for a SoPhiH value: `7758 * A * SoPhiH / Bo`.
pub fn ooip(area_acres: f64, bo: f64, so_phi_h: f64) -> f64 {
    BBL_PER_ACRE_FT * area_acres * so_phi_h / bo
}

/// Apply `formula` across aligned input curves.
///
/// A position is `None` when any input sample there is absent or the formula
/// result is not finite. All inputs must share the length of the first one.
pub fn derive_pointwise<F>(mnemonic: &str, inputs: &[&Curve], formula: F) -> Result<Curve, EngineError>
where
    F: Fn(&[f64]) -> f64,
{
    let len = inputs.first().map_or(0, |c| c.len());
    if let Some(bad) = inputs.iter().find(|c| c.len() != len) {
        return Err(EngineError::LengthMismatch {
            curve: bad.mnemonic.clone(),
            expected: len,
            actual: bad.len(),
        });
    }

    let mut row = Vec::with_capacity(inputs.len());
    let values = (0..len)
        .map(|i| {
            row.clear();
            for curve in inputs {
                row.push(curve.values[i]?);
            }
            let v = formula(&row);
            v.is_finite().then_some(v)
        })
        .collect::<Vec<Sample>>();

    Ok(Curve::new(mnemonic, values))
}

/// Resolve `inputs` by name in `log` and apply `formula` pointwise.
///
/// Fails with [`EngineError::MissingInputCurve`] for the first absent input;
/// nothing is attached to `log` either way.
pub fn compute_derived_quantity<F>(
    log: &WellLog,
    mnemonic: &str,
    inputs: &[&str],
    formula: F,
) -> Result<Curve, EngineError>
where
    F: Fn(&[f64]) -> f64,
{
    let curves = inputs
        .iter()
        .map(|name| log.require(name))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(bad) = curves.iter().find(|c| c.len() != log.len()) {
        return Err(EngineError::LengthMismatch {
            curve: bad.mnemonic.clone(),
            expected: log.len(),
            actual: bad.len(),
        });
    }

    derive_pointwise(mnemonic, &curves, formula)
}

/// Inputs for the standard SoPhiH / OOIP derivation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivationParams {
    /// Porosity curve mnemonic
    pub phi: String,
    /// Water saturation curve mnemonic
    pub sw: String,
    /// Drainage area in acres
    pub area_acres: f64,
    /// Formation volume factor (reservoir bbl / stock-tank bbl)
    pub bo: f64,
    pub window: WindowSpec,
}

/// The four curves produced for one well.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedCurves {
    pub so_phi_h: Curve,
    pub ooip: Curve,
    pub so_phi_h_window: Curve,
    pub ooip_window: Curve,
}

impl DerivedCurves {
    pub fn into_curves(self) -> [Curve; 4] {
        [self.so_phi_h, self.ooip, self.so_phi_h_window, self.ooip_window]
    }
}

/// Compute SoPhiH, OOIP and both windowed aggregates for `log` without touching it.
pub fn derive_well(log: &WellLog, params: &DerivationParams) -> Result<DerivedCurves, EngineError> {
    let step = SamplingStep::new(log.step)?;
    let samples = params.window.sample_counts(step)?;
    debug!(
        well = %log.well_id,
        %step,
        n_above = samples.above,
        n_below = samples.below,
        "Deriving SoPhiH/OOIP"
    );

    let so_phi_h_curve = compute_derived_quantity(
        log,
        SOPHIH_MNEMONIC,
        &[params.phi.as_str(), params.sw.as_str()],
        |x| so_phi_h(step.value(), x[0], x[1]),
    )?
    .with_unit(SOPHIH_UNIT)
    .with_description(format!("SoPhiH from {} and {} curves", params.phi, params.sw));

    let ooip_curve = derive_pointwise(OOIP_MNEMONIC, &[&so_phi_h_curve], |x| {
        ooip(params.area_acres, params.bo, x[0])
    })?
    .with_unit(OOIP_UNIT)
    .with_description(format!(
        "barrels per acre using area = {} and Bo = {}",
        params.area_acres, params.bo
    ));

    let w = &params.window;
    let window_note = format!(
        "over a {} ft window ({} ft up, {} ft down)",
        w.total_ft(),
        w.ft_above(),
        w.ft_below()
    );

    let so_phi_h_window = compute_windowed_aggregate(&so_phi_h_curve, step, w)?
        .with_description(format!("rolling sum of {SOPHIH_MNEMONIC} {window_note}"));
    let ooip_window = compute_windowed_aggregate(&ooip_curve, step, w)?
        .with_description(format!("rolling sum of {OOIP_MNEMONIC} {window_note}"));

    Ok(DerivedCurves {
        so_phi_h: so_phi_h_curve,
        ooip: ooip_curve,
        so_phi_h_window,
        ooip_window,
    })
}

/// Derive and attach the four curves to `log`. On error `log` is unchanged.
pub fn process_well(log: &mut WellLog, params: &DerivationParams) -> Result<(), EngineError> {
    let derived = derive_well(log, params)?;
    for curve in derived.into_curves() {
        log.insert(curve);
    }
    Ok(())
}
