use statrs::statistics::Statistics;

use crate::error::PlannerError;
use crate::models::{KpiModel, SaturationBand};

/// Min and max of a whole series.
///
/// Fails with [`PlannerError::DegenerateSeries`] when the series is empty,
/// contains non-finite values, or is flat (`max == min`): min-max
/// normalisation is undefined there and would otherwise produce NaN.
pub fn series_range(values: &[f64], label: &str) -> Result<(f64, f64), PlannerError> {
    if values.is_empty() {
        return Err(PlannerError::DegenerateSeries(format!("{label}: series is empty")));
    }
    let min = Statistics::min(values);
    let max = Statistics::max(values);
    if !min.is_finite() || !max.is_finite() {
        return Err(PlannerError::DegenerateSeries(format!(
            "{label}: series contains non-finite values"
        )));
    }
    if max - min <= 0.0 {
        return Err(PlannerError::DegenerateSeries(format!(
            "{label}: series is flat at {min} over the whole horizon"
        )));
    }
    Ok((min, max))
}

/// `(x - min) / (max - min)` with min and max taken once over the whole series.
pub fn min_max_normalize(values: &[f64], label: &str) -> Result<Vec<f64>, PlannerError> {
    let (min, max) = series_range(values, label)?;
    tracing::debug!(series = label, min, max, "normalisation range");
    let span = max - min;
    Ok(values.iter().map(|x| ((x - min) / span).clamp(0.0, 1.0)).collect())
}

/// Affine map of a `[0, 1]` value into the saturation band.
pub fn map_into_band(normalized: f64, band: SaturationBand) -> f64 {
    (band.low + normalized * band.width()).clamp(band.low, band.high)
}

/// Normalise a raw load signal into the saturation band.
pub fn saturation(raw: &[f64], band: SaturationBand, label: &str) -> Result<Vec<f64>, PlannerError> {
    Ok(min_max_normalize(raw, label)?
        .into_iter()
        .map(|n| map_into_band(n, band))
        .collect())
}

/// `clip(intercept + slope * (saturation - low) / (high - low), floor, ceiling)`
pub fn kpi_from_saturation(saturation: f64, band: SaturationBand, kpi: &KpiModel) -> f64 {
    let position = (saturation - band.low) / band.width();
    (kpi.intercept + kpi.slope * position).clamp(kpi.floor, kpi.ceiling)
}
