use std::f64::consts::PI;

use crate::error::PlannerError;
use crate::models::{GrowthAssumption, StepEvent};

/// Pure compounding growth: `base * (1 + monthly_rate)^i` for `i` in `0..len`.
pub fn compounding_series(len: usize, base: f64, monthly_rate: f64) -> Vec<f64> {
    let factor = 1.0 + monthly_rate;
    (0..len).map(|i| base * factor.powf(i as f64)).collect()
}

/// Compounding growth with additive onboarding waves.
///
/// Every step adds its `delta` to all months at or after its offset. Steps
/// are independent, so their order does not matter and steps sharing an
/// offset sum. An offset beyond the horizon never applies.
///
/// # Examples
///
/// ```
/// use capacity_planner::analysis::build_stepped_series;
/// use capacity_planner::models::StepEvent;
///
/// let s = build_stepped_series(4, 100.0, 0.0, &[StepEvent::new(2, 10.0)]).unwrap();
/// assert_eq!(s, vec![100.0, 100.0, 110.0, 110.0]);
/// ```
pub fn build_stepped_series(
    len: usize,
    base: f64,
    monthly_rate: f64,
    steps: &[StepEvent],
) -> Result<Vec<f64>, PlannerError> {
    let mut series = compounding_series(len, base, monthly_rate);
    for step in steps {
        let start = usize::try_from(step.month).map_err(|_| {
            PlannerError::InvalidStepEvent(format!(
                "month offset must not be negative, got {} (delta {})",
                step.month, step.delta
            ))
        })?;
        if let Some(tail) = series.get_mut(start..) {
            tail.iter_mut().for_each(|v| *v += step.delta);
        }
    }
    Ok(series)
}

/// [`build_stepped_series`] driven by a scenario growth assumption.
pub fn project_stepped(
    len: usize,
    base: f64,
    assumption: &GrowthAssumption,
) -> Result<Vec<f64>, PlannerError> {
    build_stepped_series(len, base, assumption.monthly_rate, &assumption.steps)
}

/// Seasonal multiplier `1 + sum_k a_k * sin(2*pi*k*i / period)`, k from 1.
pub fn seasonal_multiplier(len: usize, period_months: f64, harmonics: &[f64]) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let phase = 2.0 * PI * i as f64 / period_months;
            1.0 + harmonics
                .iter()
                .enumerate()
                .map(|(k, amplitude)| amplitude * ((k + 1) as f64 * phase).sin())
                .sum::<f64>()
        })
        .collect()
}

/// Running sum of `values` on top of `start`.
pub fn cumulative_from(start: f64, values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(start, |total, v| {
            *total += v;
            Some(*total)
        })
        .collect()
}
