use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::{DocumentModel, Scenario, SessionModel};

use super::growth::{compounding_series, cumulative_from, project_stepped, seasonal_multiplier};

/// Projected planning-unit series, one value per month of the horizon.
///
/// Units switched off in the scenario are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningUnits {
    pub sources: Vec<f64>,
    pub documents_per_month: Vec<f64>,
    pub documents_cumulative: Vec<f64>,
    pub technology: Vec<f64>,
    pub initiatives: Option<Vec<f64>>,
    pub sessions: Option<Vec<f64>>,
}

impl PlanningUnits {
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Project every active planning unit over `len` months.
pub fn project_planning_units(
    scenario: &Scenario,
    len: usize,
) -> Result<PlanningUnits, PlannerError> {
    let b = &scenario.baselines;

    let sources = require_positive_series(
        "sources",
        project_stepped(len, b.sources, &scenario.sources)?,
    )?;
    let documents_per_month =
        project_documents(&sources, b.documents_per_month, &scenario.documents)?;
    let documents_cumulative = cumulative_from(b.documents_historical, &documents_per_month);
    let technology = require_positive_series(
        "technology",
        project_stepped(len, b.technology, &scenario.technology)?,
    )?;

    let initiatives = if scenario.units.initiatives {
        Some(require_positive_series(
            "initiatives",
            project_stepped(len, b.initiatives, &scenario.initiatives)?,
        )?)
    } else {
        None
    };
    let sessions = scenario
        .units
        .sessions
        .then(|| project_sessions(len, b.sessions, &scenario.sessions));

    tracing::debug!(
        months = len,
        sources_end = sources.last().copied().unwrap_or_default(),
        documents_end = documents_per_month.last().copied().unwrap_or_default(),
        "projected planning units"
    );

    Ok(PlanningUnits {
        sources,
        documents_per_month,
        documents_cumulative,
        technology,
        initiatives,
        sessions,
    })
}

/// Fail on the first month where a stepped unit is not a positive finite count.
///
/// Negative step deltas can drive a unit to zero or below; every ratio and
/// power taken of it downstream would turn into NaN.
fn require_positive_series(unit: &str, series: Vec<f64>) -> Result<Vec<f64>, PlannerError> {
    match series.iter().position(|v| !(v.is_finite() && *v > 0.0)) {
        Some(month) => Err(PlannerError::ValidationError(format!(
            "{unit} must stay positive after step events, got {} at month {month}",
            series[month]
        ))),
        None => Ok(series),
    }
}

/// Monthly growth factor that takes `base` to `target` at the last index.
///
/// A single-month horizon has no growth to solve for and yields 1.
pub fn documents_growth_factor(base: f64, target: f64, len: usize) -> f64 {
    if len <= 1 {
        return 1.0;
    }
    (target / base).powf(1.0 / (len - 1) as f64)
}

/// Documents per month, coupled sub-linearly to the number of sources.
///
/// `base * g^i * (sources[i] / sources[0])^exponent`, never below `base`.
///
/// Fails with [`PlannerError::ValidationError`] when the coupling term is not
/// finite, e.g. for non-positive sources.
pub fn project_documents(
    sources: &[f64],
    base: f64,
    model: &DocumentModel,
) -> Result<Vec<f64>, PlannerError> {
    let Some(&first_sources) = sources.first() else {
        return Ok(Vec::new());
    };
    let growth_factor = documents_growth_factor(base, model.target_monthly, sources.len());
    tracing::debug!(growth_factor, "documents growth factor");

    sources
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let coupling = (s / first_sources).powf(model.coupling_exponent);
            if !coupling.is_finite() {
                return Err(PlannerError::ValidationError(format!(
                    "documents: source coupling is not finite at month {i} (sources {s})"
                )));
            }
            Ok((base * growth_factor.powf(i as f64) * coupling).max(base))
        })
        .collect()
}

/// Concurrent sessions: compounding trend times seasonality, floor-clipped.
pub fn project_sessions(len: usize, base: f64, model: &SessionModel) -> Vec<f64> {
    let floor = base * model.floor_fraction;
    compounding_series(len, base, model.monthly_rate)
        .into_iter()
        .zip(seasonal_multiplier(
            len,
            model.seasonal_period_months,
            &model.harmonics,
        ))
        .map(|(trend, season)| (trend * season).max(floor))
        .collect()
}
