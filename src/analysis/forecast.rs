use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::{days_in_month, month_label, Scenario, TimeAxis};

use super::planning::{project_planning_units, PlanningUnits};
use super::resources::{derive_kpis, derive_resources, KpiSeries, ResourceSeries};

/// Complete result of one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub scenario_name: String,
    pub axis: TimeAxis,
    pub units: PlanningUnits,
    pub resources: ResourceSeries,
    pub kpis: KpiSeries,
}

/// One month of the forecast table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    /// `YYYY-MM`
    pub month: String,
    pub days_in_month: u32,
    pub sources: f64,
    pub documents_per_month: f64,
    pub documents_cumulative: f64,
    pub technology: f64,
    pub initiatives: Option<f64>,
    pub sessions: Option<f64>,
    pub compute_hours: f64,
    pub compute_saturation: f64,
    pub storage_gb: f64,
    pub network_gb: f64,
    pub memory_gb: f64,
    pub accelerator_hours: Option<f64>,
    pub latency_seconds: f64,
    pub alert_delay_seconds: f64,
    pub documents_per_day: f64,
    pub compute_hours_per_day: f64,
    pub network_gb_per_day: f64,
}

/// Validate the scenario and compute its forecast.
///
/// The run is a pure function of the scenario: the same scenario always
/// yields the same forecast.
pub fn run_forecast(scenario: &Scenario) -> Result<Forecast, PlannerError> {
    scenario.validate()?;
    let axis = TimeAxis::from_horizon(&scenario.horizon)?;
    let units = project_planning_units(scenario, axis.len())?;
    let resources = derive_resources(scenario, &units)?;
    let kpis = derive_kpis(scenario, &resources);

    tracing::info!(
        scenario = %scenario.name,
        months = axis.len(),
        units = scenario.units.unit_count(),
        "forecast computed"
    );

    Ok(Forecast {
        scenario_name: scenario.name.clone(),
        axis,
        units,
        resources,
        kpis,
    })
}

impl Forecast {
    pub fn len(&self) -> usize {
        self.axis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axis.is_empty()
    }

    /// Build the monthly table, per-day rates included.
    pub fn rows(&self) -> Vec<MonthlyRow> {
        let at = |s: &Option<Vec<f64>>, i: usize| s.as_ref().map(|v| v[i]);
        self.axis
            .months()
            .iter()
            .enumerate()
            .map(|(i, month)| {
                let days = days_in_month(*month);
                let per_day = |v: f64| v / f64::from(days);
                MonthlyRow {
                    month: month_label(*month),
                    days_in_month: days,
                    sources: self.units.sources[i],
                    documents_per_month: self.units.documents_per_month[i],
                    documents_cumulative: self.units.documents_cumulative[i],
                    technology: self.units.technology[i],
                    initiatives: at(&self.units.initiatives, i),
                    sessions: at(&self.units.sessions, i),
                    compute_hours: self.resources.compute_hours[i],
                    compute_saturation: self.resources.compute_saturation[i],
                    storage_gb: self.resources.storage_gb[i],
                    network_gb: self.resources.network_gb[i],
                    memory_gb: self.resources.memory_gb[i],
                    accelerator_hours: at(&self.resources.accelerator_hours, i),
                    latency_seconds: self.kpis.latency_seconds[i],
                    alert_delay_seconds: self.kpis.alert_delay_seconds[i],
                    documents_per_day: per_day(self.units.documents_per_month[i]),
                    compute_hours_per_day: per_day(self.resources.compute_hours[i]),
                    network_gb_per_day: per_day(self.resources.network_gb[i]),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Variant;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_reference_forecast_shape() {
        let f = run_forecast(&Scenario::default()).unwrap();
        assert_eq!(f.len(), 25);
        let rows = f.rows();
        assert_eq!(rows.len(), 25);
        assert_eq!(rows[0].month, "2025-12");
        assert_eq!(rows[24].month, "2027-12");
    }

    #[test]
    fn test_per_day_rates() {
        let rows = run_forecast(&Scenario::default()).unwrap().rows();
        let dec = &rows[0];
        assert_eq!(dec.days_in_month, 31);
        assert_approx_eq!(dec.documents_per_day, 18_000.0 / 31.0);
        let feb = &rows[2];
        assert_eq!(feb.month, "2026-02");
        assert_eq!(feb.days_in_month, 28);
        assert_approx_eq!(feb.compute_hours_per_day, feb.compute_hours / 28.0);
        assert_approx_eq!(feb.network_gb_per_day, feb.network_gb / 28.0);
    }

    #[test]
    fn test_reduced_rows_leave_optional_columns_empty() {
        let rows = run_forecast(&Scenario::for_variant(Variant::Reduced))
            .unwrap()
            .rows();
        assert!(rows.iter().all(|r| r.initiatives.is_none()
            && r.sessions.is_none()
            && r.accelerator_hours.is_none()));
    }

    #[test]
    fn test_invalid_scenario_aborts() {
        let mut s = Scenario::default();
        s.horizon.months = 0;
        assert!(matches!(
            run_forecast(&s),
            Err(PlannerError::InvalidHorizon(_))
        ));
    }

    #[test]
    fn test_single_month_horizon_is_degenerate() {
        let mut s = Scenario::default();
        s.horizon.months = 1;
        assert!(matches!(
            run_forecast(&s),
            Err(PlannerError::DegenerateSeries(_))
        ));
    }

    #[test]
    fn test_idempotent() {
        let s = Scenario::default();
        let a = run_forecast(&s).unwrap().rows();
        let b = run_forecast(&s).unwrap().rows();
        assert_eq!(a, b);
    }
}
