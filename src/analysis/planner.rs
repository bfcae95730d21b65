use crate::analysis::{
    derive_kpis, derive_resources, project_planning_units, run_forecast, Forecast, KpiSeries,
    PlanningUnits, ResourceSeries,
};
use crate::error::PlannerError;
use crate::models::{Scenario, TimeAxis};

/// Unified API over the forecasting stages of a single scenario.
///
/// Each stage can be run on its own; [`Planner::forecast`] runs them all.
pub struct Planner<'a> {
    scenario: &'a Scenario,
}

impl<'a> Planner<'a> {
    /// Create a new Planner for the given scenario.
    pub fn new(scenario: &'a Scenario) -> Self {
        Self { scenario }
    }

    pub fn scenario(&self) -> &Scenario {
        self.scenario
    }

    /// Month axis of the scenario horizon.
    pub fn time_axis(&self) -> Result<TimeAxis, PlannerError> {
        TimeAxis::from_horizon(&self.scenario.horizon)
    }

    /// Planning-unit projections only.
    pub fn planning_units(&self) -> Result<PlanningUnits, PlannerError> {
        self.scenario.validate()?;
        let axis = self.time_axis()?;
        project_planning_units(self.scenario, axis.len())
    }

    /// Resource series and KPIs for already projected units.
    pub fn resources(
        &self,
        units: &PlanningUnits,
    ) -> Result<(ResourceSeries, KpiSeries), PlannerError> {
        let resources = derive_resources(self.scenario, units)?;
        let kpis = derive_kpis(self.scenario, &resources);
        Ok((resources, kpis))
    }

    /// Full forecast: axis, units, resources and KPIs.
    pub fn forecast(&self) -> Result<Forecast, PlannerError> {
        run_forecast(self.scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Variant;

    #[test]
    fn test_planner_stages_match_forecast() {
        let scenario = Scenario::default();
        let planner = Planner::new(&scenario);
        let units = planner.planning_units().unwrap();
        let (resources, kpis) = planner.resources(&units).unwrap();
        let forecast = planner.forecast().unwrap();
        assert_eq!(forecast.units, units);
        assert_eq!(forecast.resources, resources);
        assert_eq!(forecast.kpis, kpis);
    }

    #[test]
    fn test_planner_time_axis() {
        let scenario = Scenario::default();
        let axis = Planner::new(&scenario).time_axis().unwrap();
        assert_eq!(axis.len(), 25);
    }

    #[test]
    fn test_side_by_side_scenarios() {
        let extended = Scenario::default();
        let reduced = Scenario::for_variant(Variant::Reduced);
        let a = Planner::new(&extended).forecast().unwrap();
        let b = Planner::new(&reduced).forecast().unwrap();
        assert_eq!(a.units.sources, b.units.sources);
        assert!(a.units.sessions.is_some());
        assert!(b.units.sessions.is_none());
        assert_ne!(a.resources.compute_raw, b.resources.compute_raw);
    }

    #[test]
    fn test_planner_rejects_invalid_scenario() {
        let mut scenario = Scenario::default();
        scenario.baselines.technology = -1.0;
        let planner = Planner::new(&scenario);
        assert!(planner.planning_units().is_err());
        assert!(planner.forecast().is_err());
    }
}
