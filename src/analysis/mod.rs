mod forecast;
mod growth;
mod normalize;
mod planner;
mod planning;
mod resources;

pub use forecast::{run_forecast, Forecast, MonthlyRow};
pub use growth::{
    build_stepped_series, compounding_series, cumulative_from, project_stepped,
    seasonal_multiplier,
};
pub use normalize::{kpi_from_saturation, map_into_band, min_max_normalize, saturation, series_range};
pub use planner::Planner;
pub use planning::{
    documents_growth_factor, project_documents, project_planning_units, project_sessions,
    PlanningUnits,
};
pub use resources::{compute_load, derive_kpis, derive_resources, KpiSeries, ResourceSeries};
