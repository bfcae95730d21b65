use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::models::{KpiModels, ResourceModel, Scenario};

use super::normalize::{kpi_from_saturation, min_max_normalize, saturation};
use super::planning::PlanningUnits;

/// Resource consumption implied by the planning units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSeries {
    /// Unweighted compute load before normalisation
    pub compute_raw: Vec<f64>,
    /// Compute utilisation, always inside the saturation band
    pub compute_saturation: Vec<f64>,
    pub compute_hours: Vec<f64>,
    pub storage_gb: Vec<f64>,
    pub network_gb: Vec<f64>,
    pub memory_gb: Vec<f64>,
    pub accelerator_hours: Option<Vec<f64>>,
}

/// Service KPIs driven by compute saturation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSeries {
    pub latency_seconds: Vec<f64>,
    pub alert_delay_seconds: Vec<f64>,
}

/// Value of an optional unit at month `i`, zero when the unit is inactive.
fn optional_at(series: &Option<Vec<f64>>, i: usize) -> f64 {
    series.as_ref().map_or(0.0, |s| s[i])
}

/// Raw compute load: scraping + indexing + analytics + sessions.
pub fn compute_load(units: &PlanningUnits, model: &ResourceModel) -> Vec<f64> {
    let c = &model.compute;
    (0..units.len())
        .map(|i| {
            let scraping = c.scraping.apply(units.sources[i]);
            let indexing = c.indexing.apply(units.documents_per_month[i]);
            let analytics = c.analytics_technology.apply(units.technology[i])
                + c.analytics_initiatives
                    .apply(optional_at(&units.initiatives, i));
            let sessions = c.sessions.apply(optional_at(&units.sessions, i));
            scraping + indexing + analytics + sessions
        })
        .collect()
}

/// Derive every resource series for the scenario.
///
/// Normalisation constants (compute load range, cumulative document range)
/// are taken once over the whole horizon of this run.
pub fn derive_resources(
    scenario: &Scenario,
    units: &PlanningUnits,
) -> Result<ResourceSeries, PlannerError> {
    let model = &scenario.resources;
    let band = model.compute.saturation;

    let compute_raw = compute_load(units, model);
    let compute_saturation = saturation(&compute_raw, band, "compute load")?;
    let compute_hours = compute_saturation
        .iter()
        .map(|s| s * model.compute.capacity_hours)
        .collect();

    let storage_gb = (0..units.len())
        .map(|i| {
            let documents = units.documents_cumulative[i] * model.document_size_gb;
            let indexes = model.storage.technology_index.apply(units.technology[i])
                + model
                    .storage
                    .initiatives_index
                    .apply(optional_at(&units.initiatives, i));
            model.storage.base_gb + documents + indexes
        })
        .collect();

    let network_gb = (0..units.len())
        .map(|i| {
            let transfer = units.documents_per_month[i] * model.document_size_gb;
            let polling = model.network.polling.apply(units.sources[i]);
            let sessions = model.network.sessions.apply(optional_at(&units.sessions, i));
            transfer + polling + sessions
        })
        .collect();

    let stored_ratio = min_max_normalize(&units.documents_cumulative, "cumulative documents")?;
    let session_baseline = scenario.baselines.sessions;
    let memory_gb = stored_ratio
        .iter()
        .enumerate()
        .map(|(i, ratio)| {
            let sessions = match &units.sessions {
                Some(s) => model.memory.sessions_weight * (s[i] / session_baseline),
                None => 0.0,
            };
            model.memory.base_gb + ratio * model.memory.range_gb + sessions
        })
        .collect();

    let accelerator_hours = scenario.units.accelerator.then(|| {
        (0..units.len())
            .map(|i| {
                model
                    .accelerator
                    .dashboards
                    .apply(optional_at(&units.initiatives, i))
                    + model.accelerator.modeling.apply(units.technology[i])
            })
            .collect()
    });

    Ok(ResourceSeries {
        compute_raw,
        compute_saturation,
        compute_hours,
        storage_gb,
        network_gb,
        memory_gb,
        accelerator_hours,
    })
}

/// Latency and alert delay for every month of compute saturation.
pub fn derive_kpis(scenario: &Scenario, resources: &ResourceSeries) -> KpiSeries {
    let band = scenario.resources.compute.saturation;
    let KpiModels { latency, alerts } = &scenario.kpis;
    KpiSeries {
        latency_seconds: resources
            .compute_saturation
            .iter()
            .map(|s| kpi_from_saturation(*s, band, latency))
            .collect(),
        alert_delay_seconds: resources
            .compute_saturation
            .iter()
            .map(|s| kpi_from_saturation(*s, band, alerts))
            .collect(),
    }
}
