use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{Forecast, MonthlyRow};
use crate::error::PlannerError;
use crate::models::Scenario;

/// JSON document written for a forecast: scenario name plus the monthly table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDocument {
    pub scenario: String,
    pub months: usize,
    pub rows: Vec<MonthlyRow>,
}

impl ForecastDocument {
    pub fn new(forecast: &Forecast) -> Self {
        Self {
            scenario: forecast.scenario_name.clone(),
            months: forecast.len(),
            rows: forecast.rows(),
        }
    }
}

/// Serialize a forecast document, optionally pretty-printed.
pub fn forecast_json_string(doc: &ForecastDocument, pretty: bool) -> Result<String, PlannerError> {
    Ok(if pretty {
        serde_json::to_string_pretty(doc)?
    } else {
        serde_json::to_string(doc)?
    })
}

/// Write a forecast document to a JSON file.
pub fn write_forecast_json(
    doc: &ForecastDocument,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), PlannerError> {
    std::fs::write(path.as_ref(), forecast_json_string(doc, pretty)?)?;
    Ok(())
}

/// Read a scenario from a JSON file. Missing fields take their defaults.
pub fn read_scenario_json(path: impl AsRef<Path>) -> Result<Scenario, PlannerError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    scenario_from_json_bytes(content.as_bytes())
}

/// Parse a scenario from JSON bytes.
pub fn scenario_from_json_bytes(data: &[u8]) -> Result<Scenario, PlannerError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| PlannerError::ParseError(format!("Invalid UTF-8: {e}")))?;
    Ok(serde_json::from_str(content)?)
}
