mod csv_io;
mod excel_io;
mod json_io;
mod scenario_io;

use std::path::Path;

use crate::analysis::Forecast;
use crate::error::PlannerError;
use crate::models::Scenario;

pub use csv_io::{forecast_csv_bytes, write_forecast_csv};
pub use excel_io::{forecast_excel_bytes, write_forecast_excel};
pub use json_io::{
    forecast_json_string, read_scenario_json, scenario_from_json_bytes, write_forecast_json,
    ForecastDocument,
};
pub use scenario_io::{read_scenario, read_scenario_toml, scenario_toml_string, write_scenario_toml};

/// Trait for writing a finished forecast to a file.
pub trait ForecastWriter {
    fn write(&self, forecast: &Forecast, path: &Path) -> Result<(), PlannerError>;
}

/// Trait for reading a scenario from a file.
pub trait ScenarioReader {
    fn read(&self, path: &Path) -> Result<Scenario, PlannerError>;
}

/// CSV export of the monthly table.
pub struct CsvFormat;

impl ForecastWriter for CsvFormat {
    fn write(&self, forecast: &Forecast, path: &Path) -> Result<(), PlannerError> {
        write_forecast_csv(&forecast.rows(), path)
    }
}

/// JSON export of the forecast document; also reads JSON scenarios.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl ForecastWriter for JsonFormat {
    fn write(&self, forecast: &Forecast, path: &Path) -> Result<(), PlannerError> {
        write_forecast_json(&ForecastDocument::new(forecast), path, self.pretty)
    }
}

impl ScenarioReader for JsonFormat {
    fn read(&self, path: &Path) -> Result<Scenario, PlannerError> {
        read_scenario_json(path)
    }
}

/// Excel (.xlsx) export of the monthly table.
pub struct ExcelFormat;

impl ForecastWriter for ExcelFormat {
    fn write(&self, forecast: &Forecast, path: &Path) -> Result<(), PlannerError> {
        write_forecast_excel(&forecast.rows(), path)
    }
}

/// TOML scenario files.
pub struct TomlFormat;

impl ScenarioReader for TomlFormat {
    fn read(&self, path: &Path) -> Result<Scenario, PlannerError> {
        read_scenario_toml(path)
    }
}

/// Pick a forecast writer from the output file extension.
pub fn writer_for_path(path: &Path, pretty: bool) -> Result<Box<dyn ForecastWriter>, PlannerError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => Ok(Box::new(CsvFormat)),
        "json" => Ok(Box::new(JsonFormat { pretty })),
        "xlsx" => Ok(Box::new(ExcelFormat)),
        other => Err(PlannerError::ParseError(format!(
            "Unsupported output format '{other}'. Use .csv, .json, or .xlsx"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_forecast;

    fn sample_forecast() -> Forecast {
        run_forecast(&Scenario::default()).unwrap()
    }

    #[test]
    fn test_csv_trait_write() {
        let forecast = sample_forecast();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.csv");

        let writer: &dyn ForecastWriter = &CsvFormat;
        writer.write(&forecast, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), forecast.len() + 1);
    }

    #[test]
    fn test_json_trait_write() {
        let forecast = sample_forecast();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.json");

        let writer: &dyn ForecastWriter = &JsonFormat { pretty: true };
        writer.write(&forecast, &path).unwrap();

        let doc: ForecastDocument =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc.scenario, forecast.scenario_name);
        assert_eq!(doc.rows.len(), 25);
    }

    #[test]
    fn test_scenario_reader_traits() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("s.toml");
        write_scenario_toml(&Scenario::default(), &toml_path).unwrap();
        let json_path = dir.path().join("s.json");
        std::fs::write(&json_path, serde_json::to_string(&Scenario::default()).unwrap()).unwrap();

        let readers: [(&dyn ScenarioReader, &Path); 2] =
            [(&TomlFormat, &toml_path), (&JsonFormat::default(), &json_path)];
        for (reader, path) in readers {
            assert_eq!(reader.read(path).unwrap(), Scenario::default());
        }
    }

    #[test]
    fn test_writer_for_path() {
        assert!(writer_for_path(Path::new("out.csv"), false).is_ok());
        assert!(writer_for_path(Path::new("out.JSON"), true).is_ok());
        assert!(writer_for_path(Path::new("out.xlsx"), false).is_ok());
        let err = writer_for_path(Path::new("out.parquet"), false).err().unwrap();
        assert!(err.to_string().contains("parquet"));
    }

    #[test]
    fn test_json_format_default() {
        let fmt = JsonFormat::default();
        assert!(!fmt.pretty);
    }
}
