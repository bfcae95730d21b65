use std::path::Path;

use crate::error::PlannerError;
use crate::models::Scenario;

use super::json_io::read_scenario_json;

/// Read a scenario from a TOML file. Missing sections take their defaults.
pub fn read_scenario_toml(path: impl AsRef<Path>) -> Result<Scenario, PlannerError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(toml::from_str(&content)?)
}

/// Write a scenario as TOML, e.g. to seed a config file from the built-in defaults.
pub fn write_scenario_toml(scenario: &Scenario, path: impl AsRef<Path>) -> Result<(), PlannerError> {
    std::fs::write(path.as_ref(), scenario_toml_string(scenario)?)?;
    Ok(())
}

pub fn scenario_toml_string(scenario: &Scenario) -> Result<String, PlannerError> {
    Ok(toml::to_string_pretty(scenario)?)
}

/// Read a scenario file, picking the format from the extension (`.toml` or `.json`).
pub fn read_scenario(path: impl AsRef<Path>) -> Result<Scenario, PlannerError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let scenario = match extension.as_str() {
        "toml" => read_scenario_toml(path)?,
        "json" => read_scenario_json(path)?,
        other => {
            return Err(PlannerError::ParseError(format!(
                "Unsupported scenario format '{other}' for {} (expected .toml or .json)",
                path.display()
            )))
        }
    };
    tracing::debug!(path = %path.display(), scenario = %scenario.name, "loaded scenario");
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Variant;

    #[test]
    fn test_toml_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        let scenario = Scenario::for_variant(Variant::Reduced);
        write_scenario_toml(&scenario, &path).unwrap();
        let loaded = read_scenario(&path).unwrap();
        assert_eq!(loaded, scenario);
        assert_eq!(loaded.variant(), Some(Variant::Reduced));
    }

    #[test]
    fn test_read_scenario_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("a.TOML");
        std::fs::write(&toml_path, "name = \"upper\"\n").unwrap();
        assert_eq!(read_scenario(&toml_path).unwrap().name, "upper");

        let json_path = dir.path().join("b.json");
        std::fs::write(&json_path, r#"{"name": "json"}"#).unwrap();
        assert_eq!(read_scenario(&json_path).unwrap().name, "json");
    }

    #[test]
    fn test_read_scenario_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.yaml");
        std::fs::write(&path, "name: x").unwrap();
        let err = read_scenario(&path).unwrap_err();
        assert!(matches!(err, PlannerError::ParseError(_)));
        assert!(err.to_string().contains("yaml"));
    }

    #[test]
    fn test_read_scenario_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[horizon\nmonths = ").unwrap();
        assert!(matches!(
            read_scenario(&path).unwrap_err(),
            PlannerError::TomlParse(_)
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_scenario("/nonexistent/scenario.toml").unwrap_err();
        assert!(matches!(err, PlannerError::Io(_)));
    }
}
