use thiserror::Error;

/// Errors that can occur while building or reporting a capacity forecast.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid horizon: {0}")]
    InvalidHorizon(String),

    #[error("Degenerate series: {0}")]
    DegenerateSeries(String),

    #[error("Invalid step event: {0}")]
    InvalidStepEvent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<rust_xlsxwriter::XlsxError> for PlannerError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        PlannerError::Excel(e.to_string())
    }
}

impl PlannerError {
    /// True for errors caused by the scenario itself rather than by I/O.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            PlannerError::InvalidHorizon(_)
                | PlannerError::DegenerateSeries(_)
                | PlannerError::InvalidStepEvent(_)
                | PlannerError::ValidationError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = PlannerError::from(io_err);
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_fmt_error_converts() {
        let err = PlannerError::from(std::fmt::Error);
        assert!(err.to_string().starts_with("Formatting error"));
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_invalid_horizon_display() {
        let err = PlannerError::InvalidHorizon("horizon must be positive, got 0".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid horizon: horizon must be positive, got 0"
        );
    }

    #[test]
    fn test_degenerate_series_display() {
        let err = PlannerError::DegenerateSeries("compute load is flat".to_string());
        assert_eq!(err.to_string(), "Degenerate series: compute load is flat");
    }

    #[test]
    fn test_invalid_step_event_display() {
        let err = PlannerError::InvalidStepEvent("offset -1".to_string());
        assert_eq!(err.to_string(), "Invalid step event: offset -1");
    }

    #[test]
    fn test_excel_error_display() {
        let err = PlannerError::Excel("bad sheet".to_string());
        assert_eq!(err.to_string(), "Excel error: bad sheet");
    }

    #[test]
    fn test_validation_error_display() {
        let err = PlannerError::ValidationError("capacity must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: capacity must be positive"
        );
    }

    #[test]
    fn test_json_error_from_conversion() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("not valid json{{{");
        let json_err = result.unwrap_err();
        let err: PlannerError = json_err.into();
        assert!(matches!(err, PlannerError::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_toml_error_from_conversion() {
        let result: Result<toml::Value, _> = toml::from_str("horizon = [unclosed");
        let err: PlannerError = result.unwrap_err().into();
        assert!(matches!(err, PlannerError::TomlParse(_)));
    }

    #[test]
    fn test_configuration_error_classification() {
        assert!(PlannerError::InvalidHorizon("x".into()).is_configuration_error());
        assert!(PlannerError::DegenerateSeries("x".into()).is_configuration_error());
        assert!(PlannerError::InvalidStepEvent("x".into()).is_configuration_error());
        assert!(!PlannerError::Excel("x".into()).is_configuration_error());
    }

    #[test]
    fn test_error_is_debug() {
        let err = PlannerError::ParseError("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("ParseError"));
    }
}
