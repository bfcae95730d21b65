use actix_web::{http::StatusCode, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::analysis::run_forecast;
use crate::error::PlannerError;
use crate::io::{forecast_csv_bytes, forecast_excel_bytes, forecast_json_string, ForecastDocument};
use crate::models::Scenario;
use crate::visualization::{render_dashboard, SvgDashboard};

// ---------------------------------------------------------------------------
// Error wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    details: String,
}

#[derive(Debug)]
pub(crate) struct WebError(PlannerError);

impl From<PlannerError> for WebError {
    fn from(e: PlannerError) -> Self {
        WebError(e)
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            PlannerError::DegenerateSeries(_) => StatusCode::UNPROCESSABLE_ENTITY,
            e if e.is_configuration_error() => StatusCode::BAD_REQUEST,
            PlannerError::ParseError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody {
            error: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            details: self.0.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sanitize a scenario name for use in Content-Disposition headers.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "forecast".to_string()
    } else {
        cleaned
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub async fn default_scenario() -> HttpResponse {
    HttpResponse::Ok().json(Scenario::default())
}

pub async fn forecast(body: web::Json<Scenario>) -> Result<HttpResponse, WebError> {
    let forecast = run_forecast(&body)?;
    Ok(HttpResponse::Ok().json(ForecastDocument::new(&forecast)))
}

pub async fn export(
    query: web::Query<ExportQuery>,
    body: web::Json<Scenario>,
) -> Result<HttpResponse, WebError> {
    let forecast = run_forecast(&body)?;
    let safe_name = sanitize_filename(&forecast.scenario_name);
    let format = query.format.as_deref().unwrap_or("csv").to_lowercase();

    match format.as_str() {
        "csv" => Ok(HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{safe_name}.csv\""),
            ))
            .body(forecast_csv_bytes(&forecast.rows())?)),
        "json" => Ok(HttpResponse::Ok()
            .content_type("application/json")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{safe_name}.json\""),
            ))
            .body(forecast_json_string(&ForecastDocument::new(&forecast), true)?)),
        "xlsx" => Ok(HttpResponse::Ok()
            .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{safe_name}.xlsx\""),
            ))
            .body(forecast_excel_bytes(&forecast.rows())?)),
        other => Err(PlannerError::ParseError(format!(
            "Unsupported export format '{other}'. Use csv, json, or xlsx"
        ))
        .into()),
    }
}

pub async fn dashboard_svg(body: web::Json<Scenario>) -> Result<HttpResponse, WebError> {
    let mut scenario = body.into_inner();
    // never touch the server filesystem on behalf of a client
    scenario.presentation.logo_path = None;

    let forecast = run_forecast(&scenario)?;
    let mut renderer = SvgDashboard::new(&scenario.presentation);
    let svg = render_dashboard(&mut renderer, &forecast, &scenario.presentation)?;
    Ok(HttpResponse::Ok()
        .content_type("image/svg+xml; charset=utf-8")
        .body(svg))
}
