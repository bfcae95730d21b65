use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use capacity_planner::{
    io::write_scenario_toml,
    models::{Horizon, Scenario, Variant},
};

/// Write a short scenario file into the given directory.
fn create_test_scenario(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("scenario.toml");
    let scenario = Scenario {
        name: "CLI Test".to_string(),
        horizon: Horizon {
            anchor: "2026-01".to_string(),
            months: 13,
        },
        ..Scenario::default()
    };
    write_scenario_toml(&scenario, &path).unwrap();
    path
}

fn cmd() -> Command {
    Command::cargo_bin("capacity-planner").unwrap()
}

// --- Forecast subcommand ---

#[test]
fn test_forecast_defaults() {
    cmd()
        .arg("forecast")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Forecast"))
        .stdout(predicate::str::contains("2025-12"))
        .stdout(predicate::str::contains("2027-12"))
        .stdout(predicate::str::contains("Sessions"));
}

#[test]
fn test_forecast_reduced_variant() {
    cmd()
        .args(["forecast", "--variant", "reduced"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Monthly Forecast"))
        .stdout(predicate::str::contains("Initiatives").not());
}

#[test]
fn test_forecast_from_scenario_file() {
    let dir = TempDir::new().unwrap();
    let path = create_test_scenario(&dir);

    cmd()
        .args(["forecast", "--scenario", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("CLI Test"))
        .stdout(predicate::str::contains("2026-01 to 2027-01 (13 months)"));
}

#[test]
fn test_forecast_daily_and_checkpoints() {
    cmd()
        .args(["forecast", "--daily", "--checkpoints"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily Rates"))
        .stdout(predicate::str::contains("Checkpoints"))
        .stdout(predicate::str::contains("12m:"));
}

#[test]
fn test_forecast_unknown_variant() {
    cmd()
        .args(["forecast", "--variant", "huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown scenario variant"));
}

#[test]
fn test_forecast_missing_scenario_file() {
    cmd()
        .args(["forecast", "--scenario", "/nonexistent/scenario.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load scenario"));
}

#[test]
fn test_forecast_invalid_horizon() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[horizon]\nanchor = \"2025-12\"\nmonths = 0\n").unwrap();

    cmd()
        .args(["forecast", "--scenario", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid horizon"));
}

#[test]
fn test_forecast_single_month_is_degenerate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("short.toml");
    std::fs::write(&path, "[horizon]\nanchor = \"2025-12\"\nmonths = 1\n").unwrap();

    cmd()
        .args(["forecast", "--scenario", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Degenerate series"));
}

// --- Dashboard subcommand ---

#[test]
fn test_dashboard_terminal() {
    cmd()
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Monitored sources"))
        .stdout(predicate::str::contains("24m:"));
}

#[test]
fn test_dashboard_svg_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dashboard.svg");

    cmd()
        .args(["dashboard", "--svg", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dashboard written"));

    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("CAPACITY"));
}

// --- Export subcommand ---

#[test]
fn test_export_csv() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("forecast.csv");

    cmd()
        .args(["export", "--output", out.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 25 months"));

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 26);
}

#[test]
fn test_export_json_pretty() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("forecast.json");

    cmd()
        .args(["export", "--output", out.to_str().unwrap(), "--pretty"])
        .assert()
        .success();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.contains("\n  \"scenario\""));
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["rows"].as_array().unwrap().len(), 25);
}

#[test]
fn test_export_xlsx() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("forecast.xlsx");

    cmd()
        .args(["export", "--output", out.to_str().unwrap(), "--variant", "reduced"])
        .assert()
        .success();

    assert!(out.exists());
}

#[test]
fn test_export_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("forecast.parquet");

    cmd()
        .args(["export", "--output", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported output format"));
}

// --- Scenario subcommand ---

#[test]
fn test_scenario_prints_toml() {
    cmd()
        .arg("scenario")
        .assert()
        .success()
        .stdout(predicate::str::contains("[horizon]"))
        .stdout(predicate::str::contains("anchor = \"2025-12\""));
}

#[test]
fn test_scenario_written_file_loads_back() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("reduced.toml");

    cmd()
        .args(["scenario", "--variant", "reduced", "--output", out.to_str().unwrap()])
        .assert()
        .success();

    let scenario = capacity_planner::io::read_scenario(&out).unwrap();
    assert_eq!(scenario.variant(), Some(Variant::Reduced));
}

// --- General ---

#[test]
fn test_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("forecast"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_no_subcommand() {
    cmd().assert().failure();
}
