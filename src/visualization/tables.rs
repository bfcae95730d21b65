use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{Forecast, MonthlyRow};
use crate::models::Scenario;

use super::dashboard::{format_value, format_with_auto_precision, ChartSpec};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn opt_cell(value: Option<f64>) -> Cell {
    Cell::new(value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string()))
}

/// Format the monthly forecast table as a string.
///
/// Columns of planning units that are inactive in every row are left out.
pub fn format_forecast_table(rows: &[MonthlyRow]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Monthly Forecast".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let has_initiatives = rows.iter().any(|r| r.initiatives.is_some());
    let has_sessions = rows.iter().any(|r| r.sessions.is_some());

    let mut header = vec!["Month", "Sources", "Docs/month", "Technology"];
    if has_initiatives {
        header.push("Initiatives");
    }
    if has_sessions {
        header.push("Sessions");
    }
    header.extend(["Compute (h)", "Storage (GB)", "Network (GB)", "Memory (GB)", "Latency (s)"]);

    let mut table = new_table();
    table.set_header(header);

    for row in rows {
        let mut cells = vec![
            Cell::new(&row.month),
            Cell::new(format!("{:.2}", row.sources)),
            Cell::new(format!("{:.2}", row.documents_per_month)),
            Cell::new(format!("{:.2}", row.technology)),
        ];
        if has_initiatives {
            cells.push(opt_cell(row.initiatives));
        }
        if has_sessions {
            cells.push(opt_cell(row.sessions));
        }
        cells.extend([
            Cell::new(format!("{:.2}", row.compute_hours)),
            Cell::new(format!("{:.2}", row.storage_gb)),
            Cell::new(format!("{:.2}", row.network_gb)),
            Cell::new(format!("{:.2}", row.memory_gb)),
            Cell::new(format!("{:.2}", row.latency_seconds)),
        ]);
        table.add_row(cells);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the monthly forecast table.
pub fn print_forecast_table(rows: &[MonthlyRow]) {
    print!("{}", format_forecast_table(rows));
}

/// Format per-day rates (value divided by the days of each month).
pub fn format_daily_rates_table(rows: &[MonthlyRow]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Daily Rates".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = new_table();
    table.set_header(vec![
        "Month",
        "Days",
        "Docs/day",
        "Compute (h/day)",
        "Network (GB/day)",
        "Alert delay (s)",
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.month),
            Cell::new(row.days_in_month),
            Cell::new(format!("{:.1}", row.documents_per_day)),
            Cell::new(format!("{:.2}", row.compute_hours_per_day)),
            Cell::new(format!("{:.3}", row.network_gb_per_day)),
            Cell::new(format!("{:.1}", row.alert_delay_seconds)),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the daily rates table.
pub fn print_daily_rates_table(rows: &[MonthlyRow]) {
    print!("{}", format_daily_rates_table(rows));
}

/// Format the checkpoint comparison: each chart's value at the first and last
/// checkpoint plus the change between them.
pub fn format_checkpoint_table(charts: &[ChartSpec]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Checkpoints".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = new_table();
    table.set_header(vec!["Series", "Start", "Checkpoint A", "Checkpoint B", "Change A→B"]);

    for chart in charts {
        let points = chart.checkpoint_values();
        let (Some(&(month_a, a)), Some(&(month_b, b))) = (points.first(), points.last()) else {
            continue;
        };
        let formatted = format_with_auto_precision(&[a, b]);
        let change = if a != 0.0 {
            format!("{:+.1}%", (b - a) / a.abs() * 100.0)
        } else {
            "n/a".to_string()
        };
        table.add_row(vec![
            Cell::new(&chart.title),
            Cell::new(
                chart
                    .values
                    .first()
                    .map(|v| format_value(*v, 1))
                    .unwrap_or_default(),
            ),
            Cell::new(format!("{month_a}m: {}", formatted[0])),
            Cell::new(format!("{month_b}m: {}", formatted[1])),
            Cell::new(change),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the checkpoint comparison table.
pub fn print_checkpoint_table(charts: &[ChartSpec]) {
    print!("{}", format_checkpoint_table(charts));
}

/// Format a summary of the scenario behind a forecast.
pub fn format_scenario_summary(scenario: &Scenario, forecast: &Forecast) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Scenario Summary".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let labels = forecast.axis.labels();
    let span = match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => format!("{first} to {last}"),
        _ => "-".to_string(),
    };
    let mut units = vec!["sources", "documents", "technology"];
    if scenario.units.initiatives {
        units.push("initiatives");
    }
    if scenario.units.sessions {
        units.push("sessions");
    }
    let band = scenario.resources.compute.saturation;

    let mut table = new_table();
    table.set_header(vec!["Setting", "Value"]);
    table.add_row(vec![Cell::new("Scenario"), Cell::new(&scenario.name)]);
    table.add_row(vec![
        Cell::new("Horizon"),
        Cell::new(format!("{span} ({} months)", forecast.len())),
    ]);
    table.add_row(vec![Cell::new("Planning units"), Cell::new(units.join(", "))]);
    table.add_row(vec![
        Cell::new("Compute capacity"),
        Cell::new(format!("{:.0} h/month", scenario.resources.compute.capacity_hours)),
    ]);
    table.add_row(vec![
        Cell::new("Saturation band"),
        Cell::new(format!("{:.0}% - {:.0}%", band.low * 100.0, band.high * 100.0)),
    ]);
    table.add_row(vec![
        Cell::new("Documents target"),
        Cell::new(format!("{:.0}/month", scenario.documents.target_monthly)),
    ]);

    output.push_str(&format!("{table}"));
    output
}

/// Print the scenario summary.
pub fn print_scenario_summary(scenario: &Scenario, forecast: &Forecast) {
    print!("{}", format_scenario_summary(scenario, forecast));
}
