//! Forecast report example: run the default scenario and print every table.
//!
//! Run from the project root:
//!   cargo run --example forecast_report

use capacity_planner::analysis::Planner;
use capacity_planner::models::Scenario;
use capacity_planner::visualization::{
    dashboard_charts, print_checkpoint_table, print_daily_rates_table, print_forecast_table,
    print_scenario_summary, render_dashboard, TextDashboard,
};

fn main() {
    let scenario = Scenario::default();
    let planner = Planner::new(&scenario);

    let axis = planner.time_axis().expect("Invalid horizon");
    println!(
        "Planning '{}' over {} months",
        scenario.name,
        axis.len()
    );

    let forecast = planner.forecast().expect("Forecast failed");
    let rows = forecast.rows();

    print_scenario_summary(&scenario, &forecast);
    print_forecast_table(&rows);
    print_daily_rates_table(&rows);
    print_checkpoint_table(&dashboard_charts(&forecast, &scenario.presentation));

    // Terminal dashboard
    let mut renderer = TextDashboard::new(&scenario.presentation);
    match render_dashboard(&mut renderer, &forecast, &scenario.presentation) {
        Ok(text) => print!("{text}"),
        Err(e) => eprintln!("Dashboard failed: {e}"),
    }
}
