//! Reduced variant example: compare the three-unit and five-unit scenarios.
//!
//! Run from the project root:
//!   cargo run --example reduced_variant

use capacity_planner::analysis::run_forecast;
use capacity_planner::models::{Scenario, Variant};

fn main() {
    println!("{:<10} {:>12} {:>12} {:>10} {:>10}", "Variant", "Compute h", "Storage GB", "Memory", "Latency");
    println!("{}", "-".repeat(58));

    for variant in [Variant::Extended, Variant::Reduced] {
        let scenario = Scenario::for_variant(variant);
        let forecast = run_forecast(&scenario).expect("Forecast failed");
        let last = forecast.rows().pop().expect("Empty forecast");

        println!(
            "{:<10} {:>12.1} {:>12.1} {:>10.2} {:>10.2}",
            variant.to_string(),
            last.compute_hours,
            last.storage_gb,
            last.memory_gb,
            last.latency_seconds
        );
    }

    // compute hours span the same band in both variants
    let extended = run_forecast(&Scenario::for_variant(Variant::Extended)).expect("Forecast failed");
    let reduced = run_forecast(&Scenario::for_variant(Variant::Reduced)).expect("Forecast failed");
    let ext_net: f64 = extended.resources.network_gb.iter().sum();
    let red_net: f64 = reduced.resources.network_gb.iter().sum();
    println!("\nTotal bandwidth over the horizon: extended {ext_net:.1} GB, reduced {red_net:.1} GB");
}
