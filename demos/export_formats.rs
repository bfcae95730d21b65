//! Export example: write a scenario file and the forecast in every format.
//!
//! Run from the project root:
//!   cargo run --example export_formats

use std::path::Path;

use capacity_planner::analysis::run_forecast;
use capacity_planner::io::{
    read_scenario, write_scenario_toml, CsvFormat, ExcelFormat, ForecastWriter, JsonFormat,
};
use capacity_planner::models::Scenario;

fn main() {
    let out_dir = Path::new("out");
    std::fs::create_dir_all(out_dir).expect("Failed to create output directory");

    let scenario_path = out_dir.join("scenario.toml");
    write_scenario_toml(&Scenario::default(), &scenario_path).expect("Failed to write scenario");
    let scenario = read_scenario(&scenario_path).expect("Failed to read scenario back");

    let forecast = run_forecast(&scenario).expect("Forecast failed");

    let writers: [(&str, Box<dyn ForecastWriter>); 3] = [
        ("forecast.csv", Box::new(CsvFormat)),
        ("forecast.json", Box::new(JsonFormat { pretty: true })),
        ("forecast.xlsx", Box::new(ExcelFormat)),
    ];
    for (name, writer) in writers {
        let path = out_dir.join(name);
        writer.write(&forecast, &path).expect("Export failed");
        println!("Wrote {}", path.display());
    }
}
