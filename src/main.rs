use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use capacity_planner::{
    analysis::run_forecast,
    io::{self, ForecastWriter},
    models::{ActiveUnits, Scenario, Variant},
    visualization::{
        dashboard_charts, print_checkpoint_table, print_daily_rates_table, print_forecast_table,
        print_scenario_summary, render_dashboard, SvgDashboard, TextDashboard,
    },
};

#[derive(Parser)]
#[command(
    name = "capacity-planner",
    about = "Capacity Planner - monthly growth and resource consumption forecasts",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a forecast and print the monthly table
    Forecast {
        /// Scenario file (TOML or JSON); built-in defaults when omitted
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Planning-unit variant: extended or reduced
        #[arg(short, long)]
        variant: Option<Variant>,

        /// Also print per-day rates
        #[arg(long)]
        daily: bool,

        /// Also print the checkpoint comparison
        #[arg(long)]
        checkpoints: bool,
    },

    /// Render the dashboard to the terminal or to an SVG file
    Dashboard {
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        #[arg(short, long)]
        variant: Option<Variant>,

        /// Write an SVG figure here instead of drawing in the terminal
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Export the monthly table (format from extension: csv, json, xlsx)
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long)]
        scenario: Option<PathBuf>,

        #[arg(short, long)]
        variant: Option<Variant>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print or write the default scenario as TOML
    Scenario {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long)]
        variant: Option<Variant>,
    },

    /// Start the HTTP API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

fn load_scenario(path: Option<&Path>, variant: Option<Variant>) -> Result<Scenario> {
    let mut scenario = match path {
        Some(path) => io::read_scenario(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => Scenario::default(),
    };
    if let Some(variant) = variant {
        scenario.units = ActiveUnits::for_variant(variant);
    }
    Ok(scenario)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast {
            scenario,
            variant,
            daily,
            checkpoints,
        } => {
            let scenario = load_scenario(scenario.as_deref(), variant)?;
            let forecast = run_forecast(&scenario)?;

            println!(
                "\n{}",
                format!("Capacity Forecast: {}", scenario.name).bold().cyan()
            );
            print_scenario_summary(&scenario, &forecast);

            let rows = forecast.rows();
            print_forecast_table(&rows);
            if daily {
                print_daily_rates_table(&rows);
            }
            if checkpoints {
                print_checkpoint_table(&dashboard_charts(&forecast, &scenario.presentation));
            }
            println!();
        }

        Commands::Dashboard {
            scenario,
            variant,
            svg,
        } => {
            let scenario = load_scenario(scenario.as_deref(), variant)?;
            let forecast = run_forecast(&scenario)?;

            match svg {
                Some(path) => {
                    let mut renderer = SvgDashboard::new(&scenario.presentation);
                    let figure = render_dashboard(&mut renderer, &forecast, &scenario.presentation)?;
                    std::fs::write(&path, figure)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!(
                        "{} Dashboard written to {}",
                        "Success:".green().bold(),
                        path.display()
                    );
                }
                None => {
                    let mut renderer = TextDashboard::new(&scenario.presentation);
                    print!(
                        "{}",
                        render_dashboard(&mut renderer, &forecast, &scenario.presentation)?
                    );
                }
            }
        }

        Commands::Export {
            output,
            scenario,
            variant,
            pretty,
        } => {
            let writer = io::writer_for_path(&output, pretty)?;
            let scenario = load_scenario(scenario.as_deref(), variant)?;
            let forecast = run_forecast(&scenario)?;
            writer.write(&forecast, &output)?;

            println!(
                "{} Exported {} months -> {}",
                "Success:".green().bold(),
                forecast.len(),
                output.display()
            );
        }

        Commands::Scenario { output, variant } => {
            let scenario = Scenario::for_variant(variant.unwrap_or(Variant::Extended));
            match output {
                Some(path) => {
                    io::write_scenario_toml(&scenario, &path)?;
                    println!(
                        "{} Scenario written to {}",
                        "Success:".green().bold(),
                        path.display()
                    );
                }
                None => print!("{}", io::scenario_toml_string(&scenario)?),
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(capacity_planner::web::start_server(port))?;
        }
    }

    Ok(())
}
