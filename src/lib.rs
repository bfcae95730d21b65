//! Capacity planning simulator.
//!
//! Projects planning units (sources, documents, technology, initiatives,
//! sessions) over a monthly horizon and derives compute, storage, network,
//! memory and accelerator consumption plus latency and alert-delay KPIs.
//!
//! ```
//! use capacity_planner::{run_forecast, Scenario};
//!
//! let forecast = run_forecast(&Scenario::default()).unwrap();
//! assert_eq!(forecast.len(), 25);
//! ```

pub mod analysis;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

#[cfg(feature = "web")]
pub mod web;

pub use analysis::{run_forecast, Forecast, MonthlyRow, Planner};
pub use error::PlannerError;
pub use io::{ForecastWriter, ScenarioReader};
pub use models::{ActiveUnits, Scenario, TimeAxis, Variant};
