//! Solar backup-power sizing and cost engine.
//!
//! Turns an appliance list into discrete PV, battery, and inverter hardware,
//! projects seven years of ownership cost against a diesel generator,
//! simulates one day of hourly energy flows, and reviews the design.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
/// Factory parameter snapshot and its invariants.
pub mod constants;
pub mod error;
/// CAPEX, cost projection, landed cost, and loans.
pub mod finance;
pub mod io;
pub mod load;
pub mod optimality;
mod report;
pub mod runner;
/// Hourly energy simulation and its daily summary.
pub mod sim;
pub mod sizing;
pub mod telemetry;

pub use config::{ConfigError, ScenarioConfig};
pub use constants::Constants;
pub use error::Error;
pub use finance::{FinancialInputs, FinancialModel, calculate_financials};
pub use load::{LoadItem, Phase, UserType};
pub use optimality::{OptimalityWarning, Severity, check_optimality};
pub use runner::{CalculationResult, run_calculation};
pub use sim::{HourlyEnergyProfile, calculate_hourly_energy};
pub use sizing::{SystemSize, calculate_system_size};
