/// Hour-by-hour generation, load, and battery exchange.
pub mod hourly;
pub mod kpi;
/// Normalized daily load templates.
pub mod profile;

pub use hourly::{
    HourlyEnergyProfile, HourlyRecord, calculate_hourly_energy, calculate_hourly_energy_with,
};
pub use kpi::DailyEnergySummary;
pub use profile::{LoadShape, ShapeKeywords};
