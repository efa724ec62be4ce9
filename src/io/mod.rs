/// Hourly profile CSV export.
pub mod export;
