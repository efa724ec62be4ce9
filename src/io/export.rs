//! CSV export for the simulated hourly profile.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::sim::HourlyRecord;

/// Column header of the hourly CSV export.
pub const HEADER: &str = "hour,solar_wh,load_wh,battery_state_pct,battery_flow_wh,\
                          grid_import_wh,grid_export_wh";

/// Exports hourly records to a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_csv(records: &[HourlyRecord], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes hourly records as CSV to any writer, one row per hour.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_csv(records: &[HourlyRecord], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in records {
        wtr.write_record(&[
            r.hour.clone(),
            r.solar.to_string(),
            r.load.to_string(),
            r.battery_state.to_string(),
            r.battery_flow.to_string(),
            r.grid_import.to_string(),
            r.grid_export.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
