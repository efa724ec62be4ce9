//! Daily energy roll-up of a simulated hourly profile.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::hourly::HourlyRecord;

/// Headline energy figures of one simulated day.
///
/// Computed post-hoc from the hourly records so the summary always agrees
/// with the chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyEnergySummary {
    /// Total PV generation (kWh).
    pub daily_generation_kwh: f64,
    /// Total consumption (kWh).
    pub daily_load_kwh: f64,
    /// Generation above same-hour load, stored or exported (kWh).
    pub excess_energy_kwh: f64,
    /// Surplus that could not be stored (kWh).
    pub exported_energy_kwh: f64,
    /// Deficit the battery could not cover (kWh).
    pub grid_import_kwh: f64,
    /// Energy stored over the day (kWh).
    pub battery_charged_kwh: f64,
    /// Energy released over the day (kWh).
    pub battery_discharged_kwh: f64,
    pub min_battery_state: u8,
    pub max_battery_state: u8,
    /// Share of load not taken from the grid (0..=100).
    pub self_sufficiency_pct: f64,
}

impl DailyEnergySummary {
    /// Sums the hourly records. An empty profile yields zeros and 100%
    /// self-sufficiency.
    pub fn from_profile(records: &[HourlyRecord]) -> Self {
        let mut solar_wh = 0_i64;
        let mut load_wh = 0_i64;
        let mut excess_wh = 0_i64;
        let mut export_wh = 0_i64;
        let mut import_wh = 0_i64;
        let mut charged_wh = 0_i64;
        let mut discharged_wh = 0_i64;
        let mut min_state = u8::MAX;
        let mut max_state = 0_u8;

        for r in records {
            solar_wh += r.solar;
            load_wh += r.load;
            excess_wh += (r.solar - r.load).max(0);
            export_wh += r.grid_export;
            import_wh += r.grid_import;
            if r.battery_flow > 0 {
                charged_wh += r.battery_flow;
            } else {
                discharged_wh -= r.battery_flow;
            }
            min_state = min_state.min(r.battery_state);
            max_state = max_state.max(r.battery_state);
        }

        if records.is_empty() {
            min_state = 0;
        }

        let self_sufficiency_pct = if load_wh > 0 {
            ((load_wh - import_wh) as f64 / load_wh as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        };

        let kwh = |wh: i64| wh as f64 / 1000.0;
        Self {
            daily_generation_kwh: kwh(solar_wh),
            daily_load_kwh: kwh(load_wh),
            excess_energy_kwh: kwh(excess_wh),
            exported_energy_kwh: kwh(export_wh),
            grid_import_kwh: kwh(import_wh),
            battery_charged_kwh: kwh(charged_wh),
            battery_discharged_kwh: kwh(discharged_wh),
            min_battery_state: min_state,
            max_battery_state: max_state,
            self_sufficiency_pct,
        }
    }
}

impl fmt::Display for DailyEnergySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Daily Energy ---")?;
        writeln!(f, "Daily generation:      {:.2} kWh", self.daily_generation_kwh)?;
        writeln!(f, "Daily load:            {:.2} kWh", self.daily_load_kwh)?;
        writeln!(f, "Excess energy:         {:.2} kWh", self.excess_energy_kwh)?;
        writeln!(f, "Grid export:           {:.2} kWh", self.exported_energy_kwh)?;
        writeln!(f, "Grid import:           {:.2} kWh", self.grid_import_kwh)?;
        writeln!(
            f,
            "Battery in/out:        {:.2} / {:.2} kWh",
            self.battery_charged_kwh, self.battery_discharged_kwh
        )?;
        writeln!(
            f,
            "Battery state range:   {}% - {}%",
            self.min_battery_state, self.max_battery_state
        )?;
        write!(f, "Self-sufficiency:      {:.1}%", self.self_sufficiency_pct)
    }
}
