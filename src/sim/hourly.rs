//! Synthetic 24-hour energy balance of a sized system.
//!
//! This is a heuristic day, not a calibrated forecast: solar follows a
//! Gaussian bell around solar noon and load follows a fixed template. It
//! exists to give charts a plausible shape and to feed the daily summary.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::profile::{HOURS_PER_DAY, LoadShape, ShapeKeywords};
use crate::load::{LoadItem, UserType};
use crate::sizing::SystemSize;

/// Hour of peak irradiance.
const SOLAR_NOON_HOUR: f64 = 13.0;
/// Width of the irradiance bell (hours).
const SOLAR_SPREAD_HOURS: f64 = 2.5;
/// Flat derate on nameplate PV for the simulated day.
const SIMULATED_PV_DERATE: f64 = 0.85;
/// Battery charge at midnight as a share of capacity.
const INITIAL_STATE_OF_CHARGE: f64 = 0.5;

/// Energy flows during one simulated hour. All energies are whole Wh.
///
/// Sign convention for `battery_flow`: positive is charging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRecord {
    /// Label such as `"7:00"`.
    pub hour: String,
    pub solar: i64,
    pub load: i64,
    /// State of charge at the end of the hour, percent of capacity.
    pub battery_state: u8,
    pub battery_flow: i64,
    pub grid_import: i64,
    pub grid_export: i64,
}

impl HourlyRecord {
    /// `solar - load - (battery_flow + grid_export - grid_import)`; zero
    /// for every record this module produces.
    pub fn balance_residual(&self) -> i64 {
        self.solar - self.load - (self.battery_flow + self.grid_export - self.grid_import)
    }
}

/// Output of [`calculate_hourly_energy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyEnergyProfile {
    pub data: Vec<HourlyRecord>,
    /// Which load-shape assumption was applied.
    pub note: String,
    pub load_shape: LoadShape,
}

/// Battery state tracked in Wh, with no reserve floor.
#[derive(Debug, Clone)]
struct BatteryBank {
    capacity_wh: f64,
    stored_wh: f64,
}

impl BatteryBank {
    fn new(capacity_wh: f64) -> Self {
        let capacity_wh = capacity_wh.max(0.0);
        Self {
            capacity_wh,
            stored_wh: (capacity_wh * INITIAL_STATE_OF_CHARGE).round(),
        }
    }

    /// Stores up to `offered_wh`; returns what was accepted.
    fn charge(&mut self, offered_wh: f64) -> f64 {
        let accepted = offered_wh.min(self.capacity_wh - self.stored_wh).max(0.0);
        self.stored_wh += accepted;
        accepted
    }

    /// Releases up to `requested_wh`; returns what was delivered.
    fn discharge(&mut self, requested_wh: f64) -> f64 {
        let delivered = requested_wh.min(self.stored_wh).max(0.0);
        self.stored_wh -= delivered;
        delivered
    }

    fn state_percent(&self) -> u8 {
        if self.capacity_wh <= 0.0 {
            return 0;
        }
        (self.stored_wh / self.capacity_wh * 100.0)
            .round()
            .clamp(0.0, 100.0) as u8
    }
}

/// Bell-shaped PV output for hour `hour` (Wh).
fn solar_wh(pv_kw: f64, hour: usize) -> f64 {
    let peak_wh = pv_kw * 1000.0 * SIMULATED_PV_DERATE;
    let z = (hour as f64 - SOLAR_NOON_HOUR) / SOLAR_SPREAD_HOURS;
    (peak_wh * (-0.5 * z * z).exp()).max(0.0)
}

/// Simulates one day with the default coffee-shop keyword allowlist.
///
/// See [`calculate_hourly_energy_with`].
pub fn calculate_hourly_energy(
    system: &SystemSize,
    total_daily_energy_wh: f64,
    user_type: UserType,
    appliances: &[LoadItem],
) -> HourlyEnergyProfile {
    calculate_hourly_energy_with(
        system,
        total_daily_energy_wh,
        user_type,
        appliances,
        &ShapeKeywords::default(),
    )
}

/// Simulates one day of generation, load and battery exchange.
///
/// Solar and load are rounded to whole Wh before the battery step so each
/// record balances exactly. Surplus beyond a full battery is exported;
/// deficit beyond an empty battery is imported. The battery starts at 50%.
pub fn calculate_hourly_energy_with(
    system: &SystemSize,
    total_daily_energy_wh: f64,
    user_type: UserType,
    appliances: &[LoadItem],
    keywords: &ShapeKeywords,
) -> HourlyEnergyProfile {
    let shape = LoadShape::classify(user_type, appliances, keywords);
    let distribution = shape.distribution();
    let daily_load_wh = total_daily_energy_wh.max(0.0);
    let mut battery = BatteryBank::new((system.recommended.battery_kwh * 1000.0).round());

    let data: Vec<HourlyRecord> = (0..HOURS_PER_DAY)
        .map(|hour| {
            let solar = solar_wh(system.recommended.pv_kw, hour).round();
            let load = (daily_load_wh * distribution[hour]).round();
            let net = solar - load;

            let (battery_flow, grid_import, grid_export) = if net > 0.0 {
                let stored = battery.charge(net);
                (stored, 0.0, net - stored)
            } else if net < 0.0 {
                let delivered = battery.discharge(-net);
                (-delivered, -net - delivered, 0.0)
            } else {
                (0.0, 0.0, 0.0)
            };

            HourlyRecord {
                hour: format!("{hour}:00"),
                solar: solar as i64,
                load: load as i64,
                battery_state: battery.state_percent(),
                battery_flow: battery_flow as i64,
                grid_import: grid_import as i64,
                grid_export: grid_export as i64,
            }
        })
        .collect();

    debug!(
        ?shape,
        pv_kw = system.recommended.pv_kw,
        battery_kwh = system.recommended.battery_kwh,
        daily_load_wh,
        "simulated hourly profile"
    );

    HourlyEnergyProfile {
        data,
        note: shape.note().to_string(),
        load_shape: shape,
    }
}
