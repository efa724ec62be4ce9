//! Load profile to discrete PV / battery / inverter hardware.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::Constants;
use crate::load::{LoadItem, Phase};

/// Battery capacity is sold in blocks of this size (kWh).
pub const BATTERY_BLOCK_KWH: f64 = 5.0;

/// Smallest PV array ever recommended, in panels.
pub const MIN_PANELS: u32 = 3;

/// Diversity factor for small installations (three units or fewer).
const SMALL_SITE_COINCIDENCE: f64 = 0.85;
/// Diversity factor once more than three units are connected.
const LARGE_SITE_COINCIDENCE: f64 = 0.7;
const LARGE_SITE_THRESHOLD: u32 = 3;

/// Physical module counts behind a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCounts {
    pub panels: u32,
    pub batteries: u32,
    pub inverters: u32,
}

/// Recommended nameplate capacities, each an exact multiple of its module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommended {
    /// Installed PV (kW): `panels * SPEC_PV_WATTAGE / 1000`.
    pub pv_kw: f64,
    /// Installed storage (kWh), a multiple of [`BATTERY_BLOCK_KWH`].
    pub battery_kwh: f64,
    /// Installed inverter rating (kW), a multiple of the phase module.
    pub inverter_kw: f64,
    #[serde(rename = "is3Phase")]
    pub is_3_phase: bool,
    pub units: UnitCounts,
}

/// Output of [`calculate_system_size`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSize {
    /// Sum of item energy over one day (Wh).
    pub total_daily_energy_wh: f64,
    /// Coincident peak draw after diversity and the single-load floor (W).
    pub peak_power_w: f64,
    pub recommended: Recommended,
}

/// Diversity factor for the given number of connected appliance units.
///
/// A step function: more than three units gives 0.7, otherwise 0.85.
pub fn coincidence_factor(appliance_count: u32) -> f64 {
    if appliance_count > LARGE_SITE_THRESHOLD {
        LARGE_SITE_COINCIDENCE
    } else {
        SMALL_SITE_COINCIDENCE
    }
}

/// Realistic simultaneous draw of a load profile (W).
///
/// Scales the all-on connected power by [`coincidence_factor`] but never
/// drops below the wattage of the single largest appliance. An empty
/// profile yields zero.
pub fn coincident_peak_w(load_items: &[LoadItem]) -> f64 {
    let raw_peak_w: f64 = load_items.iter().map(LoadItem::connected_power_w).sum();
    let appliance_count = load_items
        .iter()
        .fold(0_u32, |count, item| count.saturating_add(item.quantity));
    let max_single_w = load_items
        .iter()
        .map(|item| item.watts)
        .fold(0.0_f64, f64::max);

    (raw_peak_w * coincidence_factor(appliance_count)).max(max_single_w)
}

/// Rounds `value` up to a whole number of `step`s, with at least one step.
fn ceil_to_step(value: f64, step: f64) -> f64 {
    ((value / step).ceil() * step).max(step)
}

/// Sizes a backup system for a load profile.
///
/// # Arguments
///
/// * `load_items` - Appliances; an empty slice yields the minimum hardware
/// * `outage_hours` - Hours the battery must carry the coincident peak
/// * `phase` - Grid connection; `Unknown` sizes as single phase
/// * `constants` - Parameter snapshot (read only)
///
/// Inputs are assumed validated (non-negative watts, quantity and hours).
/// Never fails: every component is floored at one module so the
/// recommendation is never zero hardware.
pub fn calculate_system_size(
    load_items: &[LoadItem],
    outage_hours: f64,
    phase: Phase,
    constants: &Constants,
) -> SystemSize {
    let total_daily_energy_wh: f64 = load_items.iter().map(LoadItem::daily_energy_wh).sum();
    let peak_power_w = coincident_peak_w(load_items);

    let required_pv_kw = (total_daily_energy_wh / 1000.0)
        / (constants.peak_sun_hours * constants.system_efficiency);
    let required_battery_kwh =
        (peak_power_w / 1000.0 * outage_hours) / constants.depth_of_discharge;
    let required_inverter_kw = peak_power_w / 1000.0 * constants.inverter_oversize_factor;

    let panels =
        ((required_pv_kw * 1000.0 / constants.spec_pv_wattage).ceil() as u32).max(MIN_PANELS);
    let pv_kw = f64::from(panels) * constants.spec_pv_wattage / 1000.0;

    let battery_kwh = ceil_to_step(required_battery_kwh, BATTERY_BLOCK_KWH);
    let batteries = (battery_kwh / constants.spec_battery_kwh).ceil() as u32;

    let is_3_phase = phase.is_three_phase();
    let inverter_unit_kw = if is_3_phase {
        constants.spec_inverter_kw_3ph
    } else {
        constants.spec_inverter_kw
    };
    let inverter_kw = ceil_to_step(required_inverter_kw, inverter_unit_kw);
    let inverters = (inverter_kw / inverter_unit_kw).round() as u32;

    debug!(
        total_daily_energy_wh,
        peak_power_w,
        required_pv_kw,
        required_battery_kwh,
        required_inverter_kw,
        panels,
        batteries,
        inverters,
        %phase,
        "sized backup system"
    );

    SystemSize {
        total_daily_energy_wh,
        peak_power_w,
        recommended: Recommended {
            pv_kw,
            battery_kwh,
            inverter_kw,
            is_3_phase,
            units: UnitCounts {
                panels,
                batteries,
                inverters,
            },
        },
    }
}
