//! Sizing, costing, and tariff parameters shared by every calculation.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Immutable snapshot of every tunable parameter the engine reads.
///
/// Keys serialize in the `SCREAMING_SNAKE_CASE` form used by the admin
/// surface that edits them, so a stored snapshot round-trips unchanged.
/// Callers build one snapshot per calculation and pass it by reference;
/// nothing in the engine mutates or caches it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default, deny_unknown_fields)]
pub struct Constants {
    /// Combined wiring, soiling, and conversion losses (0..1].
    pub system_efficiency: f64,
    /// Usable fraction of nameplate battery capacity (0..1].
    pub depth_of_discharge: f64,
    /// Average daily equivalent full-sun hours.
    pub peak_sun_hours: f64,
    /// Inverter margin over coincident peak for surge currents.
    pub inverter_oversize_factor: f64,

    /// Nameplate wattage of one PV panel (W).
    pub spec_pv_wattage: f64,
    /// Capacity of one battery module (kWh).
    pub spec_battery_kwh: f64,
    /// Rating of one single-phase inverter module (kW).
    pub spec_inverter_kw: f64,
    /// Rating of one three-phase inverter module (kW).
    #[serde(rename = "SPEC_INVERTER_KW_3PH")]
    pub spec_inverter_kw_3ph: f64,

    /// Cost of one PV panel (ETB).
    pub cost_unit_pv_panel: f64,
    /// Cost of one battery module (ETB).
    pub cost_unit_battery: f64,
    /// Cost of one single-phase inverter module (ETB).
    pub cost_unit_inverter: f64,
    /// Cost of one three-phase inverter module (ETB).
    #[serde(rename = "COST_UNIT_INVERTER_3PH")]
    pub cost_unit_inverter_3ph: f64,
    /// Flat installation charge per project (ETB).
    pub cost_installation_flat: f64,
    /// Fixed yearly solar upkeep, e.g. panel cleaning (ETB, not inflated).
    pub maintenance_annual_solar: f64,

    /// Grid tariff in year one (ETB/kWh).
    pub grid_price_per_kwh: f64,
    /// Yearly grid tariff escalation as a decimal rate.
    pub grid_inflation_rate: f64,

    /// Purchase price of the reference diesel generator (ETB).
    pub gen_capex: f64,
    /// Generator fuel burn (litres per running hour).
    pub gen_fuel_consumption_lph: f64,
    /// Generator upkeep per running hour (ETB, not inflated).
    pub gen_maintenance_cost_per_hour: f64,
    /// Diesel price in year one (ETB/litre).
    pub fuel_price_per_liter: f64,
    /// Yearly fuel price escalation as a decimal rate.
    pub inflation_rate: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            system_efficiency: 0.85,
            depth_of_discharge: 0.90,
            peak_sun_hours: 5.5,
            inverter_oversize_factor: 1.1,

            spec_pv_wattage: 550.0,
            spec_battery_kwh: 5.0,
            spec_inverter_kw: 5.0,
            spec_inverter_kw_3ph: 15.0,

            cost_unit_pv_panel: 15_000.0,
            cost_unit_battery: 180_000.0,
            cost_unit_inverter: 85_000.0,
            cost_unit_inverter_3ph: 240_000.0,
            cost_installation_flat: 50_000.0,
            maintenance_annual_solar: 5_000.0,

            grid_price_per_kwh: 3.0,
            grid_inflation_rate: 0.12,

            gen_capex: 650_000.0,
            gen_fuel_consumption_lph: 3.5,
            gen_maintenance_cost_per_hour: 50.0,
            fuel_price_per_liter: 100.0,
            inflation_rate: 0.15,
        }
    }
}

impl Constants {
    /// Every parameter paired with its serialized key, in declaration order.
    pub fn entries(&self) -> [(&'static str, f64); 21] {
        [
            ("SYSTEM_EFFICIENCY", self.system_efficiency),
            ("DEPTH_OF_DISCHARGE", self.depth_of_discharge),
            ("PEAK_SUN_HOURS", self.peak_sun_hours),
            ("INVERTER_OVERSIZE_FACTOR", self.inverter_oversize_factor),
            ("SPEC_PV_WATTAGE", self.spec_pv_wattage),
            ("SPEC_BATTERY_KWH", self.spec_battery_kwh),
            ("SPEC_INVERTER_KW", self.spec_inverter_kw),
            ("SPEC_INVERTER_KW_3PH", self.spec_inverter_kw_3ph),
            ("COST_UNIT_PV_PANEL", self.cost_unit_pv_panel),
            ("COST_UNIT_BATTERY", self.cost_unit_battery),
            ("COST_UNIT_INVERTER", self.cost_unit_inverter),
            ("COST_UNIT_INVERTER_3PH", self.cost_unit_inverter_3ph),
            ("COST_INSTALLATION_FLAT", self.cost_installation_flat),
            ("MAINTENANCE_ANNUAL_SOLAR", self.maintenance_annual_solar),
            ("GRID_PRICE_PER_KWH", self.grid_price_per_kwh),
            ("GRID_INFLATION_RATE", self.grid_inflation_rate),
            ("GEN_CAPEX", self.gen_capex),
            ("GEN_FUEL_CONSUMPTION_LPH", self.gen_fuel_consumption_lph),
            (
                "GEN_MAINTENANCE_COST_PER_HOUR",
                self.gen_maintenance_cost_per_hour,
            ),
            ("FUEL_PRICE_PER_LITER", self.fuel_price_per_liter),
            ("INFLATION_RATE", self.inflation_rate),
        ]
    }

    /// Checks that every value is positive and finite, and that the two
    /// ratios lie in (0, 1].
    ///
    /// Returns an empty vector if the snapshot is usable. Field paths are
    /// prefixed with `constants.` to match the scenario file layout.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (key, value) in self.entries() {
            if !value.is_finite() || value <= 0.0 {
                errors.push(ConfigError::new(
                    format!("constants.{key}"),
                    format!("must be a positive number, got {value}"),
                ));
            }
        }

        for (key, value) in [
            ("SYSTEM_EFFICIENCY", self.system_efficiency),
            ("DEPTH_OF_DISCHARGE", self.depth_of_discharge),
        ] {
            if value > 1.0 {
                errors.push(ConfigError::new(
                    format!("constants.{key}"),
                    format!("must be in (0, 1], got {value}"),
                ));
            }
        }

        errors
    }
}
