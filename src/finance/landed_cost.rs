//! Import landed-cost pricing of hardware units.
//!
//! Equipment is bought in USD and sold in ETB. The exchange rate is an
//! input; fetching it is left to the caller, with
//! [`FALLBACK_EXCHANGE_RATE`] as the documented last resort.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConfigError;
use crate::constants::Constants;

/// ETB per USD used when no live or stored rate is available.
pub const FALLBACK_EXCHANGE_RATE: f64 = 126.0;

/// Hardware lines that map onto a unit cost in [`Constants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    PvPanel,
    BatteryUnit,
    #[serde(rename = "inverter_1ph_5kw")]
    Inverter1Ph5Kw,
    #[serde(rename = "inverter_3ph_15kw")]
    Inverter3Ph15Kw,
    /// Catalog lines with no unit cost to update; priced but ignored.
    #[serde(other)]
    Other,
}

/// Import cost sheet of one equipment line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentImportCost {
    pub equipment_type: EquipmentType,
    pub import_usd: f64,
    pub shipping_usd: f64,
    /// Customs duty as a percentage of the import value.
    pub customs_duty_percent: f64,
    pub inland_transport_etb: f64,
    #[serde(default)]
    pub port_handling_etb: f64,
    /// Reseller margin applied on top of the landed cost.
    pub margin_percent: f64,
}

impl EquipmentImportCost {
    /// Checks that every amount is finite and non-negative.
    pub fn validate(&self, index: usize) -> Vec<ConfigError> {
        [
            ("import_usd", self.import_usd),
            ("shipping_usd", self.shipping_usd),
            ("customs_duty_percent", self.customs_duty_percent),
            ("inland_transport_etb", self.inland_transport_etb),
            ("port_handling_etb", self.port_handling_etb),
            ("margin_percent", self.margin_percent),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_finite() || *value < 0.0)
        .map(|(key, _)| ConfigError::new(format!("equipment[{index}].{key}"), "must be >= 0"))
        .collect()
    }
}

/// Final ETB price of one unit, rounded to whole birr.
///
/// `(import + shipping + duty + inland + port) * (1 + margin)`, where
/// duty is charged on the converted import value only.
pub fn landed_cost(item: &EquipmentImportCost, exchange_rate: f64) -> f64 {
    let import_etb = item.import_usd * exchange_rate;
    let shipping_etb = item.shipping_usd * exchange_rate;
    let duty_etb = import_etb * item.customs_duty_percent / 100.0;

    let base = import_etb
        + shipping_etb
        + duty_etb
        + item.inland_transport_etb
        + item.port_handling_etb;
    (base * (1.0 + item.margin_percent / 100.0)).round()
}

/// Returns a copy of `constants` with unit costs replaced by landed costs.
///
/// Lines of type [`EquipmentType::Other`] are skipped. When a type appears
/// more than once the last line wins.
pub fn apply_landed_costs(
    constants: &Constants,
    items: &[EquipmentImportCost],
    exchange_rate: f64,
) -> Constants {
    let mut repriced = constants.clone();
    for item in items {
        let cost = landed_cost(item, exchange_rate);
        let slot = match item.equipment_type {
            EquipmentType::PvPanel => &mut repriced.cost_unit_pv_panel,
            EquipmentType::BatteryUnit => &mut repriced.cost_unit_battery,
            EquipmentType::Inverter1Ph5Kw => &mut repriced.cost_unit_inverter,
            EquipmentType::Inverter3Ph15Kw => &mut repriced.cost_unit_inverter_3ph,
            EquipmentType::Other => continue,
        };
        *slot = cost;
        debug!(equipment = ?item.equipment_type, exchange_rate, cost, "repriced unit");
    }
    repriced
}
