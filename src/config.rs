//! TOML-based scenario configuration and preset load profiles.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::Constants;
use crate::finance::landed_cost::FALLBACK_EXCHANGE_RATE;
use crate::finance::{EquipmentImportCost, LoanTerms, apply_landed_costs};
use crate::load::{LoadItem, Phase, UserType};
use crate::sim::profile::ShapeKeywords;

/// Top-level scenario parsed from TOML or JSON.
///
/// Every section has a default, so an empty document is a valid scenario
/// with no loads. Load from TOML with [`ScenarioConfig::from_toml_file`] or
/// start from a named preset with [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Outage window, grid connection and customer segment.
    #[serde(default)]
    pub site: SiteConfig,
    /// Appliance list to size for.
    #[serde(default)]
    pub loads: Vec<LoadItem>,
    /// Overrides of the factory parameter snapshot; omitted keys keep
    /// their defaults.
    #[serde(default)]
    pub constants: Constants,
    /// Hourly load-shape classification settings.
    #[serde(default)]
    pub profile: ShapeKeywords,
    /// Financing terms; a loan quote is produced only when present.
    #[serde(default)]
    pub loan: Option<LoanTerms>,
    /// Import cost sheets used to reprice hardware units.
    #[serde(default)]
    pub equipment: Vec<EquipmentImportCost>,
}

/// Site-level selectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Daily hours without grid power (must be > 0).
    pub outage_hours: f64,
    pub phase: Phase,
    pub user_type: UserType,
    /// ETB per USD for landed-cost repricing.
    pub exchange_rate: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            outage_hours: 4.0,
            phase: Phase::Unknown,
            user_type: UserType::Residential,
            exchange_rate: FALLBACK_EXCHANGE_RATE,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"site.outage_hours"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn residential(loads: Vec<LoadItem>) -> ScenarioConfig {
    ScenarioConfig {
        loads,
        ..ScenarioConfig::default()
    }
}

fn commercial(loads: Vec<LoadItem>) -> ScenarioConfig {
    ScenarioConfig {
        site: SiteConfig {
            user_type: UserType::Commercial,
            ..SiteConfig::default()
        },
        loads,
        ..ScenarioConfig::default()
    }
}

impl ScenarioConfig {
    /// Four-appliance household used as the form default.
    pub fn residential_default() -> Self {
        residential(vec![
            LoadItem::new("LED Lights", 50.0, 1, 4.0),
            LoadItem::new("Refrigerator", 150.0, 1, 24.0),
            LoadItem::new("WiFi Router", 10.0, 1, 24.0),
            LoadItem::new("TV", 80.0, 1, 4.0),
        ])
    }

    pub fn small_apartment() -> Self {
        residential(vec![
            LoadItem::new("LED Lights", 40.0, 1, 5.0),
            LoadItem::new("WiFi Router", 10.0, 1, 24.0),
            LoadItem::new("Refrigerator", 150.0, 1, 24.0),
            LoadItem::new("TV", 100.0, 1, 4.0),
        ])
    }

    /// Three-bedroom villa with a water pump.
    pub fn villa() -> Self {
        residential(vec![
            LoadItem::new("LED Lights", 100.0, 1, 6.0),
            LoadItem::new("WiFi Router", 15.0, 1, 24.0),
            LoadItem::new("Refrigerator", 200.0, 1, 24.0),
            LoadItem::new("TV", 150.0, 2, 4.0),
            LoadItem::new("Water Pump", 750.0, 1, 1.0),
        ])
    }

    /// Five-appliance office used as the commercial form default.
    ///
    /// Its coffee machine matches the default `coffee` keyword, so the
    /// hourly simulation uses the food-service shape.
    pub fn commercial_default() -> Self {
        commercial(vec![
            LoadItem::new("Desktop Computer", 200.0, 2, 8.0),
            LoadItem::new("Printer", 300.0, 1, 1.0),
            LoadItem::new("WiFi Router", 15.0, 1, 24.0),
            LoadItem::new("Office Lighting", 100.0, 1, 8.0),
            LoadItem::new("Coffee Machine", 1000.0, 1, 0.5),
        ])
    }

    pub fn small_office() -> Self {
        commercial(vec![
            LoadItem::new("Lighting", 200.0, 1, 9.0),
            LoadItem::new("WiFi Router", 30.0, 1, 24.0),
            LoadItem::new("Laptop", 65.0, 4, 8.0),
            LoadItem::new("Printer", 300.0, 1, 1.0),
        ])
    }

    pub fn retail_shop() -> Self {
        commercial(vec![
            LoadItem::new("Lighting", 300.0, 1, 10.0),
            LoadItem::new("POS Terminal", 50.0, 1, 10.0),
            LoadItem::new("Security Camera", 40.0, 1, 24.0),
        ])
    }

    /// Illustrative café with all-day espresso service; the espresso
    /// machine triggers the food-service load shape.
    pub fn coffee_shop() -> Self {
        commercial(vec![
            LoadItem::new("Espresso Machine", 1800.0, 1, 6.0),
            LoadItem::new("Coffee Grinder", 350.0, 1, 3.0),
            LoadItem::new("Display Fridge", 300.0, 1, 24.0),
            LoadItem::new("Lighting", 150.0, 1, 12.0),
            LoadItem::new("POS Terminal", 50.0, 1, 12.0),
        ])
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &[
        "residential_default",
        "commercial_default",
        "small_apartment",
        "villa",
        "small_office",
        "retail_shop",
        "coffee_shop",
    ];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "residential_default" => Ok(Self::residential_default()),
            "commercial_default" => Ok(Self::commercial_default()),
            "small_apartment" => Ok(Self::small_apartment()),
            "villa" => Ok(Self::villa()),
            "small_office" => Ok(Self::small_office()),
            "retail_shop" => Ok(Self::retail_shop()),
            "coffee_shop" => Ok(Self::coffee_shop()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Parses a scenario from a JSON document with the same layout.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the JSON is invalid or contains unknown fields.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(|e| ConfigError::new("json", e.to_string()))
    }

    /// Parameter snapshot to calculate with: the configured constants,
    /// repriced from the equipment sheets when any are given.
    pub fn effective_constants(&self) -> Constants {
        if self.equipment.is_empty() {
            self.constants.clone()
        } else {
            apply_landed_costs(&self.constants, &self.equipment, self.site.exchange_rate)
        }
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. An empty load
    /// list is valid and sizes to the minimum hardware.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let site = &self.site;

        if !site.outage_hours.is_finite() || site.outage_hours <= 0.0 {
            errors.push(ConfigError::new("site.outage_hours", "must be > 0"));
        }
        if !site.exchange_rate.is_finite() || site.exchange_rate <= 0.0 {
            errors.push(ConfigError::new("site.exchange_rate", "must be > 0"));
        }

        for (i, item) in self.loads.iter().enumerate() {
            if !item.watts.is_finite() || item.watts <= 0.0 {
                errors.push(ConfigError::new(format!("loads[{i}].watts"), "must be > 0"));
            }
            if item.quantity == 0 {
                errors.push(ConfigError::new(format!("loads[{i}].quantity"), "must be >= 1"));
            }
            if !(0.0..=24.0).contains(&item.hours) {
                errors.push(ConfigError::new(
                    format!("loads[{i}].hours"),
                    "must be in [0, 24]",
                ));
            }
        }

        errors.extend(self.constants.validate());
        if let Some(loan) = &self.loan {
            errors.extend(loan.validate());
        }
        for (i, item) in self.equipment.iter().enumerate() {
            errors.extend(item.validate(i));
        }

        errors
    }
}
