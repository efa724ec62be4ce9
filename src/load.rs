//! Appliance load entries and the site selectors that shape sizing.

use std::fmt;

use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::{Deserialize, Serialize};

/// Reads a unit variant from its serde name or alias.
fn from_serde_name<'a, T: Deserialize<'a>>(s: &'a str) -> Option<T> {
    let de: StrDeserializer<'a, ValueError> = s.into_deserializer();
    T::deserialize(de).ok()
}

/// One appliance line in a load profile.
///
/// The engine assumes `watts > 0`, `quantity >= 1` and `hours` in
/// `0..=24`; callers reject anything else before sizing (see
/// [`crate::config::ScenarioConfig::validate`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadItem {
    /// Display label. Only read by the hourly load-shape classifier.
    pub name: String,
    /// Rated power of one unit (W).
    pub watts: f64,
    /// Number of identical units.
    pub quantity: u32,
    /// Daily runtime per unit (h, may be fractional).
    pub hours: f64,
}

impl LoadItem {
    pub fn new(name: impl Into<String>, watts: f64, quantity: u32, hours: f64) -> Self {
        Self {
            name: name.into(),
            watts,
            quantity,
            hours,
        }
    }

    /// Daily energy of every unit of this item (Wh).
    pub fn daily_energy_wh(&self) -> f64 {
        self.watts * f64::from(self.quantity) * self.hours
    }

    /// Draw with every unit of this item running (W).
    pub fn connected_power_w(&self) -> f64 {
        self.watts * f64::from(self.quantity)
    }
}

/// Grid connection phase selected for the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "1-phase", alias = "single")]
    SinglePhase,
    #[serde(rename = "3-phase", alias = "three")]
    ThreePhase,
    /// Not known yet; sized as single phase.
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Phase {
    /// Whether three-phase inverter modules are used.
    pub fn is_three_phase(self) -> bool {
        matches!(self, Self::ThreePhase)
    }

    /// Parses the CLI / form spelling, the same names the config accepts.
    pub fn parse(s: &str) -> Option<Self> {
        from_serde_name(s)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SinglePhase => "single phase",
            Self::ThreePhase => "three phase",
            Self::Unknown => "unknown (single phase assumed)",
        };
        f.write_str(label)
    }
}

/// Customer segment, used to pick the hourly load shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Residential,
    #[serde(alias = "sme")]
    Commercial,
}

impl UserType {
    pub fn parse(s: &str) -> Option<Self> {
        from_serde_name(s)
    }
}
