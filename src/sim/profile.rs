//! Normalized 24-hour load shapes and the heuristic that picks one.
//!
//! Classification is best effort: a commercial profile whose appliance
//! names mention any allowlisted keyword is treated as a food-service
//! business. Nothing guarantees the allowlist is complete, which is why it
//! is configurable through [`ShapeKeywords`].

use serde::{Deserialize, Serialize};

use crate::load::{LoadItem, UserType};

pub const HOURS_PER_DAY: usize = 24;

/// Morning and evening humps of a household.
const RESIDENTIAL: [f64; HOURS_PER_DAY] = [
    0.02, 0.02, 0.02, 0.02, 0.02, 0.04, // 0-5
    0.08, 0.10, 0.06, 0.04, 0.03, 0.03, // 6-11
    0.03, 0.03, 0.03, 0.04, 0.05, 0.08, // 12-17
    0.10, 0.10, 0.08, 0.06, 0.04, 0.03, // 18-23
];

/// Office hours plateau from 9:00 to 17:00.
const COMMERCIAL_HOURS: [f64; HOURS_PER_DAY] = [
    0.01, 0.01, 0.01, 0.01, 0.01, 0.01, // 0-5
    0.01, 0.03, 0.06, 0.09, 0.09, 0.09, // 6-11
    0.09, 0.09, 0.09, 0.09, 0.09, 0.05, // 12-17
    0.03, 0.01, 0.01, 0.01, 0.01, 0.01, // 18-23
];

/// Breakfast, lunch and dinner service peaks.
const FOOD_SERVICE: [f64; HOURS_PER_DAY] = [
    0.005, 0.005, 0.005, 0.005, 0.005, 0.01, // 0-5
    0.04, 0.09, 0.09, 0.06, 0.04, 0.05, // 6-11
    0.08, 0.08, 0.05, 0.03, 0.04, 0.06, // 12-17
    0.08, 0.07, 0.04, 0.02, 0.01, 0.005, // 18-23
];

/// Case-insensitive appliance-name keywords that mark a coffee shop or
/// restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeKeywords {
    pub coffee_shop_keywords: Vec<String>,
}

impl Default for ShapeKeywords {
    fn default() -> Self {
        Self {
            coffee_shop_keywords: [
                "espresso",
                "coffee",
                "grinder",
                "restaurant",
                "cafe",
                "oven",
                "kitchen",
            ]
            .map(str::to_string)
            .to_vec(),
        }
    }
}

impl ShapeKeywords {
    /// Whether `name` contains any keyword, ignoring case. Empty keywords
    /// never match.
    pub fn matches(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.coffee_shop_keywords
            .iter()
            .filter(|keyword| !keyword.is_empty())
            .any(|keyword| name.contains(&keyword.to_lowercase()))
    }
}

/// Which template spreads the daily load over the hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadShape {
    Residential,
    CommercialHours,
    CoffeeShop,
}

impl LoadShape {
    /// Picks the shape for a customer segment and appliance list.
    pub fn classify(
        user_type: UserType,
        appliances: &[LoadItem],
        keywords: &ShapeKeywords,
    ) -> Self {
        match user_type {
            UserType::Residential => Self::Residential,
            UserType::Commercial => {
                if appliances.iter().any(|item| keywords.matches(&item.name)) {
                    Self::CoffeeShop
                } else {
                    Self::CommercialHours
                }
            }
        }
    }

    /// Hourly shares of daily load, renormalized to sum to exactly one.
    pub fn distribution(self) -> [f64; HOURS_PER_DAY] {
        let raw = match self {
            Self::Residential => RESIDENTIAL,
            Self::CommercialHours => COMMERCIAL_HOURS,
            Self::CoffeeShop => FOOD_SERVICE,
        };
        let total: f64 = raw.iter().sum();
        raw.map(|share| share / total)
    }

    /// Explanation shown next to the hourly chart.
    pub fn note(self) -> &'static str {
        match self {
            Self::Residential => {
                "Residential profile: morning and evening peaks, low daytime use."
            }
            Self::CommercialHours => {
                "Commercial profile: steady load during business hours (9:00-17:00)."
            }
            Self::CoffeeShop => {
                "Coffee shop / restaurant profile: breakfast, lunch and dinner service peaks."
            }
        }
    }
}
