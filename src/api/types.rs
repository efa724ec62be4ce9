//! API request and response bodies.

use serde::{Deserialize, Serialize};

use crate::config::{ScenarioConfig, SiteConfig};
use crate::constants::Constants;
use crate::finance::{EquipmentImportCost, LoanTerms};
use crate::load::LoadItem;
use crate::sim::ShapeKeywords;

/// Body of `POST /calculate`: a scenario whose constants and keywords are
/// optional and default to the server's.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculateRequest {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub loads: Vec<LoadItem>,
    #[serde(default)]
    pub constants: Option<Constants>,
    #[serde(default)]
    pub profile: Option<ShapeKeywords>,
    #[serde(default)]
    pub loan: Option<LoanTerms>,
    #[serde(default)]
    pub equipment: Vec<EquipmentImportCost>,
}

impl CalculateRequest {
    /// Resolves omitted sections against server defaults.
    pub fn into_scenario(self, constants: &Constants, keywords: &ShapeKeywords) -> ScenarioConfig {
        ScenarioConfig {
            site: self.site,
            loads: self.loads,
            constants: self.constants.unwrap_or_else(|| constants.clone()),
            profile: self.profile.unwrap_or_else(|| keywords.clone()),
            loan: self.loan,
            equipment: self.equipment,
        }
    }
}

/// Body of `POST /loan`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoanRequest {
    /// Amount to finance (ETB).
    pub capex: f64,
    #[serde(default)]
    pub terms: LoanTerms,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
