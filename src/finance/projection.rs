//! CAPEX, seven-year cumulative cost walk, and payback against diesel.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::Constants;
use crate::sizing::SystemSize;

/// Length of the cost comparison horizon (years).
pub const PROJECTION_YEARS: u32 = 7;

/// Year whose cumulative totals are reported as the 5-year TCO.
const TCO_YEAR: u32 = 5;

/// Year whose operating costs are reported as the mid-horizon snapshot.
const SNAPSHOT_YEAR: u32 = 3;

const DAYS_PER_YEAR: f64 = 365.0;

/// Caller-side inputs that are not part of the system design.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInputs {
    /// Daily hours of grid outage the backup has to cover.
    pub outage_hours_per_day: f64,
}

/// Payback year, or `Beyond` when solar never undercuts diesel in the
/// horizon. Serialized as a bare number or the string `"7+"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiYears {
    Years(u32),
    Beyond,
}

impl RoiYears {
    pub fn years(self) -> Option<u32> {
        match self {
            Self::Years(n) => Some(n),
            Self::Beyond => None,
        }
    }
}

impl fmt::Display for RoiYears {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Years(n) => write!(f, "{n}"),
            Self::Beyond => write!(f, "{PROJECTION_YEARS}+"),
        }
    }
}

impl Serialize for RoiYears {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Years(n) => serializer.serialize_u32(*n),
            Self::Beyond => serializer.collect_str(self),
        }
    }
}

impl<'de> Deserialize<'de> for RoiYears {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self::Years(n)),
            Raw::Text(s) if s == format!("{PROJECTION_YEARS}+") => Ok(Self::Beyond),
            Raw::Text(s) => Err(de::Error::custom(format!(
                "expected a year count or \"{PROJECTION_YEARS}+\", got \"{s}\""
            ))),
        }
    }
}

/// Cumulative ownership cost of both paths at the end of one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyComparison {
    pub year: u32,
    /// Cumulative solar cost (CAPEX + OPEX to date).
    #[serde(rename = "Solar")]
    pub solar: f64,
    /// Cumulative diesel cost (CAPEX + OPEX to date).
    #[serde(rename = "Diesel")]
    pub diesel: f64,
    /// Solar operating cost incurred in this year alone.
    #[serde(rename = "SolarYearly")]
    pub solar_yearly: f64,
    /// Diesel operating cost incurred in this year alone.
    #[serde(rename = "DieselYearly")]
    pub diesel_yearly: f64,
}

/// Headline metrics derived from the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAnalysis {
    /// Diesel-path operating cost in year 3.
    pub year3_total_diesel: f64,
    /// Solar-path operating cost in year 3.
    pub year3_total_solar: f64,
    /// Year-one grid bill reduction of the solar path over the diesel path.
    pub annual_bill_savings: f64,
    /// Share of annual load met without the grid (0..=100).
    pub solar_fraction: f64,
    pub tco5_year_solar: f64,
    pub tco5_year_diesel: f64,
}

/// Output of [`calculate_financials`]. All amounts are whole ETB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialModel {
    pub capex_solar: f64,
    pub capex_diesel: f64,
    pub panel_cost: f64,
    pub battery_cost: f64,
    pub inverter_cost: f64,
    pub installation_cost: f64,
    pub roi_years: RoiYears,
    /// Years `0..=PROJECTION_YEARS`; year 0 is CAPEX only.
    pub comparison_data: Vec<YearlyComparison>,
    pub analysis: FinancialAnalysis,
}

/// Annual energy split and year-one cost bases of both paths.
struct CostBasis {
    annual_load_kwh: f64,
    grid_kwh_diesel_path: f64,
    grid_kwh_solar_path: f64,
    fuel_cost_year_one: f64,
    generator_maintenance: f64,
}

impl CostBasis {
    fn new(system: &SystemSize, outage_hours: f64, constants: &Constants) -> Self {
        let annual_load_kwh = system.total_daily_energy_wh / 1000.0 * DAYS_PER_YEAR;

        // The generator carries the outage window; the rest is grid billed.
        let outage_share = (outage_hours / 24.0).clamp(0.0, 1.0);
        let grid_kwh_diesel_path = annual_load_kwh - outage_share * annual_load_kwh;

        let fuel_cost_year_one = constants.gen_fuel_consumption_lph
            * outage_hours
            * DAYS_PER_YEAR
            * constants.fuel_price_per_liter;
        let generator_maintenance =
            outage_hours * DAYS_PER_YEAR * constants.gen_maintenance_cost_per_hour;

        let annual_solar_kwh = system.recommended.pv_kw
            * constants.peak_sun_hours
            * constants.system_efficiency
            * DAYS_PER_YEAR;
        let grid_kwh_solar_path = (annual_load_kwh - annual_solar_kwh).max(0.0);

        Self {
            annual_load_kwh,
            grid_kwh_diesel_path,
            grid_kwh_solar_path,
            fuel_cost_year_one,
            generator_maintenance,
        }
    }

    /// Unrounded `(solar, diesel)` operating cost of `year` (1-based).
    fn operating_costs(&self, year: u32, constants: &Constants) -> (f64, f64) {
        let exponent = year.saturating_sub(1) as i32;
        let grid_escalation = (1.0 + constants.grid_inflation_rate).powi(exponent);
        let fuel_escalation = (1.0 + constants.inflation_rate).powi(exponent);
        let tariff = constants.grid_price_per_kwh * grid_escalation;

        let diesel = self.grid_kwh_diesel_path * tariff
            + self.fuel_cost_year_one * fuel_escalation
            + self.generator_maintenance;
        let solar = constants.maintenance_annual_solar + self.grid_kwh_solar_path * tariff;
        (solar, diesel)
    }

    fn solar_fraction(&self) -> f64 {
        if self.annual_load_kwh <= 0.0 {
            return 100.0;
        }
        let covered = self.annual_load_kwh - self.grid_kwh_solar_path;
        (covered / self.annual_load_kwh * 100.0)
            .round()
            .clamp(0.0, 100.0)
    }
}

/// Projects ownership cost of the sized solar system against a fixed
/// diesel generator over [`PROJECTION_YEARS`] years.
///
/// The diesel path is one fixed generator regardless of load; it runs for
/// the outage window while the remaining load is billed at the grid tariff.
/// The solar path pays the grid only for load its annual harvest
/// (`pvKw * PEAK_SUN_HOURS * SYSTEM_EFFICIENCY * 365`) does not cover,
/// plus a fixed maintenance fee. Tariff and fuel escalate by
/// `(1 + rate)^(year - 1)`; maintenance does not.
pub fn calculate_financials(
    system: &SystemSize,
    inputs: FinancialInputs,
    constants: &Constants,
) -> FinancialModel {
    let units = &system.recommended.units;
    let inverter_unit_cost = if system.recommended.is_3_phase {
        constants.cost_unit_inverter_3ph
    } else {
        constants.cost_unit_inverter
    };

    let panel_cost = f64::from(units.panels) * constants.cost_unit_pv_panel;
    let battery_cost = f64::from(units.batteries) * constants.cost_unit_battery;
    let inverter_cost = f64::from(units.inverters) * inverter_unit_cost;
    let installation_cost = constants.cost_installation_flat;
    let capex_solar = (panel_cost + battery_cost + inverter_cost + installation_cost).round();
    let capex_diesel = constants.gen_capex.round();

    let basis = CostBasis::new(system, inputs.outage_hours_per_day, constants);

    let mut comparison_data = Vec::with_capacity(PROJECTION_YEARS as usize + 1);
    comparison_data.push(YearlyComparison {
        year: 0,
        solar: capex_solar,
        diesel: capex_diesel,
        solar_yearly: 0.0,
        diesel_yearly: 0.0,
    });

    let mut cumulative_solar = capex_solar;
    let mut cumulative_diesel = capex_diesel;
    for year in 1..=PROJECTION_YEARS {
        let (solar_yearly, diesel_yearly) = basis.operating_costs(year, constants);
        cumulative_solar += solar_yearly;
        cumulative_diesel += diesel_yearly;
        comparison_data.push(YearlyComparison {
            year,
            solar: cumulative_solar.round(),
            diesel: cumulative_diesel.round(),
            solar_yearly: solar_yearly.round(),
            diesel_yearly: diesel_yearly.round(),
        });
    }

    let roi_years = comparison_data
        .iter()
        .skip(1)
        .find(|entry| entry.solar < entry.diesel)
        .map_or(RoiYears::Beyond, |entry| RoiYears::Years(entry.year));

    let (year3_solar, year3_diesel) = basis.operating_costs(SNAPSHOT_YEAR, constants);

    let (tco5_year_solar, tco5_year_diesel) = comparison_data
        .iter()
        .find(|entry| entry.year == TCO_YEAR)
        .map(|entry| (entry.solar, entry.diesel))
        .unwrap_or_else(|| {
            let (solar, diesel) = (1..=TCO_YEAR)
                .map(|year| basis.operating_costs(year, constants))
                .fold((capex_solar, capex_diesel), |(s, d), (ys, yd)| (s + ys, d + yd));
            (solar.round(), diesel.round())
        });

    let analysis = FinancialAnalysis {
        year3_total_diesel: year3_diesel.round(),
        year3_total_solar: year3_solar.round(),
        annual_bill_savings: ((basis.grid_kwh_diesel_path - basis.grid_kwh_solar_path)
            * constants.grid_price_per_kwh)
            .round(),
        solar_fraction: basis.solar_fraction(),
        tco5_year_solar,
        tco5_year_diesel,
    };

    debug!(
        capex_solar,
        capex_diesel,
        %roi_years,
        solar_fraction = analysis.solar_fraction,
        annual_load_kwh = basis.annual_load_kwh,
        "projected financials"
    );

    FinancialModel {
        capex_solar,
        capex_diesel,
        panel_cost,
        battery_cost,
        inverter_cost,
        installation_cost,
        roi_years,
        comparison_data,
        analysis,
    }
}
