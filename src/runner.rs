//! One full calculation: size, project, simulate, review.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ScenarioConfig;
use crate::error::{Error, Result};
use crate::finance::{FinancialInputs, FinancialModel, LoanQuote, calculate_financials};
use crate::optimality::{OptimalityWarning, check_optimality};
use crate::sim::{DailyEnergySummary, HourlyEnergyProfile, calculate_hourly_energy_with};
use crate::sizing::{SystemSize, calculate_system_size};

/// Everything the calculator shows for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub system_size: SystemSize,
    pub financials: FinancialModel,
    pub hourly: HourlyEnergyProfile,
    pub summary: DailyEnergySummary,
    pub warnings: Vec<OptimalityWarning>,
    /// Present when the scenario carries loan terms.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub loan: Option<LoanQuote>,
}

/// Validates `config` and runs every calculation against one constants
/// snapshot (repriced from equipment sheets when present).
///
/// # Errors
///
/// Returns [`Error::Config`] with every validation failure.
pub fn run_calculation(config: &ScenarioConfig) -> Result<CalculationResult> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(Error::Config(errors));
    }

    let constants = config.effective_constants();
    let site = &config.site;

    let system_size =
        calculate_system_size(&config.loads, site.outage_hours, site.phase, &constants);
    let financials = calculate_financials(
        &system_size,
        FinancialInputs {
            outage_hours_per_day: site.outage_hours,
        },
        &constants,
    );
    let hourly = calculate_hourly_energy_with(
        &system_size,
        system_size.total_daily_energy_wh,
        site.user_type,
        &config.loads,
        &config.profile,
    );
    let summary = DailyEnergySummary::from_profile(&hourly.data);
    let warnings = check_optimality(&system_size, site.outage_hours);
    let loan = config.loan.map(|terms| terms.quote(financials.capex_solar));

    info!(
        loads = config.loads.len(),
        pv_kw = system_size.recommended.pv_kw,
        battery_kwh = system_size.recommended.battery_kwh,
        inverter_kw = system_size.recommended.inverter_kw,
        capex_solar = financials.capex_solar,
        roi_years = %financials.roi_years,
        warnings = warnings.len(),
        "calculation complete"
    );

    Ok(CalculationResult {
        system_size,
        financials,
        hourly,
        summary,
        warnings,
        loan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::LoanTerms;
    use crate::load::UserType;
    use crate::optimality::Severity;
    use crate::sim::LoadShape;

    #[test]
    fn residential_default_end_to_end() {
        let result = run_calculation(&ScenarioConfig::residential_default());
        let result = result.ok();
        let result = result.as_ref();
        assert_eq!(
            result.map(|r| r.system_size.total_daily_energy_wh),
            Some(4360.0)
        );
        assert_eq!(result.map(|r| r.hourly.data.len()), Some(24));
        assert_eq!(
            result.map(|r| r.financials.comparison_data.len()),
            Some(8)
        );
        assert_eq!(result.map(|r| r.warnings.len()), Some(3));
        assert!(result.is_some_and(|r| r.loan.is_none()));
    }

    #[test]
    fn residential_default_excess_energy() {
        let result = run_calculation(&ScenarioConfig::residential_default()).ok();
        let summary = result.as_ref().map(|r| &r.summary);
        let excess = summary.map(|s| s.excess_energy_kwh).unwrap_or_default();
        let exported = summary.map(|s| s.exported_energy_kwh).unwrap_or_default();
        assert!((excess - 6.808).abs() < 1e-9, "excess {excess}");
        assert!((exported - 3.174).abs() < 1e-9, "exported {exported}");
        let records = result.map(|r| r.hourly.data).unwrap_or_default();
        let surplus_wh: i64 = records.iter().map(|r| (r.solar - r.load).max(0)).sum();
        assert!((excess - surplus_wh as f64 / 1000.0).abs() < 1e-12);
    }

    #[test]
    fn coffee_shop_uses_food_service_shape() {
        let result = run_calculation(&ScenarioConfig::coffee_shop());
        assert_eq!(
            result.ok().map(|r| r.hourly.load_shape),
            Some(LoadShape::CoffeeShop)
        );
    }

    #[test]
    fn loan_terms_produce_a_quote_on_capex() {
        let mut config = ScenarioConfig::villa();
        config.loan = Some(LoanTerms::default());
        let result = run_calculation(&config).ok();
        let capex = result.as_ref().map(|r| r.financials.capex_solar);
        let down = result.as_ref().and_then(|r| r.loan).map(|q| q.down_payment);
        assert!(capex.zip(down).is_some_and(|(c, d)| (d - c * 0.2).abs() < 1e-6));
    }

    #[test]
    fn invalid_scenario_reports_every_error() {
        let mut config = ScenarioConfig::small_office();
        config.site.outage_hours = -1.0;
        config.loads[0].quantity = 0;
        match run_calculation(&config) {
            Err(Error::Config(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected config errors, got {other:?}"),
        }
    }

    #[test]
    fn battery_sized_for_long_outage_passes_runway() {
        let mut config = ScenarioConfig::default();
        config.site.user_type = UserType::Commercial;
        config.loads = vec![crate::load::LoadItem::new("Welder", 3000.0, 1, 1.0)];
        // 3 kW over 12 h needs 40 kWh; the bank is sized for it
        config.site.outage_hours = 12.0;
        let warnings = run_calculation(&config).map(|r| r.warnings).unwrap_or_default();
        assert_eq!(warnings.first().map(|w| w.severity), Some(Severity::Success));
    }
}
