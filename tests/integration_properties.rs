//! Randomized sweeps over load profiles checking the invariants every
//! calculation must hold.

mod common;

use common::{
    SWEEP_CASES, random_loads, random_outage_hours, random_phase, residential_loads, sweep_rng,
};
use rand::Rng;
use solar_backup_sizer::{
    Constants, FinancialInputs, Phase, Severity, UserType, calculate_financials,
    calculate_hourly_energy, calculate_system_size, check_optimality,
};

#[test]
fn capacities_are_whole_modules_with_floors() {
    let constants = Constants::default();
    let mut rng = sweep_rng();

    for _ in 0..SWEEP_CASES {
        let loads = random_loads(&mut rng);
        let outage = random_outage_hours(&mut rng);
        let phase = random_phase(&mut rng);
        let size = calculate_system_size(&loads, outage, phase, &constants);
        let rec = &size.recommended;

        let panels = rec.pv_kw * 1000.0 / constants.spec_pv_wattage;
        assert!(
            (panels - f64::from(rec.units.panels)).abs() < 1e-9,
            "pv {} kW is not whole panels",
            rec.pv_kw
        );
        assert!(rec.units.panels >= 3);

        assert_eq!(rec.battery_kwh % 5.0, 0.0, "battery {}", rec.battery_kwh);
        assert!(rec.battery_kwh >= 5.0);

        let module = if phase == Phase::ThreePhase { 15.0 } else { 5.0 };
        assert_eq!(rec.inverter_kw % module, 0.0, "inverter {}", rec.inverter_kw);
        assert!(rec.inverter_kw >= module);
        assert_eq!(f64::from(rec.units.inverters) * module, rec.inverter_kw);
        assert_eq!(rec.is_3_phase, phase == Phase::ThreePhase);
    }
}

#[test]
fn financial_series_are_anchored_and_monotonic() {
    let constants = Constants::default();
    let mut rng = sweep_rng();

    for _ in 0..SWEEP_CASES {
        let loads = random_loads(&mut rng);
        let outage = random_outage_hours(&mut rng);
        let size = calculate_system_size(&loads, outage, random_phase(&mut rng), &constants);
        let model = calculate_financials(
            &size,
            FinancialInputs {
                outage_hours_per_day: outage,
            },
            &constants,
        );

        assert_eq!(model.comparison_data.len(), 8);
        assert_eq!(model.comparison_data[0].solar, model.capex_solar);
        assert_eq!(model.comparison_data[0].diesel, model.capex_diesel);
        for (year, entry) in model.comparison_data.iter().enumerate() {
            assert_eq!(entry.year as usize, year);
        }
        for pair in model.comparison_data.windows(2) {
            assert!(pair[1].solar >= pair[0].solar);
            assert!(pair[1].diesel >= pair[0].diesel);
        }

        let fraction = model.analysis.solar_fraction;
        assert!((0.0..=100.0).contains(&fraction), "solar fraction {fraction}");
        assert!(model.analysis.annual_bill_savings.is_finite());
        if let Some(year) = model.roi_years.years() {
            assert!((1..=7).contains(&year));
        }
    }
}

#[test]
fn hourly_profile_balances_every_hour() {
    let constants = Constants::default();
    let mut rng = sweep_rng();

    for _ in 0..SWEEP_CASES {
        let loads = random_loads(&mut rng);
        let outage = random_outage_hours(&mut rng);
        let size = calculate_system_size(&loads, outage, Phase::Unknown, &constants);
        let user_type = if rng.random_bool(0.5) {
            UserType::Commercial
        } else {
            UserType::Residential
        };
        let profile = calculate_hourly_energy(&size, size.total_daily_energy_wh, user_type, &loads);

        assert_eq!(profile.data.len(), 24);
        for record in &profile.data {
            assert_eq!(
                record.solar - record.load,
                record.battery_flow + record.grid_export - record.grid_import,
                "{record:?}"
            );
            assert!(record.solar >= 0 && record.load >= 0);
            assert!(record.grid_import >= 0 && record.grid_export >= 0);
            assert!(record.battery_state <= 100);
            // never import and export in the same hour
            assert!(record.grid_import == 0 || record.grid_export == 0);
        }
    }
}

#[test]
fn optimality_never_emits_non_finite_numbers() {
    let constants = Constants::default();
    let mut rng = sweep_rng();

    for _ in 0..SWEEP_CASES {
        let loads = random_loads(&mut rng);
        let outage = random_outage_hours(&mut rng);
        let size = calculate_system_size(&loads, outage, random_phase(&mut rng), &constants);
        let findings = check_optimality(&size, outage);

        assert!((2..=4).contains(&findings.len()));
        for finding in &findings {
            assert!(!finding.message.contains("NaN"));
            assert!(!finding.message.contains("inf"));
        }
    }
}

#[test]
fn residential_scenario_matches_worked_example() {
    let constants = Constants::default();
    let size = calculate_system_size(&residential_loads(), 4.0, Phase::Unknown, &constants);
    assert_eq!(size.total_daily_energy_wh, 4360.0);
    assert!((size.peak_power_w - 203.0).abs() < 1e-9);
    assert_eq!(size.recommended.battery_kwh, 5.0);
}

#[test]
fn heavy_peak_on_small_bank_warns_about_battery() {
    let constants = Constants::default();
    let mut size = calculate_system_size(&residential_loads(), 4.0, Phase::Unknown, &constants);
    size.peak_power_w = 3000.0;
    size.recommended.battery_kwh = 5.0;

    let findings = check_optimality(&size, 4.0);
    assert_eq!(findings[0].severity, Severity::Warning);
    assert!(findings[0].message.contains("might be tight"));
}

#[test]
fn both_phase_paths_feed_downstream_calculations() {
    let constants = Constants::default();
    let loads = vec![solar_backup_sizer::LoadItem::new("Chiller", 16_000.0, 1, 6.0)];

    for phase in [Phase::SinglePhase, Phase::ThreePhase, Phase::Unknown] {
        let size = calculate_system_size(&loads, 3.0, phase, &constants);
        let model = calculate_financials(
            &size,
            FinancialInputs {
                outage_hours_per_day: 3.0,
            },
            &constants,
        );
        let energy = size.total_daily_energy_wh;
        let profile = calculate_hourly_energy(&size, energy, UserType::Commercial, &loads);

        assert!(model.capex_solar > 0.0);
        assert_eq!(profile.data.len(), 24);

        let json = serde_json::to_string(&model).unwrap_or_default();
        assert!(json.contains("\"comparisonData\""));
    }
}
