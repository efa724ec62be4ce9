use std::process::{Command, Output};

use serde_json::Value;

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_solar-backup-sizer"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("solar-backup-sizer process should run")
}

fn run_json(args: &[&str]) -> Value {
    let mut all = args.to_vec();
    all.push("--json");
    let output = run_cli(&all);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn default_run_prints_report() {
    let output = run_cli(&[]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.contains("--- System Size ---"));
    assert!(stdout.contains("Daily energy:          4360 Wh"));
    assert!(stdout.contains("--- Review ---"));
}

#[test]
fn presets_produce_distinct_designs() {
    let apartment = run_json(&["--preset", "small_apartment"]);
    let coffee = run_json(&["--preset", "coffee_shop"]);

    let energy = |v: &Value| v["systemSize"]["totalDailyEnergyWh"].as_f64();
    assert!(energy(&coffee) > energy(&apartment));
    assert_eq!(coffee["hourly"]["loadShape"], "coffee_shop");
    assert_eq!(apartment["hourly"]["loadShape"], "residential");

    let office = run_json(&["--preset", "commercial_default"]);
    assert_eq!(office["systemSize"]["totalDailyEnergyWh"], 5160.0);
    assert_eq!(office["hourly"]["loadShape"], "coffee_shop");
}

#[test]
fn phase_override_switches_inverter_module() {
    let three = run_json(&["--preset", "villa", "--phase", "3-phase"]);
    assert_eq!(three["systemSize"]["recommended"]["is3Phase"], true);
    assert_eq!(three["systemSize"]["recommended"]["inverterKw"], 15.0);
}

#[test]
fn outage_override_grows_battery() {
    let short = run_json(&["--preset", "retail_shop", "--outage-hours", "2"]);
    let long = run_json(&["--preset", "retail_shop", "--outage-hours", "48"]);

    let battery = |v: &Value| v["systemSize"]["recommended"]["batteryKwh"].as_f64();
    assert!(battery(&long) > battery(&short));
}

#[test]
fn scenario_files_run_and_differ() {
    let coffee = run_json(&["--scenario", "scenarios/coffee_shop.toml"]);
    let villa = run_json(&["--scenario", "scenarios/villa_landed_cost.toml"]);
    let office = run_json(&["--scenario", "scenarios/office_tariff_hike.toml"]);

    assert!(coffee.get("loan").is_some(), "coffee shop scenario carries loan terms");
    assert!(villa.get("loan").is_none());

    // landed cost of the panel sheet replaces the factory 15000 ETB
    let panels = villa["systemSize"]["recommended"]["units"]["panels"].as_f64();
    let panel_cost = villa["financials"]["panelCost"].as_f64();
    assert_eq!(panel_cost, panels.map(|n| n * 16_060.0));

    assert_eq!(office["hourly"]["loadShape"], "commercial_hours");
}

#[test]
fn hourly_csv_is_written() {
    let dir = std::env::temp_dir().join(format!("solar-backup-sizer-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    let path = dir.join("hourly.csv");
    let path_str = path.to_string_lossy().to_string();

    let output = run_cli(&["--preset", "small_office", "--hourly-out", &path_str]);
    assert!(output.status.success());

    let csv = std::fs::read_to_string(&path).expect("CSV should exist");
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("hour,solar_wh,load_wh,battery_state_pct,battery_flow_wh,grid_import_wh,grid_export_wh")
    );
    assert_eq!(lines.count(), 24);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unknown_preset_fails() {
    let output = run_cli(&["--preset", "castle"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"));
}

#[test]
fn invalid_outage_fails_validation() {
    let output = run_cli(&["--outage-hours", "0"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("site.outage_hours"));
}

#[test]
fn unknown_argument_fails() {
    let output = run_cli(&["--frobnicate"]);
    assert!(!output.status.success());
}
