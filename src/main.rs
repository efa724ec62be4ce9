//! Solar backup sizer entry point: CLI wiring and report output.

use std::path::Path;
use std::process;

use solar_backup_sizer::config::ScenarioConfig;
use solar_backup_sizer::io::export::export_csv;
use solar_backup_sizer::load::Phase;
use solar_backup_sizer::runner::run_calculation;
use solar_backup_sizer::telemetry::init_tracing;
use tracing::{error, info};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    outage_hours: Option<f64>,
    phase: Option<Phase>,
    json: bool,
    hourly_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("solar-backup-sizer - size a solar + battery backup and compare it with diesel");
    eprintln!();
    eprintln!("Usage: solar-backup-sizer [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in load profile ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --outage-hours <h>       Override daily outage hours");
    eprintln!("  --phase <p>              Override grid phase (1-phase, 3-phase, unknown)");
    eprintln!("  --json                   Print the result as JSON instead of a report");
    eprintln!("  --hourly-out <path>      Export the hourly profile to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server instead of calculating");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the residential_default preset is used.");
}

/// Returns the value following flag `name`, or exits.
fn flag_value(args: &[String], i: &mut usize, name: &str, what: &str) -> String {
    *i += 1;
    if *i >= args.len() {
        eprintln!("error: {name} requires {what}");
        process::exit(1);
    }
    args[*i].clone()
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        outage_hours: None,
        phase: None,
        json: false,
        hourly_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                cli.scenario_path =
                    Some(flag_value(&args, &mut i, "--scenario", "a path argument"));
            }
            "--preset" => {
                cli.preset = Some(flag_value(&args, &mut i, "--preset", "a name argument"));
            }
            "--outage-hours" => {
                let value = flag_value(&args, &mut i, "--outage-hours", "a number argument");
                if let Ok(h) = value.parse::<f64>() {
                    cli.outage_hours = Some(h);
                } else {
                    eprintln!("error: --outage-hours value \"{value}\" is not a valid number");
                    process::exit(1);
                }
            }
            "--phase" => {
                let value = flag_value(&args, &mut i, "--phase", "a phase argument");
                if let Some(p) = Phase::parse(&value) {
                    cli.phase = Some(p);
                } else {
                    eprintln!(
                        "error: --phase value \"{value}\" must be 1-phase, 3-phase or unknown"
                    );
                    process::exit(1);
                }
            }
            "--json" => {
                cli.json = true;
            }
            "--hourly-out" => {
                cli.hourly_out = Some(flag_value(&args, &mut i, "--hourly-out", "a path argument"));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let value = flag_value(&args, &mut i, "--port", "a u16 argument");
                if let Ok(p) = value.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{value}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();
    init_tracing();

    // --scenario takes priority, then --preset, then the residential default
    let loaded = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::residential_default())
    };
    let mut scenario = loaded.unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });

    if let Some(hours) = cli.outage_hours {
        scenario.site.outage_hours = hours;
    }
    if let Some(phase) = cli.phase {
        scenario.site.phase = phase;
    }

    #[cfg(feature = "api")]
    if cli.serve {
        serve(scenario, cli.port);
        return;
    }

    let result = match run_calculation(&scenario) {
        Ok(result) => result,
        Err(solar_backup_sizer::Error::Config(errors)) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to serialize result: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{result}");
    }

    if let Some(ref path) = cli.hourly_out {
        if let Err(e) = export_csv(&result.hourly.data, Path::new(path)) {
            error!(%path, "hourly export failed");
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(%path, "hourly profile written");
    }
}

#[cfg(feature = "api")]
fn serve(scenario: ScenarioConfig, port: u16) {
    use std::net::SocketAddr;
    use std::sync::Arc;

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let state = Arc::new(solar_backup_sizer::api::AppState {
        constants: scenario.effective_constants(),
        keywords: scenario.profile,
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });
    if let Err(e) = rt.block_on(solar_backup_sizer::api::serve(state, addr)) {
        eprintln!("error: API server failed: {e}");
        process::exit(1);
    }
}
