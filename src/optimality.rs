//! Rule-based review of a recommended system.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sizing::SystemSize;

/// Usable share of nameplate battery capacity assumed by the runway rule.
const USABLE_BATTERY_SHARE: f64 = 0.9;
/// The battery must last this share of the outage to pass.
const RUNWAY_TOLERANCE: f64 = 0.8;
/// Sun hours and derate of the recharge rule's daily PV estimate.
const RECHARGE_SUN_HOURS: f64 = 5.5;
const RECHARGE_DERATE: f64 = 0.85;
/// Minimum inverter margin over peak draw.
const MIN_INVERTER_HEADROOM: f64 = 0.2;
/// Daily generation above this multiple of daily need earns a note.
const SURPLUS_MULTIPLE: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Success,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Info => "info",
        };
        f.write_str(label)
    }
}

/// One finding of [`check_optimality`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalityWarning {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub message: String,
}

impl OptimalityWarning {
    fn new(severity: Severity, message: String) -> Self {
        Self { severity, message }
    }
}

/// Reviews battery runway, solar recharge, inverter headroom and surplus.
///
/// Each rule contributes at most one entry, in that order. A zero peak load
/// means the battery runway is unbounded and the inverter has unlimited
/// headroom.
pub fn check_optimality(system: &SystemSize, outage_hours: f64) -> Vec<OptimalityWarning> {
    let rec = &system.recommended;
    let peak_load_kw = system.peak_power_w / 1000.0;
    let usable_battery_kwh = rec.battery_kwh * USABLE_BATTERY_SHARE;
    let mut findings = Vec::new();

    let duration_at_peak_h = if peak_load_kw > 0.0 {
        usable_battery_kwh / peak_load_kw
    } else {
        f64::INFINITY
    };
    if duration_at_peak_h < outage_hours * RUNWAY_TOLERANCE {
        findings.push(OptimalityWarning::new(
            Severity::Warning,
            format!(
                "Battery size ({} kWh) might be tight for {} hours if running all appliances at once. Consider reducing load or increasing duration.",
                rec.battery_kwh, outage_hours
            ),
        ));
    } else {
        findings.push(OptimalityWarning::new(
            Severity::Success,
            format!("Battery provides excellent backup for {outage_hours} hours."),
        ));
    }

    let daily_generation_kwh = rec.pv_kw * RECHARGE_SUN_HOURS * RECHARGE_DERATE;
    if daily_generation_kwh < usable_battery_kwh {
        findings.push(OptimalityWarning::new(
            Severity::Warning,
            format!(
                "Solar Array ({} kW) may struggle to fully recharge the battery in one day after a full drain.",
                rec.pv_kw
            ),
        ));
    } else {
        findings.push(OptimalityWarning::new(
            Severity::Success,
            "Solar Array is optimally sized to recharge the battery quickly.".to_string(),
        ));
    }

    if peak_load_kw > 0.0 {
        let headroom = (rec.inverter_kw - peak_load_kw) / peak_load_kw;
        if headroom < MIN_INVERTER_HEADROOM {
            findings.push(OptimalityWarning::new(
                Severity::Warning,
                format!(
                    "Inverter ({} kW) is running close to capacity. Avoid adding more heavy appliances.",
                    rec.inverter_kw
                ),
            ));
        }
    }

    if daily_generation_kwh > system.total_daily_energy_wh / 1000.0 * SURPLUS_MULTIPLE {
        findings.push(OptimalityWarning::new(
            Severity::Info,
            "System generates significantly more energy than daily use. You will reduce your grid bill to near zero.".to_string(),
        ));
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sizing::{Recommended, UnitCounts};

    fn system(
        pv_kw: f64,
        battery_kwh: f64,
        inverter_kw: f64,
        peak_w: f64,
        daily_wh: f64,
    ) -> SystemSize {
        SystemSize {
            total_daily_energy_wh: daily_wh,
            peak_power_w: peak_w,
            recommended: Recommended {
                pv_kw,
                battery_kwh,
                inverter_kw,
                is_3_phase: false,
                units: UnitCounts {
                    panels: 3,
                    batteries: 1,
                    inverters: 1,
                },
            },
        }
    }

    #[test]
    fn tight_battery_is_flagged() {
        // 4.5 kWh usable / 3 kW = 1.5 h < 3.2 h
        let findings = check_optimality(&system(1.65, 5.0, 5.0, 3000.0, 8000.0), 4.0);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.starts_with("Battery size (5 kWh) might be tight for 4 hours"));
    }

    #[test]
    fn ample_battery_is_praised() {
        let findings = check_optimality(&system(5.5, 20.0, 5.0, 1000.0, 8000.0), 4.0);
        assert_eq!(findings[0].severity, Severity::Success);
        assert_eq!(findings[0].message, "Battery provides excellent backup for 4 hours.");
    }

    #[test]
    fn small_array_cannot_recharge() {
        // 1.65 * 5.5 * 0.85 = 7.7 kWh < 9 kWh usable
        let findings = check_optimality(&system(1.65, 10.0, 5.0, 1000.0, 4000.0), 4.0);
        assert_eq!(findings[1].severity, Severity::Warning);
        assert!(findings[1].message.contains("Solar Array (1.65 kW)"));
    }

    #[test]
    fn inverter_close_to_capacity() {
        // (5 - 4.5) / 4.5 = 0.11
        let findings = check_optimality(&system(5.5, 20.0, 5.0, 4500.0, 20_000.0), 2.0);
        assert!(findings.iter().any(|w| w.severity == Severity::Warning
            && w.message.starts_with("Inverter (5 kW) is running close to capacity")));
    }

    #[test]
    fn surplus_generation_is_noted() {
        // 1.65 kW -> 7.71 kWh/day against 4.36 kWh * 1.5 = 6.54
        let findings = check_optimality(&system(1.65, 5.0, 5.0, 203.0, 4360.0), 4.0);
        let last = findings.last().unwrap();
        assert_eq!(last.severity, Severity::Info);
        assert!(last.message.contains("grid bill to near zero"));
    }

    #[test]
    fn zero_peak_skips_headroom_rule() {
        let findings = check_optimality(&system(1.65, 5.0, 5.0, 0.0, 0.0), 4.0);
        assert_eq!(findings[0].severity, Severity::Success);
        assert!(!findings.iter().any(|w| w.message.starts_with("Inverter")));
        for finding in &findings {
            assert!(!finding.message.contains("NaN") && !finding.message.contains("inf"));
        }
    }

    #[test]
    fn severity_serializes_under_type_key() {
        let findings = check_optimality(&system(1.65, 5.0, 5.0, 3000.0, 8000.0), 4.0);
        let json = serde_json::to_value(&findings[0]).unwrap();
        assert_eq!(json["type"], "warning");
        assert!(json.get("message").is_some());
    }
}
