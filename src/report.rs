//! Plain-text rendering of a [`CalculationResult`].

use std::fmt;

use crate::runner::CalculationResult;

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = &self.system_size;
        let rec = &size.recommended;
        writeln!(f, "--- System Size ---")?;
        writeln!(f, "Daily energy:          {:.0} Wh", size.total_daily_energy_wh)?;
        writeln!(f, "Peak power:            {:.0} W", size.peak_power_w)?;
        writeln!(
            f,
            "PV array:              {} kW ({} panels)",
            rec.pv_kw, rec.units.panels
        )?;
        writeln!(
            f,
            "Battery:               {} kWh ({} units)",
            rec.battery_kwh, rec.units.batteries
        )?;
        writeln!(
            f,
            "Inverter:              {} kW ({} x {})",
            rec.inverter_kw,
            rec.units.inverters,
            if rec.is_3_phase { "3-phase" } else { "1-phase" }
        )?;

        let fin = &self.financials;
        writeln!(f)?;
        writeln!(f, "--- Costs (ETB) ---")?;
        writeln!(f, "Panels:                {:.0}", fin.panel_cost)?;
        writeln!(f, "Batteries:             {:.0}", fin.battery_cost)?;
        writeln!(f, "Inverters:             {:.0}", fin.inverter_cost)?;
        writeln!(f, "Installation:          {:.0}", fin.installation_cost)?;
        writeln!(f, "Solar CAPEX:           {:.0}", fin.capex_solar)?;
        writeln!(f, "Diesel CAPEX:          {:.0}", fin.capex_diesel)?;
        writeln!(f, "Payback year:          {}", fin.roi_years)?;
        writeln!(f, "Solar fraction:        {:.0}%", fin.analysis.solar_fraction)?;
        writeln!(f, "Annual bill savings:   {:.0}", fin.analysis.annual_bill_savings)?;
        writeln!(f)?;
        writeln!(f, "{:>4} {:>14} {:>14}", "year", "solar", "diesel")?;
        for row in &fin.comparison_data {
            writeln!(f, "{:>4} {:>14.0} {:>14.0}", row.year, row.solar, row.diesel)?;
        }

        if let Some(loan) = &self.loan {
            writeln!(f)?;
            writeln!(f, "--- Loan ---")?;
            writeln!(f, "Down payment:          {:.0}", loan.down_payment)?;
            writeln!(
                f,
                "Monthly payment:       {:.0} x {}",
                loan.monthly_payment, loan.number_of_payments
            )?;
            writeln!(f, "Total interest:        {:.0}", loan.total_interest)?;
        }

        writeln!(f)?;
        writeln!(f, "--- Hourly Profile ({}) ---", self.hourly.note)?;
        writeln!(
            f,
            "{:>6} {:>7} {:>7} {:>5} {:>7} {:>7} {:>7}",
            "hour", "solar", "load", "soc%", "flow", "import", "export"
        )?;
        for r in &self.hourly.data {
            writeln!(
                f,
                "{:>6} {:>7} {:>7} {:>5} {:>7} {:>7} {:>7}",
                r.hour,
                r.solar,
                r.load,
                r.battery_state,
                r.battery_flow,
                r.grid_import,
                r.grid_export
            )?;
        }

        writeln!(f)?;
        writeln!(f, "{}", self.summary)?;

        writeln!(f)?;
        write!(f, "--- Review ---")?;
        for w in &self.warnings {
            write!(f, "\n[{}] {}", w.severity, w.message)?;
        }
        Ok(())
    }
}
