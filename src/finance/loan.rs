//! Bank financing of the solar CAPEX.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Financing terms offered by a partner bank.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoanTerms {
    /// Share of CAPEX paid upfront (0..=100).
    pub down_payment_percent: f64,
    /// Repayment period in whole years.
    pub term_years: u32,
    /// Nominal annual interest rate in percent, compounded monthly.
    pub annual_interest_percent: f64,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            down_payment_percent: 20.0,
            term_years: 3,
            annual_interest_percent: 16.5,
        }
    }
}

/// Repayment schedule summary for one CAPEX amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanQuote {
    pub down_payment: f64,
    pub loan_amount: f64,
    pub number_of_payments: u32,
    pub monthly_payment: f64,
    pub total_interest: f64,
    /// Down payment plus every instalment.
    pub total_payment: f64,
}

impl LoanTerms {
    /// Checks ranges; field paths are prefixed with `loan.`.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if !(0.0..=100.0).contains(&self.down_payment_percent) {
            errors.push(ConfigError::new(
                "loan.down_payment_percent",
                "must be in [0, 100]",
            ));
        }
        if self.term_years == 0 {
            errors.push(ConfigError::new("loan.term_years", "must be > 0"));
        }
        if !self.annual_interest_percent.is_finite() || self.annual_interest_percent < 0.0 {
            errors.push(ConfigError::new(
                "loan.annual_interest_percent",
                "must be >= 0",
            ));
        }
        errors
    }

    /// Amortizes `capex` less the down payment with the annuity formula
    /// `P * r(1+r)^n / ((1+r)^n - 1)`.
    ///
    /// A fully prepaid purchase yields no instalments. A zero rate repays
    /// the principal in equal parts.
    pub fn quote(&self, capex: f64) -> LoanQuote {
        let down_payment = capex * self.down_payment_percent / 100.0;
        let loan_amount = capex - down_payment;
        let number_of_payments = self.term_years * 12;

        if loan_amount <= 0.0 || number_of_payments == 0 {
            return LoanQuote {
                down_payment,
                loan_amount: loan_amount.max(0.0),
                number_of_payments,
                monthly_payment: 0.0,
                total_interest: 0.0,
                total_payment: down_payment,
            };
        }

        let n = f64::from(number_of_payments);
        let monthly_rate = self.annual_interest_percent / 100.0 / 12.0;
        let monthly_payment = if monthly_rate > 0.0 {
            let growth = (1.0 + monthly_rate).powf(n);
            loan_amount * (monthly_rate * growth) / (growth - 1.0)
        } else {
            loan_amount / n
        };

        let repaid = monthly_payment * n;
        LoanQuote {
            down_payment,
            loan_amount,
            number_of_payments,
            monthly_payment,
            total_interest: repaid - loan_amount,
            total_payment: repaid + down_payment,
        }
    }
}
