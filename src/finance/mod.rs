//! Cost modelling: ownership projection, unit pricing, and financing.

/// Import landed-cost pricing of hardware units.
pub mod landed_cost;
/// Bank loan amortization of the solar CAPEX.
pub mod loan;
pub mod projection;

pub use landed_cost::{EquipmentImportCost, EquipmentType, apply_landed_costs, landed_cost};
pub use loan::{LoanQuote, LoanTerms};
pub use projection::{
    FinancialAnalysis, FinancialInputs, FinancialModel, RoiYears, YearlyComparison,
    calculate_financials,
};
