use serde::{Deserialize, Serialize};

use crate::error::PencilError;
use crate::types::{Money, Percent};
use crate::PencilResult;

/// Everything the underwriting engine needs to know about a deal.
///
/// Rates are in percent. `holding_period`, `amortization` and `io_period` are all
/// counted in **years**; `rehab_period` is in months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealParameters {
    /// Acquisition price
    pub purchase_price: Money,
    /// Stabilised year-1 net operating income
    #[serde(rename = "annualNOI", alias = "annualNoi")]
    pub annual_noi: Money,
    /// Annual NOI growth (%)
    pub noi_growth_rate: Percent,
    /// Holding period in whole years
    pub holding_period: u32,
    /// Cap rate applied to terminal NOI at sale (%)
    pub exit_cap_rate: Percent,
    /// Loan-to-value (%)
    pub ltv: Percent,
    /// Nominal annual interest rate (%)
    pub interest_rate: Percent,
    /// Amortization term in years
    pub amortization: f64,
    /// Operating expenses as a share of NOI (%)
    pub operating_expense_ratio: Percent,
    /// Interest-only period in years
    #[serde(default)]
    pub io_period: f64,
    #[serde(default)]
    pub capex_year1: Money,
    #[serde(default)]
    pub capex_year2: Money,
    /// Months of renovation downtime in year 1
    #[serde(default)]
    pub rehab_period: f64,
    /// Vacancy during the rehab period (%)
    #[serde(default)]
    pub rehab_vacancy: Percent,
    /// Disposition costs as a share of exit value (%)
    #[serde(default)]
    pub selling_costs: Percent,
}

impl Default for DealParameters {
    fn default() -> Self {
        Self {
            purchase_price: 1_750_000.0,
            annual_noi: 300_000.0,
            noi_growth_rate: 2.0,
            holding_period: 5,
            exit_cap_rate: 6.0,
            ltv: 75.0,
            interest_rate: 6.5,
            amortization: 25.0,
            operating_expense_ratio: 40.0,
            io_period: 0.0,
            capex_year1: 0.0,
            capex_year2: 0.0,
            rehab_period: 0.0,
            rehab_vacancy: 0.0,
            selling_costs: 4.0,
        }
    }
}

impl DealParameters {
    /// Parse a deal from a JSON document.
    pub fn from_json_str(s: &str) -> PencilResult<Self> {
        if s.trim().is_empty() {
            return Err(PencilError::InsufficientData(
                "Deal document is empty".into(),
            ));
        }
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a deal from a YAML document.
    pub fn from_yaml_str(s: &str) -> PencilResult<Self> {
        if s.trim().is_empty() {
            return Err(PencilError::InsufficientData(
                "Deal document is empty".into(),
            ));
        }
        Ok(serde_yaml::from_str(s)?)
    }
}
