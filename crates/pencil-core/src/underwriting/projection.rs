use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// Inputs for the yearly levered cash flow projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInputs {
    /// Year-1 cash flow before debt service
    pub year1_cash_flow: Money,
    pub growth_rate: Percent,
    pub holding_period: u32,
    pub capex_year1: Money,
    pub capex_year2: Money,
    /// Rehab downtime in months (year 1 only)
    pub rehab_period: f64,
    pub rehab_vacancy: Percent,
    /// Interest-only period in years
    pub io_period: f64,
    /// Amortizing payment; annualised x12 outside the IO period
    pub monthly_debt_service: Money,
    pub loan_amount: Money,
    pub interest_rate: Percent,
}

/// Project the signed cash flow series.
///
/// Index 0 is `-loan_amount`, indices `1..=holding_period` are yearly cash flows
/// after capex and debt service. Sale proceeds are NOT included: the caller adds
/// them to the last entry.
pub fn project_cash_flows(inputs: &ProjectionInputs) -> Vec<Money> {
    let mut cash_flows = Vec::with_capacity(inputs.holding_period as usize + 1);
    cash_flows.push(-inputs.loan_amount);

    let growth = 1.0 + inputs.growth_rate / 100.0;
    let interest_only_debt_service = inputs.loan_amount * (inputs.interest_rate / 100.0);
    let amortizing_debt_service = inputs.monthly_debt_service * 12.0;

    for year in 1..=inputs.holding_period {
        let exponent = i32::try_from(year - 1).unwrap_or(i32::MAX);
        let mut year_cash_flow = inputs.year1_cash_flow * growth.powi(exponent);

        // Linear vacancy drag, not prorated occupancy
        if year == 1 && inputs.rehab_period > 0.0 {
            let rehab_impact = (inputs.rehab_period / 12.0) * (inputs.rehab_vacancy / 100.0);
            year_cash_flow *= 1.0 - rehab_impact;
        }

        match year {
            1 => year_cash_flow -= inputs.capex_year1,
            2 => year_cash_flow -= inputs.capex_year2,
            _ => {}
        }

        let debt_service = if f64::from(year) <= inputs.io_period {
            interest_only_debt_service
        } else {
            amortizing_debt_service
        };

        cash_flows.push(year_cash_flow - debt_service);
    }

    cash_flows
}
