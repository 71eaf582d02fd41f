use serde::{Deserialize, Serialize};

use crate::time_value::{irr_estimate, npv};
use crate::types::{f64_or_nan, vec_f64_or_nan, Money, Percent, Ratio};

use super::amortization::{monthly_payment, remaining_balance};
use super::parameters::DealParameters;
use super::projection::{project_cash_flows, ProjectionInputs};

/// Fixed discount rate for the reported NPV.
pub const NPV_DISCOUNT_RATE: f64 = 0.10;

/// Snapshot of every metric derived from one set of deal parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResults {
    #[serde(deserialize_with = "f64_or_nan")]
    pub equity_investment: Money,
    #[serde(deserialize_with = "f64_or_nan")]
    pub loan_amount: Money,
    #[serde(deserialize_with = "f64_or_nan")]
    pub monthly_payment: Money,
    #[serde(deserialize_with = "f64_or_nan")]
    pub annual_debt_service: Money,
    #[serde(deserialize_with = "f64_or_nan")]
    pub effective_gross_income: Money,
    #[serde(deserialize_with = "f64_or_nan")]
    pub operating_expenses: Money,
    #[serde(deserialize_with = "f64_or_nan")]
    pub year1_cash_flow: Money,
    #[serde(rename = "year1NOI", deserialize_with = "f64_or_nan")]
    pub year1_noi: Money,
    #[serde(deserialize_with = "f64_or_nan")]
    pub exit_value: Money,
    #[serde(deserialize_with = "f64_or_nan")]
    pub remaining_loan_balance: Money,
    #[serde(deserialize_with = "f64_or_nan")]
    pub net_sales_proceeds: Money,
    /// IRR in percent
    #[serde(deserialize_with = "f64_or_nan")]
    pub irr: Percent,
    pub irr_converged: bool,
    pub irr_iterations: u32,
    /// Cash-on-cash in percent
    #[serde(deserialize_with = "f64_or_nan")]
    pub cash_on_cash: Percent,
    #[serde(deserialize_with = "f64_or_nan")]
    pub dscr: Ratio,
    #[serde(deserialize_with = "f64_or_nan")]
    pub equity_multiple: Ratio,
    /// Break-even occupancy as a ratio (0.54 = 54%)
    #[serde(deserialize_with = "f64_or_nan")]
    pub break_even_occupancy: Ratio,
    /// NPV at [`NPV_DISCOUNT_RATE`]
    #[serde(deserialize_with = "f64_or_nan")]
    pub npv: Money,
    /// Index 0 is the initial outlay, the last entry includes sale proceeds
    #[serde(deserialize_with = "vec_f64_or_nan")]
    pub projected_cash_flows: Vec<Money>,
    /// Going-in cap rate in percent
    #[serde(deserialize_with = "f64_or_nan")]
    pub cap_rate: Percent,
}

impl CalculationResults {
    /// Headline metrics that feed the deal assessment, by name.
    pub fn headline_metrics(&self) -> [(&'static str, f64); 6] {
        [
            ("irr", self.irr),
            ("cashOnCash", self.cash_on_cash),
            ("dscr", self.dscr),
            ("equityMultiple", self.equity_multiple),
            ("breakEvenOccupancy", self.break_even_occupancy),
            ("npv", self.npv),
        ]
    }

    /// Names of headline metrics that came out NaN or infinite.
    pub fn non_finite_metrics(&self) -> Vec<&'static str> {
        self.headline_metrics()
            .iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Run the full underwriting pipeline for one deal.
///
/// Pure and infallible: out-of-range inputs surface as NaN or infinite metrics,
/// never as a panic. Validate first if that matters.
pub fn calculate_metrics(params: &DealParameters) -> CalculationResults {
    // --- Loan ---
    let loan_amount = params.purchase_price * params.ltv / 100.0;
    let equity_investment = params.purchase_price - loan_amount;
    let monthly_payment = monthly_payment(loan_amount, params.interest_rate, params.amortization);
    let annual_debt_service = monthly_payment * 12.0;

    // --- Year 1 ---
    let operating_expenses = params.annual_noi * params.operating_expense_ratio / 100.0;
    let effective_gross_income = params.annual_noi + operating_expenses;
    let year1_cash_flow = params.annual_noi;
    let year1_noi = params.annual_noi;

    // --- Exit ---
    let growth = 1.0 + params.noi_growth_rate / 100.0;
    let hold_years = i32::try_from(params.holding_period).unwrap_or(i32::MAX);
    let exit_noi = params.annual_noi * growth.powi(hold_years);
    let exit_value = exit_noi / (params.exit_cap_rate / 100.0);
    let remaining_loan_balance = remaining_balance(
        loan_amount,
        params.interest_rate,
        params.amortization,
        f64::from(params.holding_period),
        params.io_period,
    );
    let selling_costs = exit_value * (params.selling_costs / 100.0);
    let net_sales_proceeds = exit_value - remaining_loan_balance - selling_costs;

    // --- Cash flows ---
    let mut projected_cash_flows = project_cash_flows(&ProjectionInputs {
        year1_cash_flow,
        growth_rate: params.noi_growth_rate,
        holding_period: params.holding_period,
        capex_year1: params.capex_year1,
        capex_year2: params.capex_year2,
        rehab_period: params.rehab_period,
        rehab_vacancy: params.rehab_vacancy,
        io_period: params.io_period,
        monthly_debt_service: monthly_payment,
        loan_amount,
        interest_rate: params.interest_rate,
    });
    if let Some(last) = projected_cash_flows.last_mut() {
        *last += net_sales_proceeds;
    }

    // --- Returns ---
    let irr = irr_estimate(&projected_cash_flows);
    let cash_on_cash = year1_cash_flow / equity_investment * 100.0;
    let dscr = params.annual_noi / annual_debt_service;
    let total_cash_flow: Money = projected_cash_flows.iter().sum();
    let equity_multiple = total_cash_flow / projected_cash_flows[0].abs();
    let npv = npv(NPV_DISCOUNT_RATE, &projected_cash_flows);
    let break_even_occupancy = (annual_debt_service + operating_expenses) / effective_gross_income;
    let cap_rate = params.annual_noi / params.purchase_price * 100.0;

    CalculationResults {
        equity_investment,
        loan_amount,
        monthly_payment,
        annual_debt_service,
        effective_gross_income,
        operating_expenses,
        year1_cash_flow,
        year1_noi,
        exit_value,
        remaining_loan_balance,
        net_sales_proceeds,
        irr: irr.rate_pct,
        irr_converged: irr.converged,
        irr_iterations: irr.iterations,
        cash_on_cash,
        dscr,
        equity_multiple,
        break_even_occupancy,
        npv,
        projected_cash_flows,
        cap_rate,
    }
}
