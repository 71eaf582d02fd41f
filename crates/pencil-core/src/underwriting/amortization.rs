use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent};

/// One month of the loan schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based month number
    pub month: u32,
    pub opening_balance: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
    pub interest_only: bool,
}

/// Standard fixed-rate mortgage payment: P * r(1+r)^n / ((1+r)^n - 1), r = annual% / 1200.
///
/// A zero rate falls back to straight-line repayment `P / n`. Any other degenerate
/// input (e.g. a zero term) yields a non-finite payment rather than an error.
pub fn monthly_payment(principal: Money, annual_rate_pct: Percent, amort_years: f64) -> Money {
    let total_months = amort_years * 12.0;

    if annual_rate_pct == 0.0 {
        return principal / total_months;
    }

    let monthly_rate = annual_rate_pct / 1200.0;
    let compound = (1.0 + monthly_rate).powf(total_months);
    principal * (monthly_rate * compound) / (compound - 1.0)
}

/// Month-by-month schedule over `elapsed_years * 12` months.
///
/// Months inside the interest-only window repay no principal. Afterwards the
/// full-term payment from [`monthly_payment`] applies; it is not re-amortized over
/// the months left after the IO window. Balances are not floored here, so the
/// last rows can go slightly negative once the loan is paid off. A non-finite
/// `elapsed_years` yields an empty schedule.
pub fn amortization_schedule(
    principal: Money,
    annual_rate_pct: Percent,
    amort_years: f64,
    elapsed_years: f64,
    io_period_years: f64,
) -> Vec<AmortizationRow> {
    schedule_rows(
        principal,
        annual_rate_pct,
        amort_years,
        elapsed_years,
        io_period_years,
    )
    .collect()
}

/// Outstanding loan balance after `elapsed_years`, floored at zero.
///
/// Walks the same months as [`amortization_schedule`] without keeping them.
pub fn remaining_balance(
    principal: Money,
    annual_rate_pct: Percent,
    amort_years: f64,
    elapsed_years: f64,
    io_period_years: f64,
) -> Money {
    let balance = schedule_rows(
        principal,
        annual_rate_pct,
        amort_years,
        elapsed_years,
        io_period_years,
    )
    .fold(principal, |_, row| row.closing_balance);

    // NaN must survive the floor
    if balance < 0.0 {
        0.0
    } else {
        balance
    }
}

fn schedule_rows(
    principal: Money,
    annual_rate_pct: Percent,
    amort_years: f64,
    elapsed_years: f64,
    io_period_years: f64,
) -> impl Iterator<Item = AmortizationRow> {
    let monthly_rate = annual_rate_pct / 1200.0;
    let payment = monthly_payment(principal, annual_rate_pct, amort_years);
    let elapsed_months = if elapsed_years.is_finite() {
        elapsed_years * 12.0
    } else {
        0.0
    };
    let io_months = io_period_years * 12.0;

    let mut balance = principal;
    (0u32..)
        .take_while(move |&month| f64::from(month) < elapsed_months)
        .map(move |month| {
            let interest = balance * monthly_rate;
            let interest_only = f64::from(month) < io_months;
            let principal_paid = if interest_only { 0.0 } else { payment - interest };
            let opening_balance = balance;
            balance -= principal_paid;

            AmortizationRow {
                month: month + 1,
                opening_balance,
                interest,
                principal: principal_paid,
                closing_balance: balance,
                interest_only,
            }
        })
}
