use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use pencil_core::underwriting::{amortization_schedule, monthly_payment, remaining_balance, AmortizationRow};

/// Arguments for the monthly payment
#[derive(Args)]
pub struct PaymentArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: f64,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: f64,

    /// Amortization term in years
    #[arg(long)]
    pub amortization: f64,
}

/// Arguments for the outstanding balance
#[derive(Args)]
pub struct BalanceArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: f64,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: f64,

    /// Amortization term in years
    #[arg(long)]
    pub amortization: f64,

    /// Years elapsed since origination
    #[arg(long)]
    pub years: f64,

    /// Interest-only period in years
    #[arg(long, default_value = "0")]
    pub io_period: f64,

    /// Include the month-by-month schedule
    #[arg(long)]
    pub schedule: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentOutput {
    monthly_payment: f64,
    annual_debt_service: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BalanceOutput {
    remaining_balance: f64,
    monthly_payment: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<Vec<AmortizationRow>>,
}

fn check_loan(principal: f64, rate: f64, amortization: f64) -> Result<(), Box<dyn std::error::Error>> {
    if !principal.is_finite() || principal < 0.0 {
        return Err("--principal must be a non-negative number".into());
    }
    if !rate.is_finite() || rate < 0.0 {
        return Err("--rate must be a non-negative percentage".into());
    }
    if !amortization.is_finite() || amortization <= 0.0 {
        return Err("--amortization must be a positive number of years".into());
    }
    Ok(())
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    check_loan(args.principal, args.rate, args.amortization)?;

    let payment = monthly_payment(args.principal, args.rate, args.amortization);
    Ok(serde_json::to_value(PaymentOutput {
        monthly_payment: payment,
        annual_debt_service: payment * 12.0,
    })?)
}

pub fn run_balance(args: BalanceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    check_loan(args.principal, args.rate, args.amortization)?;
    if !args.years.is_finite() || args.years < 0.0 || args.years > args.amortization {
        return Err("--years must be between 0 and the amortization term".into());
    }
    if !args.io_period.is_finite() || args.io_period < 0.0 {
        return Err("--io-period must be a non-negative number of years".into());
    }

    let schedule = args.schedule.then(|| {
        amortization_schedule(args.principal, args.rate, args.amortization, args.years, args.io_period)
    });

    Ok(serde_json::to_value(BalanceOutput {
        remaining_balance: remaining_balance(
            args.principal,
            args.rate,
            args.amortization,
            args.years,
            args.io_period,
        ),
        monthly_payment: monthly_payment(args.principal, args.rate, args.amortization),
        schedule,
    })?)
}
