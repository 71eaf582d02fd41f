use clap::Args;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use pencil_core::time_value::{irr_estimate, npv};

/// Arguments for IRR
#[derive(Args)]
pub struct IrrArgs {
    /// Cash flows, initial outlay first (comma-separated, e.g. "-1000,400,400,400")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub cash_flows: Vec<f64>,
}

/// Arguments for NPV
#[derive(Args)]
pub struct NpvArgs {
    /// Cash flows, index 0 undiscounted (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub cash_flows: Vec<f64>,

    /// Discount rate in percent
    #[arg(long, default_value = "10", allow_hyphen_values = true)]
    pub rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IrrOutput {
    irr: f64,
    converged: bool,
    iterations: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NpvOutput {
    npv: f64,
    rate: f64,
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let estimate = irr_estimate(&args.cash_flows);
    if !estimate.converged {
        warn!(
            "IRR did not converge after {} iterations",
            estimate.iterations
        );
    }
    Ok(serde_json::to_value(IrrOutput {
        irr: estimate.rate_pct,
        converged: estimate.converged,
        iterations: estimate.iterations,
    })?)
}

pub fn run_npv(args: NpvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if !args.rate.is_finite() || args.rate <= -100.0 {
        return Err("--rate must be a percentage above -100".into());
    }
    Ok(serde_json::to_value(NpvOutput {
        npv: npv(args.rate / 100.0, &args.cash_flows),
        rate: args.rate,
    })?)
}
