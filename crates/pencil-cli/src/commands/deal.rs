use clap::Args;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use pencil_core::analysis;
use pencil_core::underwriting::{validation_issues, DealParameters, ValidationIssue};

use crate::input;

/// Deal source: a JSON/YAML file, piped JSON, or the defaults, with any
/// per-field flags applied on top.
#[derive(Args, Debug, Default)]
pub struct DealArgs {
    /// Path to a JSON or YAML deal file
    #[arg(long)]
    pub input: Option<String>,

    /// Acquisition price
    #[arg(long)]
    pub purchase_price: Option<f64>,

    /// Year-1 net operating income
    #[arg(long)]
    pub annual_noi: Option<f64>,

    /// Annual NOI growth in percent
    #[arg(long, allow_hyphen_values = true)]
    pub noi_growth_rate: Option<f64>,

    /// Holding period in years
    #[arg(long)]
    pub holding_period: Option<u32>,

    /// Exit cap rate in percent
    #[arg(long)]
    pub exit_cap_rate: Option<f64>,

    /// Loan-to-value in percent
    #[arg(long)]
    pub ltv: Option<f64>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub interest_rate: Option<f64>,

    /// Amortization term in years
    #[arg(long)]
    pub amortization: Option<f64>,

    /// Operating expenses as a percentage of NOI
    #[arg(long)]
    pub operating_expense_ratio: Option<f64>,

    /// Interest-only period in years
    #[arg(long)]
    pub io_period: Option<f64>,

    /// Capital expenditure in year 1
    #[arg(long)]
    pub capex_year1: Option<f64>,

    /// Capital expenditure in year 2
    #[arg(long)]
    pub capex_year2: Option<f64>,

    /// Rehab downtime in months
    #[arg(long)]
    pub rehab_period: Option<f64>,

    /// Vacancy during rehab in percent
    #[arg(long)]
    pub rehab_vacancy: Option<f64>,

    /// Selling costs as a percentage of exit value
    #[arg(long)]
    pub selling_costs: Option<f64>,
}

impl DealArgs {
    fn overlay(&self, params: &mut DealParameters) {
        let fields: [(Option<f64>, &mut f64); 14] = [
            (self.purchase_price, &mut params.purchase_price),
            (self.annual_noi, &mut params.annual_noi),
            (self.noi_growth_rate, &mut params.noi_growth_rate),
            (self.exit_cap_rate, &mut params.exit_cap_rate),
            (self.ltv, &mut params.ltv),
            (self.interest_rate, &mut params.interest_rate),
            (self.amortization, &mut params.amortization),
            (self.operating_expense_ratio, &mut params.operating_expense_ratio),
            (self.io_period, &mut params.io_period),
            (self.capex_year1, &mut params.capex_year1),
            (self.capex_year2, &mut params.capex_year2),
            (self.rehab_period, &mut params.rehab_period),
            (self.rehab_vacancy, &mut params.rehab_vacancy),
            (self.selling_costs, &mut params.selling_costs),
        ];
        for (flag, slot) in fields {
            if let Some(v) = flag {
                *slot = v;
            }
        }
        if let Some(years) = self.holding_period {
            params.holding_period = years;
        }
    }
}

/// Resolve the deal the command should run on.
pub fn resolve_deal(args: &DealArgs) -> Result<DealParameters, Box<dyn std::error::Error>> {
    let mut params = if let Some(ref path) = args.input {
        debug!("reading deal from {path}");
        input::file::read_deal(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        debug!("reading deal from stdin");
        serde_json::from_value(data)?
    } else {
        debug!("starting from default deal");
        DealParameters::default()
    };

    args.overlay(&mut params);
    debug!("resolved deal: {params:?}");
    Ok(params)
}

pub fn run_analyze(args: DealArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_deal(&args)?;
    let result = analysis::analyze_deal(&params)?;

    for w in &result.warnings {
        warn!("{w}");
    }
    let status = result
        .result
        .assessment
        .as_ref()
        .map_or("unassessed", |a| a.status.as_str());
    info!(
        "analyzed deal: {status}, irr {:.2}%, dscr {:.2}",
        result.result.metrics.irr, result.result.metrics.dscr
    );

    Ok(serde_json::to_value(result)?)
}

#[derive(Debug, Serialize, Deserialize)]
struct ValidationOutput {
    valid: bool,
    issues: Vec<ValidationIssue>,
}

pub fn run_validate(args: DealArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_deal(&args)?;

    let issues: Vec<ValidationIssue> = validation_issues(&params)
        .into_iter()
        .map(ValidationIssue::from)
        .collect();

    for issue in &issues {
        warn!("{}: {}", issue.field, issue.reason);
    }

    Ok(serde_json::to_value(ValidationOutput {
        valid: issues.is_empty(),
        issues,
    })?)
}
