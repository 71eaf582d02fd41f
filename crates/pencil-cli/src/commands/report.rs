use clap::Args;
use log::{info, warn};

use pencil_core::assessment::assess_deal;
use pencil_core::report::{build_report, DealReport, ReportOptions};
use pencil_core::underwriting::{calculate_metrics, validate_parameters};

use super::deal::{resolve_deal, DealArgs};

/// Arguments for the deal report
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub deal: DealArgs,

    /// Name shown under the report title
    #[arg(long)]
    pub prepared_by: Option<String>,

    /// Footer contact line (repeatable)
    #[arg(long = "contact")]
    pub contact: Vec<String>,
}

pub fn run_report(args: ReportArgs) -> Result<DealReport, Box<dyn std::error::Error>> {
    let params = resolve_deal(&args.deal)?;
    validate_parameters(&params)?;

    let results = calculate_metrics(&params);
    let non_finite = results.non_finite_metrics();
    let assessment = if non_finite.is_empty() {
        Some(assess_deal(&results))
    } else {
        warn!(
            "leaving out the assessment: non-finite {}",
            non_finite.join(", ")
        );
        None
    };

    let options = ReportOptions {
        prepared_by: args.prepared_by,
        contact_lines: args.contact,
    };
    let report = build_report(&params, &results, assessment.as_ref(), &options);
    info!("built report with {} key metrics", report.key_metrics.len());
    Ok(report)
}
