use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::assessment::{assess_deal, DealAssessment};
use crate::types::{with_metadata, ComputationOutput};
use crate::underwriting::{calculate_metrics, validate_parameters, CalculationResults, DealParameters};
use crate::PencilResult;

const METHODOLOGY: &str = "Commercial Real Estate Deal Underwriting (Levered DCF)";

/// Metrics plus the qualitative verdict. `assessment` is `None` when a headline
/// metric is not finite and the deal cannot be assessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAnalysis {
    pub metrics: CalculationResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<DealAssessment>,
}

/// Validate, underwrite and assess a deal.
///
/// Returns a `ComputationOutput<DealAnalysis>` with warnings for solver
/// non-convergence, non-finite metrics and risky structures.
pub fn analyze_deal(params: &DealParameters) -> PencilResult<ComputationOutput<DealAnalysis>> {
    let start = Instant::now();

    validate_parameters(params)?;

    let metrics = calculate_metrics(params);
    let mut warnings = collect_warnings(params, &metrics);

    let non_finite = metrics.non_finite_metrics();
    let assessment = if non_finite.is_empty() {
        Some(assess_deal(&metrics))
    } else {
        warnings.push(format!(
            "Unable to assess: non-finite {}",
            non_finite.join(", ")
        ));
        None
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        METHODOLOGY,
        params,
        warnings,
        elapsed,
        DealAnalysis {
            metrics,
            assessment,
        },
    ))
}

fn collect_warnings(params: &DealParameters, metrics: &CalculationResults) -> Vec<String> {
    let mut warnings = Vec::new();

    if !metrics.irr_converged {
        warnings.push(format!(
            "IRR did not converge after {} iterations — {:.2}% is a best-effort estimate",
            metrics.irr_iterations, metrics.irr
        ));
    }

    if params.io_period > 0.0 {
        warnings.push(format!(
            "Interest-only period of {} years: the amortizing payment stays at the {}-year schedule and is not re-amortized afterwards",
            params.io_period, params.amortization
        ));
    }

    if metrics.dscr < 1.0 {
        warnings.push(format!(
            "DSCR of {:.2} is below 1.00x — NOI does not cover debt service",
            metrics.dscr
        ));
    }

    if params.ltv > 80.0 {
        warnings.push(format!(
            "LTV of {:.1}% exceeds 80% — high leverage",
            params.ltv
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::DealStatus;
    use crate::error::PencilError;

    #[test]
    fn test_default_deal_analysis() {
        let out = analyze_deal(&DealParameters::default()).unwrap();
        assert_eq!(out.methodology, METHODOLOGY);
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
        let assessment = out.result.assessment.unwrap();
        assert_eq!(assessment.status, DealStatus::Good);
    }

    #[test]
    fn test_assumptions_echo_input() {
        let out = analyze_deal(&DealParameters::default()).unwrap();
        assert_eq!(out.assumptions["purchasePrice"], 1_750_000.0);
        assert_eq!(out.assumptions["holdingPeriod"], 5);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let params = DealParameters {
            exit_cap_rate: 0.0,
            ..DealParameters::default()
        };
        match analyze_deal(&params) {
            Err(PencilError::InvalidInput { field, .. }) => assert_eq!(field, "exitCapRate"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_io_period_warning() {
        let params = DealParameters {
            io_period: 2.0,
            ..DealParameters::default()
        };
        let out = analyze_deal(&params).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Interest-only")));
    }

    #[test]
    fn test_high_leverage_and_low_coverage_warnings() {
        let params = DealParameters {
            ltv: 95.0,
            interest_rate: 12.0,
            annual_noi: 150_000.0,
            ..DealParameters::default()
        };
        let out = analyze_deal(&params).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("exceeds 80%")));
        assert!(out.warnings.iter().any(|w| w.contains("DSCR")));
    }

    #[test]
    fn test_all_cash_deal_cannot_be_assessed() {
        let params = DealParameters {
            ltv: 0.0,
            ..DealParameters::default()
        };
        let out = analyze_deal(&params).unwrap();
        assert!(out.result.assessment.is_none());
        assert!(out.warnings.iter().any(|w| w.starts_with("Unable to assess")));
    }
}
