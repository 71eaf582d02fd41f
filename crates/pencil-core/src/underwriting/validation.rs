use serde::{Deserialize, Serialize};

use crate::error::PencilError;
use crate::PencilResult;

use super::parameters::DealParameters;

/// Longest holding period the engine will project, in years.
pub const MAX_HOLDING_PERIOD: u32 = 100;

/// A single out-of-range field, as reported to callers that list every issue.
///
/// `field` is empty for errors that are not tied to one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub reason: String,
}

impl From<PencilError> for ValidationIssue {
    fn from(err: PencilError) -> Self {
        match err {
            PencilError::InvalidInput { field, reason } => ValidationIssue { field, reason },
            other => ValidationIssue {
                field: String::new(),
                reason: other.to_string(),
            },
        }
    }
}

/// Reject the first out-of-range field, in declaration order.
pub fn validate_parameters(params: &DealParameters) -> PencilResult<()> {
    match validation_issues(params).into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(()),
    }
}

/// Every out-of-range field, in declaration order. Empty when the deal is valid.
pub fn validation_issues(params: &DealParameters) -> Vec<PencilError> {
    let mut issues = Vec::new();

    positive(&mut issues, "purchasePrice", params.purchase_price);
    positive(&mut issues, "annualNOI", params.annual_noi);
    finite(&mut issues, "noiGrowthRate", params.noi_growth_rate);

    if params.holding_period < 1 {
        issues.push(PencilError::invalid(
            "holdingPeriod",
            "Holding period must be at least 1 year",
        ));
    } else if params.holding_period > MAX_HOLDING_PERIOD {
        issues.push(PencilError::invalid(
            "holdingPeriod",
            format!("Holding period cannot exceed {MAX_HOLDING_PERIOD} years"),
        ));
    }

    positive(&mut issues, "exitCapRate", params.exit_cap_rate);
    percentage(&mut issues, "ltv", params.ltv);
    non_negative(&mut issues, "interestRate", params.interest_rate);

    if non_negative(&mut issues, "amortization", params.amortization)
        && params.ltv > 0.0
        && params.amortization == 0.0
    {
        issues.push(PencilError::invalid(
            "amortization",
            "A financed deal needs an amortization term",
        ));
    }

    percentage(&mut issues, "operatingExpenseRatio", params.operating_expense_ratio);

    if non_negative(&mut issues, "ioPeriod", params.io_period)
        && params.io_period > f64::from(params.holding_period)
    {
        issues.push(PencilError::invalid(
            "ioPeriod",
            "Cannot exceed holding period",
        ));
    }

    non_negative(&mut issues, "capexYear1", params.capex_year1);
    non_negative(&mut issues, "capexYear2", params.capex_year2);
    non_negative(&mut issues, "rehabPeriod", params.rehab_period);
    percentage(&mut issues, "rehabVacancy", params.rehab_vacancy);
    percentage(&mut issues, "sellingCosts", params.selling_costs);

    issues
}

fn finite(issues: &mut Vec<PencilError>, field: &str, value: f64) -> bool {
    if value.is_finite() {
        return true;
    }
    issues.push(PencilError::invalid(field, "Must be a finite number"));
    false
}

fn positive(issues: &mut Vec<PencilError>, field: &str, value: f64) -> bool {
    if !finite(issues, field, value) {
        return false;
    }
    if value <= 0.0 {
        issues.push(PencilError::invalid(field, "Must be positive"));
        return false;
    }
    true
}

fn non_negative(issues: &mut Vec<PencilError>, field: &str, value: f64) -> bool {
    if !finite(issues, field, value) {
        return false;
    }
    if value < 0.0 {
        issues.push(PencilError::invalid(field, "Must be at least 0"));
        return false;
    }
    true
}

fn percentage(issues: &mut Vec<PencilError>, field: &str, value: f64) -> bool {
    if !non_negative(issues, field, value) {
        return false;
    }
    if value > 100.0 {
        issues.push(PencilError::invalid(field, "Must be at most 100"));
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: &PencilError) -> &str {
        match err {
            PencilError::InvalidInput { field, .. } => field.as_str(),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_parameters(&DealParameters::default()).is_ok());
    }

    #[test]
    fn test_zero_price_rejected() {
        let params = DealParameters {
            purchase_price: 0.0,
            ..DealParameters::default()
        };
        let err = validate_parameters(&params).unwrap_err();
        assert_eq!(field_of(&err), "purchasePrice");
    }

    #[test]
    fn test_zero_holding_period_rejected() {
        let params = DealParameters {
            holding_period: 0,
            ..DealParameters::default()
        };
        let err = validate_parameters(&params).unwrap_err();
        assert_eq!(field_of(&err), "holdingPeriod");
    }

    #[test]
    fn test_io_period_cannot_exceed_hold() {
        let params = DealParameters {
            io_period: 6.0,
            ..DealParameters::default()
        };
        let err = validate_parameters(&params).unwrap_err();
        assert_eq!(field_of(&err), "ioPeriod");
        assert!(err.to_string().contains("Cannot exceed holding period"));
    }

    #[test]
    fn test_io_period_equal_to_hold_is_allowed() {
        let params = DealParameters {
            io_period: 5.0,
            ..DealParameters::default()
        };
        assert!(validate_parameters(&params).is_ok());
    }

    #[test]
    fn test_percentages_capped_at_100() {
        let params = DealParameters {
            ltv: 100.5,
            selling_costs: 101.0,
            ..DealParameters::default()
        };
        let fields: Vec<String> = validation_issues(&params)
            .iter()
            .map(|e| field_of(e).to_string())
            .collect();
        assert_eq!(fields, vec!["ltv", "sellingCosts"]);
    }

    #[test]
    fn test_non_finite_reported_once() {
        let params = DealParameters {
            noi_growth_rate: f64::NAN,
            capex_year1: f64::INFINITY,
            ..DealParameters::default()
        };
        let issues = validation_issues(&params);
        assert_eq!(issues.len(), 2);
        assert_eq!(field_of(&issues[0]), "noiGrowthRate");
        assert_eq!(field_of(&issues[1]), "capexYear1");
    }

    #[test]
    fn test_financed_deal_needs_amortization() {
        let params = DealParameters {
            amortization: 0.0,
            ..DealParameters::default()
        };
        let err = validate_parameters(&params).unwrap_err();
        assert_eq!(field_of(&err), "amortization");

        let all_cash = DealParameters {
            amortization: 0.0,
            ltv: 0.0,
            ..DealParameters::default()
        };
        assert!(validate_parameters(&all_cash).is_ok());
    }

    #[test]
    fn test_holding_period_upper_bound() {
        let too_long = DealParameters {
            holding_period: MAX_HOLDING_PERIOD + 1,
            ..DealParameters::default()
        };
        let err = validate_parameters(&too_long).unwrap_err();
        assert_eq!(field_of(&err), "holdingPeriod");
        assert!(err.to_string().contains("cannot exceed 100 years"));

        let longest = DealParameters {
            holding_period: MAX_HOLDING_PERIOD,
            ..DealParameters::default()
        };
        assert!(validate_parameters(&longest).is_ok());
    }

    #[test]
    fn test_validation_issue_from_error() {
        let issue = ValidationIssue::from(PencilError::invalid("ltv", "Must be at most 100"));
        assert_eq!(
            issue,
            ValidationIssue {
                field: "ltv".into(),
                reason: "Must be at most 100".into(),
            }
        );

        let other = ValidationIssue::from(PencilError::InsufficientData("no flows".into()));
        assert_eq!(other.field, "");
        assert!(other.reason.contains("no flows"));

        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["field"], "ltv");
        assert_eq!(json["reason"], "Must be at most 100");
    }
}
