//! Levered underwriting engine: loan amortization, cash flow projection and the
//! metrics built on top of them.

pub mod amortization;
pub mod metrics;
pub mod parameters;
pub mod projection;
pub mod validation;

pub use amortization::{amortization_schedule, monthly_payment, remaining_balance, AmortizationRow};
pub use metrics::{calculate_metrics, CalculationResults, NPV_DISCOUNT_RATE};
pub use parameters::DealParameters;
pub use projection::{project_cash_flows, ProjectionInputs};
pub use validation::{
    validate_parameters, validation_issues, ValidationIssue, MAX_HOLDING_PERIOD,
};
