//! Qualitative deal assessment driven by fixed threshold tables.

mod assessor;
pub mod rules;

pub use assessor::{assess_deal, DealAssessment};
pub use rules::DealStatus;
