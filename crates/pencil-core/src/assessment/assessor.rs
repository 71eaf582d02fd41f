use serde::{Deserialize, Serialize};

use crate::underwriting::CalculationResults;

use super::rules::{recommendations_for, DealStatus, Polarity, METRIC_CHECKS, STATUS_RULES};

/// Status, headline message and narrative lists for one deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAssessment {
    pub status: DealStatus,
    pub message: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Map computed metrics to a verdict. Total: every input, NaN included, yields
/// exactly one status.
pub fn assess_deal(metrics: &CalculationResults) -> DealAssessment {
    let rule = STATUS_RULES
        .iter()
        .find(|rule| (rule.applies)(metrics))
        .unwrap_or(&STATUS_RULES[STATUS_RULES.len() - 1]);

    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();

    for check in METRIC_CHECKS {
        let value = (check.metric)(metrics);
        if let Some(tier) = check.tiers.iter().find(|tier| (tier.applies)(value)) {
            match tier.polarity {
                Polarity::Strength => strengths.push(tier.finding.to_string()),
                Polarity::Weakness => weaknesses.push(tier.finding.to_string()),
            }
        }
    }

    DealAssessment {
        status: rule.status,
        message: rule.message.to_string(),
        strengths,
        weaknesses,
        recommendations: recommendations_for(rule.status)
            .iter()
            .map(|r| r.to_string())
            .collect(),
    }
}
