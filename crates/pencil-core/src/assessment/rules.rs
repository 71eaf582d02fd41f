//! Threshold tables behind the deal assessment.
//!
//! Every table is evaluated top to bottom and the first matching row wins. A
//! final catch-all row keeps each table total, NaN included.

use serde::{Deserialize, Serialize};

use crate::underwriting::CalculationResults;

/// Overall verdict on a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealStatus {
    Good,
    Moderate,
    Poor,
}

impl DealStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStatus::Good => "good",
            DealStatus::Moderate => "moderate",
            DealStatus::Poor => "poor",
        }
    }
}

/// One row of the status table.
pub struct StatusRule {
    pub applies: fn(&CalculationResults) -> bool,
    pub status: DealStatus,
    pub message: &'static str,
}

pub const STATUS_RULES: &[StatusRule] = &[
    StatusRule {
        applies: |m| m.dscr >= 1.25 && m.irr >= 15.0 && m.cash_on_cash >= 8.0,
        status: DealStatus::Good,
        message: "This deal shows strong potential with good cash flow coverage and returns.",
    },
    StatusRule {
        applies: |m| m.dscr >= 1.1 && m.irr >= 10.0 && m.cash_on_cash >= 6.0,
        status: DealStatus::Moderate,
        message: "This deal shows moderate potential but careful consideration is needed.",
    },
    StatusRule {
        applies: |_| true,
        status: DealStatus::Poor,
        message: "This deal shows concerning metrics and requires significant review.",
    },
];

/// Whether a finding counts for or against the deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Strength,
    Weakness,
}

/// One tier of a per-metric check.
pub struct Tier {
    pub applies: fn(f64) -> bool,
    pub polarity: Polarity,
    pub finding: &'static str,
}

/// A metric and its ordered tiers.
pub struct MetricCheck {
    pub metric: fn(&CalculationResults) -> f64,
    pub tiers: &'static [Tier],
}

pub const METRIC_CHECKS: &[MetricCheck] = &[
    MetricCheck {
        metric: |m| m.irr,
        tiers: &[
            Tier {
                applies: |v| v > 15.0,
                polarity: Polarity::Strength,
                finding: "Strong IRR indicating excellent potential returns",
            },
            Tier {
                applies: |v| v > 10.0,
                polarity: Polarity::Strength,
                finding: "Acceptable IRR within market expectations",
            },
            Tier {
                applies: |_| true,
                polarity: Polarity::Weakness,
                finding: "Below-market IRR suggests potential return challenges",
            },
        ],
    },
    MetricCheck {
        metric: |m| m.dscr,
        tiers: &[
            Tier {
                applies: |v| v > 1.25,
                polarity: Polarity::Strength,
                finding: "Strong debt service coverage provides safety margin",
            },
            Tier {
                applies: |v| v > 1.1,
                polarity: Polarity::Weakness,
                finding: "Tight debt service coverage - monitor cash flows carefully",
            },
            Tier {
                applies: |_| true,
                polarity: Polarity::Weakness,
                finding: "Concerning debt service coverage - high default risk",
            },
        ],
    },
    MetricCheck {
        metric: |m| m.cash_on_cash,
        tiers: &[
            Tier {
                applies: |v| v > 8.0,
                polarity: Polarity::Strength,
                finding: "Excellent cash-on-cash return",
            },
            Tier {
                applies: |v| v > 6.0,
                polarity: Polarity::Strength,
                finding: "Decent cash flow generation potential",
            },
            Tier {
                applies: |_| true,
                polarity: Polarity::Weakness,
                finding: "Limited cash flow potential",
            },
        ],
    },
    MetricCheck {
        metric: |m| m.break_even_occupancy,
        tiers: &[
            Tier {
                applies: |v| v < 0.75,
                polarity: Polarity::Strength,
                finding: "Low break-even occupancy provides good downside protection",
            },
            Tier {
                applies: |v| v < 0.85,
                polarity: Polarity::Weakness,
                finding: "Moderate break-even occupancy - limited vacancy buffer",
            },
            Tier {
                applies: |_| true,
                polarity: Polarity::Weakness,
                finding: "High break-even occupancy increases risk profile",
            },
        ],
    },
];

/// Fixed recommendation set per status.
pub fn recommendations_for(status: DealStatus) -> &'static [&'static str] {
    match status {
        DealStatus::Good => &[
            "Strong acquisition target with multiple positive indicators",
            "Consider locking in long-term fixed-rate debt",
            "Implement value-add strategies to further enhance returns",
        ],
        DealStatus::Moderate => &[
            "Deal shows promise but requires risk mitigation",
            "Negotiate purchase price to improve returns",
            "Explore ways to enhance NOI through operational improvements",
        ],
        DealStatus::Poor => &[
            "Consider passing on this opportunity",
            "If pursuing, substantial price reduction needed",
            "Major operational improvements required to make numbers work",
        ],
    }
}
