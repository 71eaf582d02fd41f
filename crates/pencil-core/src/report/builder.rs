use serde::{Deserialize, Serialize};

use crate::assessment::DealAssessment;
use crate::underwriting::{CalculationResults, DealParameters};

use super::format::{
    format_currency, format_multiple, format_percent, format_ratio, format_ratio_as_percent,
};

pub const REPORT_TITLE: &str = "Commercial Real Estate Investment Analysis";
pub const REPORT_SUBTITLE: &str = "Does My Deal Pencil?";
const CONTACT_PREAMBLE: &str = "For more information or to discuss financing options, contact:";

/// Who the report is prepared by and how to reach them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOptions {
    #[serde(default)]
    pub prepared_by: Option<String>,
    #[serde(default)]
    pub contact_lines: Vec<String>,
}

/// A label / formatted value pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

impl ReportRow {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSection {
    pub overall: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Fully formatted report, ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealReport {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepared_by: Option<String>,
    pub property_details: Vec<ReportRow>,
    pub key_metrics: Vec<ReportRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<AssessmentSection>,
    pub footer: Vec<String>,
}

/// Assemble the report sections. The analysis section is left out when no
/// assessment is available.
pub fn build_report(
    params: &DealParameters,
    results: &CalculationResults,
    assessment: Option<&DealAssessment>,
    options: &ReportOptions,
) -> DealReport {
    let property_details = vec![
        ReportRow::new("Purchase Price", format_currency(params.purchase_price)),
        ReportRow::new("Annual NOI", format_currency(params.annual_noi)),
        ReportRow::new("NOI Growth Rate", format_percent(params.noi_growth_rate)),
        ReportRow::new("Holding Period", format!("{} years", params.holding_period)),
        ReportRow::new("Exit Cap Rate", format_percent(params.exit_cap_rate)),
        ReportRow::new("Interest Rate", format_percent(params.interest_rate)),
        ReportRow::new("Amortization", format!("{} years", params.amortization)),
        ReportRow::new("LTV", format_percent(params.ltv)),
    ];

    let key_metrics = vec![
        ReportRow::new("Cash on Cash Return", format_percent(results.cash_on_cash)),
        ReportRow::new("Cap Rate", format_percent(results.cap_rate)),
        ReportRow::new("Equity Multiple", format_multiple(results.equity_multiple)),
        ReportRow::new("IRR", format_percent(results.irr)),
        ReportRow::new("Debt Service Coverage", format_ratio(results.dscr)),
        ReportRow::new(
            "Break-even Occupancy",
            format_ratio_as_percent(results.break_even_occupancy),
        ),
        ReportRow::new("NPV", format_currency(results.npv)),
    ];

    let assessment = assessment.map(|a| AssessmentSection {
        overall: a.message.clone(),
        strengths: a.strengths.clone(),
        weaknesses: a.weaknesses.clone(),
        recommendations: a.recommendations.clone(),
    });

    let mut footer = Vec::new();
    if !options.contact_lines.is_empty() {
        footer.push(CONTACT_PREAMBLE.to_string());
        footer.extend(options.contact_lines.iter().cloned());
    }

    DealReport {
        title: REPORT_TITLE.to_string(),
        subtitle: REPORT_SUBTITLE.to_string(),
        prepared_by: options
            .prepared_by
            .as_ref()
            .map(|name| format!("Prepared by {name}")),
        property_details,
        key_metrics,
        assessment,
        footer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::assess_deal;
    use crate::underwriting::calculate_metrics;

    fn value_of<'a>(rows: &'a [ReportRow], label: &str) -> &'a str {
        rows.iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
            .unwrap_or_else(|| panic!("missing row {label}"))
    }

    #[test]
    fn test_default_deal_report_rows() {
        let params = DealParameters::default();
        let results = calculate_metrics(&params);
        let assessment = assess_deal(&results);
        let report = build_report(&params, &results, Some(&assessment), &ReportOptions::default());

        assert_eq!(value_of(&report.property_details, "Purchase Price"), "$1,750,000");
        assert_eq!(value_of(&report.property_details, "Holding Period"), "5 years");
        assert_eq!(value_of(&report.property_details, "Amortization"), "25 years");
        assert_eq!(value_of(&report.property_details, "LTV"), "75.00%");

        assert_eq!(value_of(&report.key_metrics, "Cap Rate"), "17.14%");
        assert_eq!(value_of(&report.key_metrics, "Equity Multiple"), "2.92x");
        assert_eq!(value_of(&report.key_metrics, "IRR"), "36.30%");
        assert_eq!(value_of(&report.key_metrics, "Debt Service Coverage"), "2.82");
        assert_eq!(value_of(&report.key_metrics, "Break-even Occupancy"), "53.89%");
        assert_eq!(value_of(&report.key_metrics, "NPV"), "$2,016,148");
    }

    #[test]
    fn test_header_and_footer_follow_options() {
        let params = DealParameters::default();
        let results = calculate_metrics(&params);

        let bare = build_report(&params, &results, None, &ReportOptions::default());
        assert_eq!(bare.prepared_by, None);
        assert!(bare.footer.is_empty());
        assert!(bare.assessment.is_none());

        let options = ReportOptions {
            prepared_by: Some("Acme Capital".into()),
            contact_lines: vec!["Jane Doe | jane@example.com".into()],
        };
        let report = build_report(&params, &results, None, &options);
        assert_eq!(report.prepared_by.as_deref(), Some("Prepared by Acme Capital"));
        assert_eq!(report.footer.len(), 2);
        assert_eq!(report.footer[0], CONTACT_PREAMBLE);
    }
}
