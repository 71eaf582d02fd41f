use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use pencil_core::assessment::DealAssessment;
use pencil_core::report::{DealReport, ReportOptions};
use pencil_core::underwriting::{CalculationResults, DealParameters, ValidationIssue};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_deal(params_json: &str) -> NapiResult<DealParameters> {
    DealParameters::from_json_str(params_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Underwriting
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_deal(params_json: String) -> NapiResult<String> {
    let params = parse_deal(&params_json)?;
    let output = pencil_core::analysis::analyze_deal(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_metrics(params_json: String) -> NapiResult<String> {
    let params = parse_deal(&params_json)?;
    let results = pencil_core::underwriting::calculate_metrics(&params);
    serde_json::to_string(&results).map_err(to_napi_error)
}

#[napi]
pub fn validate_parameters(params_json: String) -> NapiResult<String> {
    let params = parse_deal(&params_json)?;
    let issues: Vec<ValidationIssue> = pencil_core::underwriting::validation_issues(&params)
        .into_iter()
        .map(ValidationIssue::from)
        .collect();
    serde_json::to_string(&issues).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_deal(metrics_json: String) -> NapiResult<String> {
    let metrics: CalculationResults =
        serde_json::from_str(&metrics_json).map_err(to_napi_error)?;
    let assessment: DealAssessment = pencil_core::assessment::assess_deal(&metrics);
    serde_json::to_string(&assessment).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportRequest {
    params: DealParameters,
    #[serde(default)]
    options: ReportOptions,
}

#[napi]
pub fn build_report(request_json: String) -> NapiResult<String> {
    let request: ReportRequest = serde_json::from_str(&request_json).map_err(to_napi_error)?;
    pencil_core::underwriting::validate_parameters(&request.params).map_err(to_napi_error)?;

    let results = pencil_core::underwriting::calculate_metrics(&request.params);
    let assessment = results
        .non_finite_metrics()
        .is_empty()
        .then(|| pencil_core::assessment::assess_deal(&results));

    let report = pencil_core::report::build_report(
        &request.params,
        &results,
        assessment.as_ref(),
        &request.options,
    );
    serde_json::to_string(&report).map_err(to_napi_error)
}

#[napi]
pub fn render_report(report_json: String) -> NapiResult<String> {
    let report: DealReport = serde_json::from_str(&report_json).map_err(to_napi_error)?;
    Ok(pencil_core::report::render_text(&report))
}
