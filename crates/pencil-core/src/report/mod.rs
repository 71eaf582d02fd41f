//! Formatted deal report: property details, key metrics and the assessment
//! narrative, renderable as plain text.

mod builder;
pub mod format;
mod render;

pub use builder::{
    build_report, AssessmentSection, DealReport, ReportOptions, ReportRow, REPORT_SUBTITLE,
    REPORT_TITLE,
};
pub use render::render_text;
