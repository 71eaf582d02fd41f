use std::fmt::Write;

use super::builder::{DealReport, ReportRow};

const PAGE_WIDTH: usize = 72;
const LABEL_WIDTH: usize = 30;

/// Lay a report out as plain text.
pub fn render_text(report: &DealReport) -> String {
    let mut out = String::new();

    centered(&mut out, &report.title);
    centered(&mut out, &report.subtitle);
    if let Some(prepared_by) = &report.prepared_by {
        centered(&mut out, prepared_by);
    }
    out.push_str(&"=".repeat(PAGE_WIDTH));
    out.push('\n');

    banner(&mut out, "Property Details");
    rows(&mut out, &report.property_details);

    banner(&mut out, "Key Performance Metrics");
    rows(&mut out, &report.key_metrics);

    if let Some(assessment) = &report.assessment {
        banner(&mut out, "Deal Analysis");
        out.push_str("Overall Assessment:\n");
        let _ = writeln!(out, "  {}", assessment.overall);
        bullets(&mut out, "Key Strengths:", &assessment.strengths);
        bullets(&mut out, "Areas of Concern:", &assessment.weaknesses);
        bullets(&mut out, "Recommendations:", &assessment.recommendations);
    }

    if !report.footer.is_empty() {
        out.push('\n');
        out.push_str(&"-".repeat(PAGE_WIDTH));
        out.push('\n');
        for line in &report.footer {
            centered(&mut out, line);
        }
    }

    out
}

fn centered(out: &mut String, text: &str) {
    let _ = writeln!(out, "{:^width$}", text, width = PAGE_WIDTH);
}

fn banner(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n[ {title} ]");
    out.push_str(&"-".repeat(PAGE_WIDTH));
    out.push('\n');
}

fn rows(out: &mut String, rows: &[ReportRow]) {
    for row in rows {
        let _ = writeln!(out, "  {:<width$}{}", row.label, row.value, width = LABEL_WIDTH);
    }
}

fn bullets(out: &mut String, heading: &str, items: &[String]) {
    let _ = writeln!(out, "\n{heading}");
    for item in items {
        let _ = writeln!(out, "  • {item}");
    }
}
