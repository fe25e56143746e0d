//! Text and JSON presentation of assessments and start-up checks

use attrition_ai::{Assessment, DecisionThreshold, Predictor};
use attrition_features::DomainReport;
use serde::Serialize;

const CHART_WIDTH: usize = 32;

/// Machine-readable prediction output
#[derive(Debug, Serialize)]
pub struct PredictionReport<'a> {
    pub model: &'a str,
    pub threshold: f64,
    #[serde(flatten)]
    pub assessment: &'a Assessment,
}

impl<'a> PredictionReport<'a> {
    pub fn new(model: &'a str, threshold: DecisionThreshold, assessment: &'a Assessment) -> Self {
        Self {
            model,
            threshold: threshold.value(),
            assessment,
        }
    }
}

pub fn render_text(assessment: &Assessment) -> String {
    let mut out = assessment.guidance.banner(&assessment.decision);
    out.push_str("\n\nRecommended actions:\n");
    for action in assessment.guidance.actions {
        out.push_str(&format!("  - {action}\n"));
    }
    out.push_str("\nInput Summary\n");
    for line in assessment.summary.render_ascii(CHART_WIDTH) {
        out.push_str("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub fn render_json(report: &PredictionReport<'_>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn render_check(predictor: &Predictor) -> String {
    let mut out = format!(
        "classifier: {}\nschema columns: {}\nthreshold: {}\n",
        predictor.classifier().name(),
        predictor.schema().len(),
        predictor.threshold()
    );
    out.push_str(&render_domain(predictor.domain_report()));
    out
}

fn render_domain(report: &DomainReport) -> String {
    if report.is_clean() {
        return "domain: every input column is represented in the schema\n".to_string();
    }
    let mut out = String::new();
    if !report.missing_categories.is_empty() {
        out.push_str(&format!(
            "warning: no indicator column for {}\n",
            report.missing_categories.join(", ")
        ));
    }
    if !report.missing_numeric.is_empty() {
        out.push_str(&format!(
            "note: schema omits {}\n",
            report.missing_numeric.join(", ")
        ));
    }
    if !report.unproduced.is_empty() {
        out.push_str(&format!(
            "note: always zero-filled: {}\n",
            report.unproduced.join(", ")
        ));
    }
    out
}
