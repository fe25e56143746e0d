//! Start-up check that the schema can represent every selectable value

use crate::encoder::NUMERIC_COLUMNS;
use crate::input::{Department, SalaryLevel};
use attrition_model::FeatureSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error(
        "schema has no indicator column for selectable value(s): {}; \
         every request with these values would encode an all-zero group",
        .0.join(", ")
    )]
    MissingIndicatorColumns(Vec<String>),
}

/// What to do when a selectable category has no schema column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainPolicy {
    /// Refuse to start
    #[default]
    Strict,
    /// Log a warning and serve requests anyway
    Lenient,
}

/// Outcome of comparing the encoder's column domain with a schema
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DomainReport {
    /// Department or salary indicators the schema lacks
    pub missing_categories: Vec<String>,
    /// Numeric columns the schema lacks (dropped by feature selection)
    pub missing_numeric: Vec<String>,
    /// Schema columns the encoder never produces; always zero-filled
    pub unproduced: Vec<String>,
}

impl DomainReport {
    pub fn is_clean(&self) -> bool {
        self.missing_categories.is_empty()
            && self.missing_numeric.is_empty()
            && self.unproduced.is_empty()
    }
}

/// Compare every column the encoder can emit against `schema`
pub fn check_domain(
    schema: &FeatureSchema,
    policy: DomainPolicy,
) -> Result<DomainReport, DomainError> {
    let categories = Department::ALL
        .iter()
        .map(|d| d.column_name())
        .chain(SalaryLevel::ALL.iter().map(|s| s.column_name()));

    let mut report = DomainReport::default();
    let mut produced = Vec::with_capacity(NUMERIC_COLUMNS.len() + 13);
    for column in categories {
        produced.push(column);
        if !schema.contains(column) {
            report.missing_categories.push(column.to_string());
        }
    }
    for column in NUMERIC_COLUMNS {
        produced.push(column);
        if !schema.contains(column) {
            report.missing_numeric.push(column.to_string());
        }
    }
    report.unproduced = schema
        .iter()
        .filter(|c| !produced.contains(c))
        .map(str::to_string)
        .collect();

    if !report.missing_numeric.is_empty() {
        log::warn!(
            "schema omits numeric feature(s) {}; they will be ignored",
            report.missing_numeric.join(", ")
        );
    }
    if !report.unproduced.is_empty() {
        log::warn!(
            "schema column(s) {} are never produced by the encoder and will always be 0",
            report.unproduced.join(", ")
        );
    }
    if !report.missing_categories.is_empty() {
        match policy {
            DomainPolicy::Strict => {
                return Err(DomainError::MissingIndicatorColumns(
                    report.missing_categories,
                ))
            }
            DomainPolicy::Lenient => log::warn!(
                "schema has no indicator for {}; those selections will encode as all-zero groups",
                report.missing_categories.join(", ")
            ),
        }
    }
    Ok(report)
}
