//! Feature encoding and schema alignment

use crate::input::{Department, RawInputRecord, SalaryLevel};
use attrition_model::{FeatureRecord, FeatureSchema};
use std::collections::HashMap;

pub const SATISFACTION_LEVEL: &str = "satisfaction_level";
pub const LAST_EVALUATION: &str = "last_evaluation";
pub const NUMBER_PROJECT: &str = "number_project";
pub const AVERAGE_MONTHLY_HOURS: &str = "average_monthly_hours";
pub const TIME_SPEND_COMPANY: &str = "time_spend_company";
pub const WORK_ACCIDENT: &str = "Work_accident";
pub const PROMOTION_LAST_5YEARS: &str = "promotion_last_5years";

/// Non-categorical columns, in the order the encoder emits them
pub const NUMERIC_COLUMNS: [&str; 7] = [
    SATISFACTION_LEVEL,
    LAST_EVALUATION,
    NUMBER_PROJECT,
    AVERAGE_MONTHLY_HOURS,
    TIME_SPEND_COMPANY,
    WORK_ACCIDENT,
    PROMOTION_LAST_5YEARS,
];

/// Every column the encoder can produce, before schema alignment
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRecord {
    entries: Vec<(&'static str, f64)>,
}

impl EncodedRecord {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| *name == column)
            .map(|&(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }
}

fn indicator(selected: bool) -> f64 {
    if selected {
        1.0
    } else {
        0.0
    }
}

/// Scale, binarize and one-hot a raw record without regard to any schema
pub fn encode_raw(raw: &RawInputRecord) -> EncodedRecord {
    let mut entries = Vec::with_capacity(
        NUMERIC_COLUMNS.len() + Department::ALL.len() + SalaryLevel::ALL.len(),
    );
    entries.push((SATISFACTION_LEVEL, f64::from(raw.satisfaction_level_pct) / 100.0));
    entries.push((LAST_EVALUATION, f64::from(raw.last_evaluation_pct) / 100.0));
    entries.push((NUMBER_PROJECT, f64::from(raw.number_project)));
    entries.push((AVERAGE_MONTHLY_HOURS, f64::from(raw.average_monthly_hours)));
    entries.push((TIME_SPEND_COMPANY, f64::from(raw.time_spend_company)));
    entries.push((WORK_ACCIDENT, indicator(raw.work_accident)));
    entries.push((PROMOTION_LAST_5YEARS, indicator(raw.promotion_last_5years)));
    for d in Department::ALL {
        entries.push((d.column_name(), indicator(d == raw.department)));
    }
    for s in SalaryLevel::ALL {
        entries.push((s.column_name(), indicator(s == raw.salary)));
    }
    EncodedRecord { entries }
}

/// Project an encoded record onto schema order.
///
/// Schema columns the encoder did not produce are filled with 0; produced
/// columns the schema does not list are dropped.
pub fn reindex(encoded: &EncodedRecord, schema: &FeatureSchema) -> FeatureRecord {
    let produced: HashMap<&str, f64> = encoded.iter().collect();
    let mut filled = 0usize;
    let record: FeatureRecord = schema
        .iter()
        .map(|column| {
            let value = produced.get(column).copied().unwrap_or_else(|| {
                filled += 1;
                0.0
            });
            (column.to_string(), value)
        })
        .collect();
    let dropped = encoded.iter().filter(|(c, _)| !schema.contains(c)).count();
    log::debug!(
        "reindexed {} encoded columns onto {} schema columns ({filled} zero-filled, {dropped} dropped)",
        encoded.len(),
        schema.len()
    );
    record
}

/// Encode a raw record into the classifier's column layout.
///
/// Total and deterministic; the result always has `schema.len()` columns.
pub fn encode(raw: &RawInputRecord, schema: &FeatureSchema) -> FeatureRecord {
    reindex(&encode_raw(raw), schema)
}
