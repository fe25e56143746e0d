//! Classifier capability trait and the record type it scores

use thiserror::Error;

/// Errors that can occur while scoring a record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("schema mismatch: classifier expects {expected} columns, record has {found}")]
    WidthMismatch { expected: usize, found: usize },
    #[error(
        "schema mismatch at column {position}: classifier expects '{expected}', record has '{found}'"
    )]
    ColumnMismatch {
        position: usize,
        expected: String,
        found: String,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("classifier returned an invalid probability: {0}")]
    InvalidProbability(f64),
}

impl ClassifierError {
    /// True when the record's shape disagrees with what the classifier was trained on
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(
            self,
            ClassifierError::WidthMismatch { .. } | ClassifierError::ColumnMismatch { .. }
        )
    }
}

/// A single row of named numeric features in classifier column order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl FeatureRecord {
    pub fn new(columns: Vec<String>, values: Vec<f64>) -> Result<Self, ClassifierError> {
        if columns.len() != values.len() {
            return Err(ClassifierError::InvalidInput(format!(
                "record has {} columns but {} values",
                columns.len(),
                values.len()
            )));
        }
        Ok(Self { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named column, if the record carries it
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

impl FromIterator<(String, f64)> for FeatureRecord {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let (columns, values) = iter.into_iter().unzip();
        Self { columns, values }
    }
}

/// Binary classifier exposing the probability of the positive ("will leave") class
///
/// Implementations must be immutable after construction so one instance can be
/// shared by every request for the lifetime of the process.
pub trait Classifier: Send + Sync {
    /// Probability of the positive class for a single record
    fn predict_probability(&self, record: &FeatureRecord) -> Result<f64, ClassifierError>;

    /// Human-readable identifier of the loaded model
    fn name(&self) -> &str;

    /// Training-time column order, when the artifact records it
    fn feature_names(&self) -> Option<&[String]> {
        None
    }
}

/// Reject a record whose columns differ in count or order from `expected`
pub fn ensure_columns(expected: &[String], record: &FeatureRecord) -> Result<(), ClassifierError> {
    if expected.len() != record.len() {
        return Err(ClassifierError::WidthMismatch {
            expected: expected.len(),
            found: record.len(),
        });
    }
    for (position, (want, got)) in expected.iter().zip(record.columns()).enumerate() {
        if want != got {
            return Err(ClassifierError::ColumnMismatch {
                position,
                expected: want.clone(),
                found: got.clone(),
            });
        }
    }
    Ok(())
}
