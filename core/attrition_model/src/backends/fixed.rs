//! Stub classifier returning a constant probability

use crate::backend::{ensure_columns, Classifier, ClassifierError, FeatureRecord};

/// Test double that ignores feature values and always reports the same probability
#[derive(Debug, Clone)]
pub struct FixedProbability {
    probability: f64,
    expected_columns: Option<Vec<String>>,
}

impl FixedProbability {
    pub fn new(probability: f64) -> Self {
        Self {
            probability,
            expected_columns: None,
        }
    }

    /// Reject records whose columns differ from `columns`, like a trained model would
    pub fn expecting(mut self, columns: Vec<String>) -> Self {
        self.expected_columns = Some(columns);
        self
    }
}

impl Classifier for FixedProbability {
    fn predict_probability(&self, record: &FeatureRecord) -> Result<f64, ClassifierError> {
        if let Some(expected) = &self.expected_columns {
            ensure_columns(expected, record)?;
        }
        Ok(self.probability)
    }

    fn name(&self) -> &str {
        "fixed"
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.expected_columns.as_deref()
    }
}
