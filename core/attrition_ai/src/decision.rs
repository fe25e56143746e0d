//! Thresholding the classifier's positive-class probability

use attrition_model::{Classifier, ClassifierError, FeatureRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecisionError {
    /// The record's columns do not match what the classifier was trained on
    #[error("feature record does not match the classifier's training schema: {0}")]
    SchemaMismatch(#[source] ClassifierError),
    #[error(transparent)]
    Classifier(ClassifierError),
    #[error("decision threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
}

impl From<ClassifierError> for DecisionError {
    fn from(e: ClassifierError) -> Self {
        if e.is_schema_mismatch() {
            DecisionError::SchemaMismatch(e)
        } else {
            DecisionError::Classifier(e)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Low,
    High,
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLabel::Low => f.write_str("Low"),
            RiskLabel::High => f.write_str("High"),
        }
    }
}

/// Probability at or above which an employee is flagged high-risk
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DecisionThreshold(f64);

impl DecisionThreshold {
    /// Below the 0.5 midpoint so borderline cases are flagged
    pub const DEFAULT: f64 = 0.30;

    pub fn new(value: f64) -> Result<Self, DecisionError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DecisionError::InvalidThreshold(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn label_for(self, probability: f64) -> RiskLabel {
        if probability >= self.0 {
            RiskLabel::High
        } else {
            RiskLabel::Low
        }
    }
}

impl Default for DecisionThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f64> for DecisionThreshold {
    type Error = DecisionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DecisionThreshold> for f64 {
    fn from(t: DecisionThreshold) -> Self {
        t.0
    }
}

impl fmt::Display for DecisionThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub label: RiskLabel,
    /// Positive-class ("will leave") probability in [0, 1]
    pub probability: f64,
}

impl Decision {
    pub fn is_high_risk(&self) -> bool {
        self.label == RiskLabel::High
    }
}

/// Score `record` and label it against `threshold`.
///
/// A probability outside [0, 1] is reported as an error rather than clamped.
pub fn decide(
    record: &FeatureRecord,
    classifier: &dyn Classifier,
    threshold: DecisionThreshold,
) -> Result<Decision, DecisionError> {
    let probability = classifier.predict_probability(record)?;
    if !(0.0..=1.0).contains(&probability) {
        return Err(ClassifierError::InvalidProbability(probability).into());
    }
    let label = threshold.label_for(probability);
    log::debug!(
        "{} scored {probability:.4} against threshold {threshold} -> {label}",
        classifier.name()
    );
    Ok(Decision { label, probability })
}
