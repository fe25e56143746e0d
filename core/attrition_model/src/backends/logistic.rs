//! Logistic regression classifier: p = sigmoid(w·x + b)

use crate::artifact::ArtifactError;
use crate::backend::{ensure_columns, Classifier, ClassifierError, FeatureRecord};
use serde::{Deserialize, Serialize};

/// Logistic function
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    pub fn new(
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, ArtifactError> {
        let model = Self {
            feature_names,
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.feature_names.is_empty() {
            return Err(ArtifactError::InvalidModel(
                "logistic model has no features".into(),
            ));
        }
        if self.coefficients.len() != self.feature_names.len() {
            return Err(ArtifactError::InvalidModel(format!(
                "logistic model has {} coefficients for {} features",
                self.coefficients.len(),
                self.feature_names.len()
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::InvalidModel(
                "logistic model parameters must be finite".into(),
            ));
        }
        Ok(())
    }

    /// Raw margin w·x + b
    pub fn decision_function(&self, record: &FeatureRecord) -> Result<f64, ClassifierError> {
        ensure_columns(&self.feature_names, record)?;
        Ok(record
            .values()
            .iter()
            .zip(self.coefficients.iter())
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.intercept)
    }
}

impl Classifier for LogisticModel {
    fn predict_probability(&self, record: &FeatureRecord) -> Result<f64, ClassifierError> {
        self.decision_function(record).map(sigmoid)
    }

    fn name(&self) -> &str {
        "logistic"
    }

    fn feature_names(&self) -> Option<&[String]> {
        Some(&self.feature_names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["satisfaction_level".into(), "Low".into(), "IT".into()]
    }

    #[test]
    fn logistic_infer() {
        let model = LogisticModel::new(names(), vec![-4.0, 1.5, 0.5], 0.25).unwrap();
        let r = FeatureRecord::new(names(), vec![0.2, 1.0, 0.0]).unwrap();
        // z = -0.8 + 1.5 + 0.0 + 0.25 = 0.95
        let z = model.decision_function(&r).unwrap();
        assert!((z - 0.95).abs() < 1e-12);
        let p = model.predict_probability(&r).unwrap();
        assert!((p - 1.0 / (1.0 + (-0.95f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn zero_margin_is_even_odds() {
        let model = LogisticModel::new(names(), vec![0.0; 3], 0.0).unwrap();
        let r = FeatureRecord::new(names(), vec![1.0, 1.0, 1.0]).unwrap();
        assert_eq!(model.predict_probability(&r).unwrap(), 0.5);
    }

    #[test]
    fn rejects_misaligned_parameters() {
        assert!(matches!(
            LogisticModel::new(names(), vec![1.0], 0.0),
            Err(ArtifactError::InvalidModel(_))
        ));
        assert!(LogisticModel::new(names(), vec![1.0, f64::NAN, 0.0], 0.0).is_err());
        assert!(LogisticModel::new(vec![], vec![], 0.0).is_err());
    }

    #[test]
    fn rejects_reordered_record() {
        let model = LogisticModel::new(names(), vec![1.0; 3], 0.0).unwrap();
        let r = FeatureRecord::new(
            vec!["Low".into(), "satisfaction_level".into(), "IT".into()],
            vec![1.0, 0.2, 0.0],
        )
        .unwrap();
        assert!(model.predict_probability(&r).unwrap_err().is_schema_mismatch());
    }
}
