//! Shared fixtures for the integration tests: a training column list and a
//! small logistic classifier written out the way a training run leaves them.

use std::fs;
use std::path::Path;

use attrition_model::{
    ArtifactPaths, ClassifierArtifact, LogisticModel, ModelMetadata, ModelSpec, ModelVersion,
};

/// Column order produced by one-hot encoding in a training notebook
pub const TRAINING_COLUMNS: [&str; 20] = [
    "satisfaction_level",
    "last_evaluation",
    "number_project",
    "average_monthly_hours",
    "time_spend_company",
    "Work_accident",
    "promotion_last_5years",
    "Accounting",
    "Human Resources",
    "IT",
    "Management",
    "Marketing",
    "Product Management",
    "Research & Development",
    "Sales",
    "Support",
    "Technical",
    "High",
    "Low",
    "Medium",
];

pub fn training_columns() -> Vec<String> {
    TRAINING_COLUMNS.iter().map(|c| c.to_string()).collect()
}

/// Logistic model with weight only on satisfaction, hours and salary:
/// `z = -4 * satisfaction + 0.01 * hours - High + Low`
pub fn logistic_artifact(columns: &[String]) -> ClassifierArtifact {
    let coefficients = columns
        .iter()
        .map(|c| match c.as_str() {
            "satisfaction_level" => -4.0,
            "average_monthly_hours" => 0.01,
            "High" => -1.0,
            "Low" => 1.0,
            _ => 0.0,
        })
        .collect();
    let model = LogisticModel::new(columns.to_vec(), coefficients, 0.0)
        .expect("fixture model is valid");
    let metadata = ModelMetadata::new("attrition-logit".to_string(), ModelVersion::new(1, 2, 0))
        .with_tag("dataset".to_string(), "hr_comma_sep".to_string());
    ClassifierArtifact::new(metadata, ModelSpec::Logistic(model)).expect("fixture artifact")
}

/// Write both artifacts into `dir`; the schema file may list a different order than the model
pub fn write_artifacts(
    dir: &Path,
    model_columns: &[String],
    schema_columns: &[String],
) -> ArtifactPaths {
    let classifier = dir.join("final_model.json");
    let schema = dir.join("feature_list.json");
    let artifact = logistic_artifact(model_columns);
    fs::write(&classifier, artifact.to_json_string().expect("serialize model"))
        .expect("write model");
    fs::write(
        &schema,
        serde_json::to_string(schema_columns).expect("serialize schema"),
    )
    .expect("write schema");
    ArtifactPaths::new(classifier, schema)
}

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
