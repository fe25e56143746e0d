//! Loading the classifier and schema artifacts produced by training
//!
//! Both artifacts are read once at start-up. Any failure here is fatal for the
//! process: without them no request can be served.

use crate::backend::{Classifier, ClassifierError, FeatureRecord};
use crate::backends::forest::ForestModel;
use crate::backends::logistic::LogisticModel;
use crate::metadata::ModelMetadata;
use crate::schema::FeatureSchema;
use serde::{Deserialize, Serialize};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or cross-checking artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("feature schema is empty")]
    EmptySchema,
    #[error("feature schema lists column '{0}' more than once")]
    DuplicateColumn(String),
    #[error("invalid classifier artifact: {0}")]
    InvalidModel(String),
    #[error("classifier and schema disagree: {0}")]
    SchemaDisagreement(#[source] ClassifierError),
}

/// Model family stored in a classifier artifact, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Logistic(LogisticModel),
    Forest(ForestModel),
}

impl ModelSpec {
    fn as_classifier(&self) -> &dyn Classifier {
        match self {
            ModelSpec::Logistic(m) => m,
            ModelSpec::Forest(m) => m,
        }
    }
}

/// Serialized classifier: descriptive metadata plus the fitted model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub metadata: ModelMetadata,
    pub model: ModelSpec,
}

impl ClassifierArtifact {
    pub fn new(metadata: ModelMetadata, model: ModelSpec) -> Result<Self, ArtifactError> {
        let artifact = Self { metadata, model };
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        match &self.model {
            ModelSpec::Logistic(m) => m.validate(),
            ModelSpec::Forest(m) => m.validate(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, ArtifactError> {
        let artifact: Self = serde_json::from_str(text)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Self = serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        artifact.validate()?;
        log::info!(
            "loaded {} classifier {} from {}",
            artifact.model.as_classifier().name(),
            artifact.metadata,
            path.display()
        );
        Ok(artifact)
    }

    pub fn to_json_string(&self) -> Result<String, ArtifactError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Model family name (`logistic` or `forest`)
    pub fn kind(&self) -> &str {
        self.model.as_classifier().name()
    }
}

impl Classifier for ClassifierArtifact {
    fn predict_probability(&self, record: &FeatureRecord) -> Result<f64, ClassifierError> {
        self.model.as_classifier().predict_probability(record)
    }

    fn name(&self) -> &str {
        &self.metadata.name
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.model.as_classifier().feature_names()
    }
}

/// Filesystem locations of the two training artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub classifier: PathBuf,
    pub schema: PathBuf,
}

impl ArtifactPaths {
    pub fn new(classifier: impl Into<PathBuf>, schema: impl Into<PathBuf>) -> Self {
        Self {
            classifier: classifier.into(),
            schema: schema.into(),
        }
    }
}

/// Process-wide, read-only inference state: the schema and the classifier trained on it
pub struct ModelArtifacts {
    schema: FeatureSchema,
    classifier: Box<dyn Classifier>,
}

impl ModelArtifacts {
    /// Pair a schema with a classifier, rejecting the pair if the classifier
    /// records a different training column order
    pub fn new(
        schema: FeatureSchema,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, ArtifactError> {
        if let Some(trained) = classifier.feature_names() {
            let probe = FeatureRecord::new(schema.columns().to_vec(), vec![0.0; schema.len()])
                .map_err(ArtifactError::SchemaDisagreement)?;
            crate::backend::ensure_columns(trained, &probe)
                .map_err(ArtifactError::SchemaDisagreement)?;
        }
        Ok(Self { schema, classifier })
    }

    pub fn load(paths: &ArtifactPaths) -> Result<Self, ArtifactError> {
        let classifier = ClassifierArtifact::load(&paths.classifier)?;
        let schema = FeatureSchema::load(&paths.schema)?;
        Self::new(schema, Box::new(classifier))
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

impl std::fmt::Debug for ModelArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifacts")
            .field("schema", &self.schema)
            .field("classifier", &self.classifier.name())
            .finish()
    }
}
