//! End-to-end assessment of one submission
//!
//! [`Predictor::initialize`] is the single start-up step: it loads both
//! artifacts, checks the schema against the selectable categories and fixes
//! the threshold. After that the predictor is read-only and every call to
//! [`Predictor::assess`] is independent.

use crate::decision::{decide, Decision, DecisionError, DecisionThreshold};
use crate::guidance::{guidance_for, Guidance};
use crate::summary::InputSummary;
use attrition_features::{
    check_domain, encode, DomainError, DomainPolicy, DomainReport, RawInputRecord,
};
use attrition_model::{ArtifactError, ArtifactPaths, Classifier, FeatureSchema, ModelArtifacts};
use serde::Serialize;
use thiserror::Error;

/// Failures that prevent the predictor from serving any request
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Everything shown to the user for one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    #[serde(flatten)]
    pub decision: Decision,
    pub guidance: Guidance,
    pub summary: InputSummary,
}

/// Encode, score and explain one raw record
pub fn assess(
    raw: &RawInputRecord,
    schema: &FeatureSchema,
    classifier: &dyn Classifier,
    threshold: DecisionThreshold,
) -> Result<Assessment, DecisionError> {
    let record = encode(raw, schema);
    let decision = decide(&record, classifier, threshold)?;
    Ok(Assessment {
        decision,
        guidance: guidance_for(decision.label),
        summary: InputSummary::from_raw(raw),
    })
}

pub struct Predictor {
    artifacts: ModelArtifacts,
    threshold: DecisionThreshold,
    domain: DomainReport,
}

impl Predictor {
    /// Load artifacts from disk and validate them; any error here is fatal
    pub fn initialize(
        paths: &ArtifactPaths,
        threshold: DecisionThreshold,
        policy: DomainPolicy,
    ) -> Result<Self, StartupError> {
        let artifacts = ModelArtifacts::load(paths)?;
        Self::from_artifacts(artifacts, threshold, policy)
    }

    pub fn from_artifacts(
        artifacts: ModelArtifacts,
        threshold: DecisionThreshold,
        policy: DomainPolicy,
    ) -> Result<Self, StartupError> {
        let domain = check_domain(artifacts.schema(), policy)?;
        log::info!(
            "predictor ready: classifier '{}', {} schema columns, threshold {threshold}",
            artifacts.classifier().name(),
            artifacts.schema().len()
        );
        Ok(Self {
            artifacts,
            threshold,
            domain,
        })
    }

    pub fn assess(&self, raw: &RawInputRecord) -> Result<Assessment, DecisionError> {
        assess(
            raw,
            self.artifacts.schema(),
            self.artifacts.classifier(),
            self.threshold,
        )
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.artifacts.schema()
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.artifacts.classifier()
    }

    pub fn threshold(&self) -> DecisionThreshold {
        self.threshold
    }

    /// Start-up comparison of the schema with the encoder's column domain
    pub fn domain_report(&self) -> &DomainReport {
        &self.domain
    }
}
