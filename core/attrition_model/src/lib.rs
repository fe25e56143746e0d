//! Model artifacts and pluggable classifier backends for the attrition predictor
//!
//! The classifier is an opaque capability: anything implementing [`Classifier`]
//! can score a [`FeatureRecord`] laid out in the order of a [`FeatureSchema`].
//! Production classifiers are read from a JSON artifact produced by the
//! training pipeline; [`FixedProbability`] stands in for them in tests.

pub mod artifact;
pub mod backend;
pub mod backends;
pub mod metadata;
pub mod schema;

pub use artifact::{ArtifactError, ArtifactPaths, ClassifierArtifact, ModelArtifacts, ModelSpec};
pub use backend::{Classifier, ClassifierError, FeatureRecord};
pub use backends::fixed::FixedProbability;
pub use backends::forest::{DecisionTree, ForestModel, TreeNode};
pub use backends::logistic::LogisticModel;
pub use metadata::{ModelMetadata, ModelVersion};
pub use schema::FeatureSchema;
