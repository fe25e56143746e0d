//! The ordered column list a classifier was trained on

use crate::artifact::ArtifactError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;

/// Training-time feature order. Non-empty, no duplicate names, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<String>) -> Result<Self, ArtifactError> {
        if columns.is_empty() {
            return Err(ArtifactError::EmptySchema);
        }
        let mut seen = HashSet::with_capacity(columns.len());
        for c in &columns {
            if !seen.insert(c.as_str()) {
                return Err(ArtifactError::DuplicateColumn(c.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// Parse a JSON array of column names
    pub fn from_json_str(text: &str) -> Result<Self, ArtifactError> {
        let columns: Vec<String> = serde_json::from_str(text)?;
        Self::new(columns)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let columns: Vec<String> =
            serde_json::from_str(&text).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let schema = Self::new(columns)?;
        log::info!(
            "loaded feature schema with {} columns from {}",
            schema.len(),
            path.display()
        );
        Ok(schema)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = ArtifactError;

    fn try_from(columns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(columns)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.columns
    }
}
