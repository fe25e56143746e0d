//! `attrition.toml` loading and `ATTRITION_*` environment overrides

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use attrition_ai::{DecisionError, DecisionThreshold};
use attrition_features::DomainPolicy;
use attrition_model::ArtifactPaths;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "attrition.toml";

pub const ENV_CLASSIFIER: &str = "ATTRITION_CLASSIFIER";
pub const ENV_SCHEMA: &str = "ATTRITION_SCHEMA";
pub const ENV_THRESHOLD: &str = "ATTRITION_THRESHOLD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{var} is not a number: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
    #[error(transparent)]
    Threshold(#[from] DecisionError),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub decision: DecisionConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ArtifactsConfig {
    #[serde(default = "default_classifier_path")]
    pub classifier: PathBuf,
    #[serde(default = "default_schema_path")]
    pub schema: PathBuf,
}

fn default_classifier_path() -> PathBuf {
    PathBuf::from("final_model.json")
}

fn default_schema_path() -> PathBuf {
    PathBuf::from("feature_list.json")
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            classifier: default_classifier_path(),
            schema: default_schema_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DecisionConfig {
    #[serde(default)]
    pub threshold: DecisionThreshold,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Refuse to start when a selectable category has no schema column
    #[serde(default = "default_strict_domain")]
    pub strict_domain: bool,
}

fn default_strict_domain() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            strict_domain: default_strict_domain(),
        }
    }
}

impl Config {
    /// Read a config file; relative artifact paths resolve against its directory
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = parse_config(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.artifacts.classifier = base.join(&config.artifacts.classifier);
            config.artifacts.schema = base.join(&config.artifacts.schema);
        }
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Override settings from `ATTRITION_*` variables as reported by `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(p) = lookup(ENV_CLASSIFIER) {
            self.artifacts.classifier = PathBuf::from(p);
        }
        if let Some(p) = lookup(ENV_SCHEMA) {
            self.artifacts.schema = PathBuf::from(p);
        }
        if let Some(s) = lookup(ENV_THRESHOLD) {
            let value: f64 = s.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_THRESHOLD,
                value: s.clone(),
            })?;
            self.decision.threshold = DecisionThreshold::new(value)?;
        }
        Ok(())
    }

    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::new(&self.artifacts.classifier, &self.artifacts.schema)
    }

    pub fn domain_policy(&self) -> DomainPolicy {
        if self.validation.strict_domain {
            DomainPolicy::Strict
        } else {
            DomainPolicy::Lenient
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "classifier={} schema={} threshold={} strict_domain={}",
            self.artifacts.classifier.display(),
            self.artifacts.schema.display(),
            self.decision.threshold,
            self.validation.strict_domain
        )
    }
}

pub fn parse_config(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    #[test]
    fn empty_config_uses_defaults() {
        let c = parse_config("").unwrap();
        assert_eq!(c, Config::default());
        assert_eq!(c.decision.threshold.value(), 0.30);
        assert_eq!(c.domain_policy(), DomainPolicy::Strict);
    }

    #[test]
    fn parses_all_sections() {
        let c = parse_config(
            r#"
            [artifacts]
            classifier = "models/rf.json"
            schema = "models/features.json"

            [decision]
            threshold = 0.45

            [validation]
            strict_domain = false
            "#,
        )
        .unwrap();
        assert_eq!(c.artifacts.classifier, PathBuf::from("models/rf.json"));
        assert_eq!(c.decision.threshold.value(), 0.45);
        assert_eq!(c.domain_policy(), DomainPolicy::Lenient);
    }

    #[test]
    fn rejects_out_of_range_threshold_and_unknown_keys() {
        assert!(parse_config("[decision]\nthreshold = 1.5\n").is_err());
        assert!(parse_config("[decision]\ncutoff = 0.5\n").is_err());
    }

    #[test]
    fn relative_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[artifacts]\nclassifier = \"m.json\"\n").unwrap();
        let c = Config::load(&path).unwrap();
        assert_eq!(c.artifacts.classifier, dir.path().join("m.json"));
        assert_eq!(c.artifacts.schema, dir.path().join("feature_list.json"));
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [(ENV_THRESHOLD, "0.6"), (ENV_SCHEMA, "/srv/cols.json")]
            .into_iter()
            .collect();
        let mut c = Config::default();
        c.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(c.decision.threshold.value(), 0.6);
        assert_eq!(c.artifacts.schema, PathBuf::from("/srv/cols.json"));
        assert_eq!(c.artifacts.classifier, PathBuf::from("final_model.json"));
    }

    #[test]
    fn bad_env_threshold_is_an_error() {
        let mut c = Config::default();
        let err = c
            .apply_env(|k| (k == ENV_THRESHOLD).then(|| "high".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));

        let err = c
            .apply_env(|k| (k == ENV_THRESHOLD).then(|| "2".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Threshold(_)));
    }

    #[test]
    fn config_round_trips_through_toml() {
        let c = Config::default();
        let text = c.to_toml().unwrap();
        assert!(text.contains("[artifacts]"));
        assert_eq!(parse_config(&text).unwrap(), c);
    }
}
