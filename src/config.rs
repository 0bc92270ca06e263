//! Deployment configuration, loaded from YAML
//!
//! ```yaml
//! context_cache: true
//! relations:
//!   strategy: recursive
//!   skos_relations: [related_match, exact_match]
//! snapshot:
//!   separator: /version
//! ```

use crate::graph::Iri;
use crate::relation::{RelationSet, RelationStrategy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wrap the repository context mapper in the bulk-loaded cache
    pub context_cache: bool,
    pub relations: RelationConfig,
    pub snapshot: SnapshotConfig,
    pub drop_queue: DropQueueConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context_cache: true,
            relations: RelationConfig::default(),
            snapshot: SnapshotConfig::default(),
            drop_queue: DropQueueConfig::default(),
        }
    }
}

/// How related vocabularies are discovered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationConfig {
    pub strategy: RelationStrategy,
    /// Mapping predicates followed when a caller does not name any
    pub skos_relations: RelationSet,
    /// Graph maintained by the external modeling tool; required by `external_link`
    pub external_link_graph: Option<Iri>,
}

impl Default for RelationConfig {
    fn default() -> Self {
        Self {
            strategy: RelationStrategy::Recursive,
            skos_relations: RelationSet::default(),
            external_link_graph: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Inserted between the source IRI and the timestamp: `<iri><separator>/<timestamp>`
    pub separator: String,
    /// Mapping predicates that pull related vocabularies into a cascade
    pub cascade_relations: RelationSet,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            separator: "/version".to_string(),
            cascade_relations: RelationSet::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropQueueConfig {
    pub flush_interval_secs: u64,
}

impl Default for DropQueueConfig {
    fn default() -> Self {
        Self {
            flush_interval_secs: 60,
        }
    }
}

impl DropQueueConfig {
    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_secs)
    }
}

impl Config {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let separator = &self.snapshot.separator;
        if separator.is_empty() || separator.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid(format!(
                "snapshot separator '{}' must be non-empty and contain no whitespace",
                separator
            )));
        }
        if self.relations.strategy == RelationStrategy::ExternalLink
            && self.relations.external_link_graph.is_none()
        {
            return Err(ConfigError::Invalid(
                "external_link strategy requires relations.external_link_graph".to_string(),
            ));
        }
        if self.drop_queue.flush_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "drop_queue.flush_interval_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
