//! Errors surfaced by the vocabulary core

use crate::config::ConfigError;
use crate::graph::Iri;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur in termgraph operations
#[derive(Debug, Error)]
pub enum TermGraphError {
    /// Several non-derived graphs hold the vocabulary and none is canonical
    #[error("Ambiguous context for vocabulary {vocabulary}: candidates {}", join(.candidates))]
    AmbiguousVocabularyContext {
        vocabulary: Iri,
        candidates: Vec<Iri>,
    },

    #[error("{kind} not found: {iri}")]
    NotFound { kind: &'static str, iri: Iri },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A snapshot graph with the same identifier already exists
    #[error("Snapshot already exists: {0}")]
    SnapshotConflict(Iri),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TermGraphError {
    pub fn not_found(kind: &'static str, iri: &Iri) -> Self {
        TermGraphError::NotFound {
            kind,
            iri: iri.clone(),
        }
    }
}

fn join(iris: &[Iri]) -> String {
    iris.iter()
        .map(|i| format!("<{}>", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for termgraph operations
pub type TermGraphResult<T> = Result<T, TermGraphError>;
