//! Storage trait definitions

use crate::graph::{Iri, Quad, Term};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid stored term: {0}")]
    InvalidTerm(String),

    #[error("Date parsing error: {0}")]
    DateParse(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Graph pattern over quads; `None` positions are unbound
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadPattern {
    pub graph: Option<Iri>,
    pub subject: Option<Iri>,
    pub predicate: Option<Iri>,
    pub object: Option<Term>,
    /// Maximum number of results
    pub limit: Option<usize>,
}

impl QuadPattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_graph(mut self, graph: impl Into<Iri>) -> Self {
        self.graph = Some(graph.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<Iri>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_predicate(mut self, predicate: impl Into<Iri>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    pub fn with_object(mut self, object: impl Into<Term>) -> Self {
        self.object = Some(object.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A single mutation inside an atomic update batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphUpdate {
    /// Insert quads (duplicates are ignored)
    Insert(Vec<Quad>),
    /// Delete every quad matching the pattern
    Delete(QuadPattern),
    /// Drop a whole named graph; absent graphs are a no-op
    DropGraph(Iri),
}

/// Trait for quad store backends
///
/// Implementations must be thread-safe (Send + Sync) to support
/// concurrent access from multiple threads.
pub trait TripleStore: Send + Sync {
    // === Reads ===

    /// Return every quad matching the pattern
    fn find(&self, pattern: &QuadPattern) -> StorageResult<Vec<Quad>>;

    /// Whether at least one quad matches the pattern
    fn ask(&self, pattern: &QuadPattern) -> StorageResult<bool>;

    /// List the names of all non-empty graphs
    fn graphs(&self) -> StorageResult<Vec<Iri>>;

    /// Whether the graph holds at least one quad
    fn contains_graph(&self, graph: &Iri) -> StorageResult<bool> {
        self.ask(&QuadPattern::new().in_graph(graph.clone()))
    }

    // === Writes ===

    /// Apply a batch of updates atomically: either all of them take effect or none
    fn apply(&self, updates: &[GraphUpdate]) -> StorageResult<()>;

    fn insert(&self, quads: &[Quad]) -> StorageResult<()> {
        self.apply(&[GraphUpdate::Insert(quads.to_vec())])
    }

    fn delete(&self, pattern: &QuadPattern) -> StorageResult<()> {
        self.apply(&[GraphUpdate::Delete(pattern.clone())])
    }

    /// Drop a graph; returns whether it existed
    fn drop_graph(&self, graph: &Iri) -> StorageResult<bool> {
        let existed = self.contains_graph(graph)?;
        self.apply(&[GraphUpdate::DropGraph(graph.clone())])?;
        Ok(existed)
    }
}

/// Extension trait for opening stores from paths
pub trait OpenStore: TripleStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
