//! termgraph: SKOS vocabulary contexts and cascading snapshots
//!
//! Vocabularies live in named graphs of a quad store. This crate answers
//! which graph currently holds a vocabulary, which vocabularies are related
//! to one another, and it freezes a vocabulary together with its related
//! vocabularies into immutable, timestamped snapshot graphs.
//!
//! # Core Concepts
//!
//! - **Contexts**: named graphs holding a vocabulary. A vocabulary may be
//!   declared in several; derivation links pick the canonical one.
//! - **Workspaces**: overlays that redirect vocabularies to working copies
//! - **Related vocabularies**: closure over SKOS mapping links and imports
//! - **Snapshots**: `<iri><separator>/<timestamp>` copies sharing one timestamp
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use termgraph::{Config, Iri, OpenStore, SqliteStore, TermGraphApi};
//!
//! let store = Arc::new(SqliteStore::open_in_memory().unwrap());
//! let api = TermGraphApi::new(store, Config::default()).unwrap();
//! let vocabulary = Iri::from("https://example.org/vocabulary");
//! // Unknown vocabularies resolve to their own IRI
//! assert_eq!(api.get_vocabulary_context(&vocabulary).unwrap(), vocabulary);
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod drop_queue;
pub mod error;
pub mod events;
mod graph;
pub mod ns;
pub mod relation;
pub mod repository;
pub mod snapshot;
pub mod storage;
pub mod workspace;

#[cfg(test)]
mod fixtures;

pub use api::TermGraphApi;
pub use config::{Config, ConfigError};
pub use context::VocabularyContextMapper;
pub use drop_queue::GraphDropQueue;
pub use error::{TermGraphError, TermGraphResult};
pub use events::VocabularyEvent;
pub use graph::{Iri, Literal, Quad, Snapshot, SnapshotKind, Term, Vocabulary, VocabularyTerm};
pub use relation::{RelatedVocabularyResolver, RelationSet, RelationStrategy, SkosRelation};
pub use storage::{GraphUpdate, OpenStore, QuadPattern, SqliteStore, StorageError, StorageResult, TripleStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
