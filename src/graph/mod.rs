//! Core data structures: IRIs, RDF terms, quads and the vocabulary model

mod iri;
mod model;
mod term;

pub use iri::Iri;
pub use model::{Snapshot, SnapshotKind, Vocabulary, VocabularyTerm};
pub use term::{Literal, Quad, Term};
