//! In-memory vocabulary fixtures for unit tests

use crate::context::{RepositoryContextMapper, VocabularyContextMapper};
use crate::graph::{Iri, Literal, Quad};
use crate::ns;
use crate::repository::VocabularyRepository;
use crate::storage::{GraphUpdate, OpenStore, QuadPattern, SqliteStore, StorageError, StorageResult, TripleStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub(crate) fn iri(s: &str) -> Iri {
    Iri::from(s)
}

pub(crate) fn glossary_of(vocabulary: &str) -> String {
    format!("{}/glossary", vocabulary)
}

/// Builds vocabularies stored in graphs named after themselves
pub(crate) struct Fixture {
    pub store: Arc<dyn TripleStore>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_store(Arc::new(SqliteStore::open_in_memory().unwrap()))
    }

    pub fn with_store(store: Arc<dyn TripleStore>) -> Self {
        Self { store }
    }

    pub fn mapper(&self) -> Arc<dyn VocabularyContextMapper> {
        Arc::new(RepositoryContextMapper::new(self.store.clone()))
    }

    pub fn repository(&self) -> VocabularyRepository {
        VocabularyRepository::new(self.store.clone(), self.mapper())
    }

    pub fn vocabulary(&self, vocabulary: &str) -> &Self {
        self.vocabulary_in(vocabulary, vocabulary)
    }

    pub fn vocabulary_in(&self, vocabulary: &str, graph: &str) -> &Self {
        let glossary = glossary_of(vocabulary);
        self.store
            .insert(&[
                Quad::new(vocabulary, ns::rdf::TYPE, iri(ns::model::VOCABULARY), graph),
                Quad::new(vocabulary, ns::model::HAS_GLOSSARY, iri(&glossary), graph),
                Quad::new(glossary.as_str(), ns::rdf::TYPE, iri(ns::skos::CONCEPT_SCHEME), graph),
            ])
            .unwrap();
        self
    }

    /// Add a term to a vocabulary stored under its own IRI
    pub fn term(&self, vocabulary: &str, term: &str) -> &Self {
        self.store
            .insert(&[
                Quad::new(term, ns::rdf::TYPE, iri(ns::skos::CONCEPT), vocabulary),
                Quad::new(term, ns::skos::IN_SCHEME, iri(&glossary_of(vocabulary)), vocabulary),
                Quad::new(term, ns::skos::PREF_LABEL, Literal::lang(term, "en"), vocabulary),
            ])
            .unwrap();
        self
    }

    /// `<from> <predicate> <to>` asserted in `graph`
    pub fn link(&self, graph: &str, from: &str, predicate: &str, to: &str) -> &Self {
        self.store
            .insert(&[Quad::new(from, predicate, iri(to), graph)])
            .unwrap();
        self
    }

    pub fn import(&self, vocabulary: &str, imported: &str) -> &Self {
        self.link(vocabulary, vocabulary, ns::model::IMPORTS_VOCABULARY, imported)
    }
}

fn injected() -> StorageError {
    StorageError::Io(std::io::Error::other("injected fault"))
}

/// Wraps a store and fails selected calls on demand
pub(crate) struct FaultyStore {
    inner: Arc<dyn TripleStore>,
    /// Fail every `apply`
    pub fail_writes: AtomicBool,
    /// Fail unbounded `rdf:type` scans, the bulk read behind the context index
    pub fail_type_scans: AtomicBool,
}

impl FaultyStore {
    pub fn new(inner: Arc<dyn TripleStore>) -> Self {
        Self {
            inner,
            fail_writes: AtomicBool::new(false),
            fail_type_scans: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_type_scans(&self, fail: bool) {
        self.fail_type_scans.store(fail, Ordering::SeqCst);
    }

    fn is_type_scan(pattern: &QuadPattern) -> bool {
        pattern.graph.is_none()
            && pattern.subject.is_none()
            && pattern.predicate.as_ref().map(Iri::as_str) == Some(ns::rdf::TYPE)
    }
}

impl TripleStore for FaultyStore {
    fn find(&self, pattern: &QuadPattern) -> StorageResult<Vec<Quad>> {
        if self.fail_type_scans.load(Ordering::SeqCst) && Self::is_type_scan(pattern) {
            return Err(injected());
        }
        self.inner.find(pattern)
    }

    fn ask(&self, pattern: &QuadPattern) -> StorageResult<bool> {
        self.inner.ask(pattern)
    }

    fn graphs(&self) -> StorageResult<Vec<Iri>> {
        self.inner.graphs()
    }

    fn apply(&self, updates: &[GraphUpdate]) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected());
        }
        self.inner.apply(updates)
    }
}
