//! Context mapper backed by a bulk-loaded in-memory index

use super::repository::RepositoryContextMapper;
use super::{resolve_candidates, VocabularyContextMapper};
use crate::error::TermGraphResult;
use crate::graph::Iri;
use crate::ns;
use crate::storage::{QuadPattern, StorageResult, TripleStore};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Snapshot of every vocabulary declaration and derivation link in the store
#[derive(Debug, Default)]
pub struct ContextIndex {
    /// vocabulary → graphs declaring it
    by_vocabulary: HashMap<Iri, Vec<Iri>>,
    /// graph → vocabularies declared inside it
    by_context: HashMap<Iri, Vec<Iri>>,
    /// graph → the graph it declares itself derived from
    parents: HashMap<Iri, Iri>,
}

impl ContextIndex {
    /// Build the index with two full scans
    pub fn build(store: &dyn TripleStore) -> StorageResult<Self> {
        let mut index = ContextIndex::default();

        let declarations = store.find(
            &QuadPattern::new()
                .with_predicate(ns::rdf::TYPE)
                .with_object(Iri::from(ns::model::VOCABULARY)),
        )?;
        for quad in declarations {
            index
                .by_vocabulary
                .entry(quad.subject.clone())
                .or_default()
                .push(quad.graph.clone());
            index.by_context.entry(quad.graph).or_default().push(quad.subject);
        }

        let derivations = store.find(&QuadPattern::new().with_predicate(ns::model::DERIVED_FROM))?;
        for quad in derivations {
            // Only self-declarations count: <ctx> derivedFrom <parent> inside <ctx>
            if quad.subject != quad.graph {
                continue;
            }
            if let Some(parent) = quad.object_iri() {
                index.parents.entry(quad.graph.clone()).or_insert_with(|| parent.clone());
            }
        }

        Ok(index)
    }

    /// Number of distinct vocabularies indexed
    pub fn vocabulary_count(&self) -> usize {
        self.by_vocabulary.len()
    }

    pub fn contexts_of(&self, vocabulary: &Iri) -> &[Iri] {
        self.by_vocabulary
            .get(vocabulary)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The first vocabulary declared in `context`
    pub fn vocabulary_in(&self, context: &Iri) -> Option<&Iri> {
        let vocabularies = self.by_context.get(context)?;
        if vocabularies.len() > 1 {
            tracing::warn!(%context, "context holds several vocabularies; using the first");
        }
        vocabularies.first()
    }

    fn resolve(&self, vocabulary: &Iri) -> TermGraphResult<Iri> {
        resolve_candidates(vocabulary, self.contexts_of(vocabulary), |ctx| {
            Ok(self.parents.get(ctx).cloned())
        })
    }
}

/// Decorates the repository mapper with an index loaded by [`load`](Self::load).
///
/// The index is replaced wholesale; concurrent readers see either the previous
/// or the new index, never a partial one. Vocabularies persisted after the last
/// `load()` resolve to their own IRI until the next `load()`. Until the first
/// `load()` every call goes to the store.
pub struct CachingContextMapper {
    store: Arc<dyn TripleStore>,
    delegate: RepositoryContextMapper,
    index: RwLock<Option<Arc<ContextIndex>>>,
}

impl CachingContextMapper {
    pub fn new(store: Arc<dyn TripleStore>) -> Self {
        Self {
            delegate: RepositoryContextMapper::new(store.clone()),
            store,
            index: RwLock::new(None),
        }
    }

    /// Rebuild the index from the store and swap it in
    pub fn load(&self) -> TermGraphResult<()> {
        let index = Arc::new(ContextIndex::build(self.store.as_ref())?);
        tracing::info!(vocabularies = index.vocabulary_count(), "loaded vocabulary context index");
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = Some(index);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.current().is_some()
    }

    fn current(&self) -> Option<Arc<ContextIndex>> {
        self.index.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl VocabularyContextMapper for CachingContextMapper {
    fn get_vocabulary_context(&self, vocabulary: &Iri) -> TermGraphResult<Iri> {
        match self.current() {
            Some(index) => index.resolve(vocabulary),
            None => self.delegate.get_vocabulary_context(vocabulary),
        }
    }

    fn get_vocabulary_in_context(&self, context: &Iri) -> TermGraphResult<Option<Iri>> {
        match self.current() {
            Some(index) => Ok(index.vocabulary_in(context).cloned()),
            None => self.delegate.get_vocabulary_in_context(context),
        }
    }
}
