//! Context mapper answering straight from the store

use super::{resolve_candidates, VocabularyContextMapper};
use crate::error::TermGraphResult;
use crate::graph::{Iri, Quad};
use crate::ns;
use crate::storage::{QuadPattern, StorageResult, TripleStore};
use std::sync::Arc;

/// Resolves contexts by querying the store on every call
pub struct RepositoryContextMapper {
    store: Arc<dyn TripleStore>,
}

impl RepositoryContextMapper {
    pub fn new(store: Arc<dyn TripleStore>) -> Self {
        Self { store }
    }

    /// Graphs asserting `<vocabulary> rdf:type model:Vocabulary`
    fn candidate_contexts(&self, vocabulary: &Iri) -> StorageResult<Vec<Iri>> {
        let quads = self.store.find(
            &QuadPattern::new()
                .with_subject(vocabulary.clone())
                .with_predicate(ns::rdf::TYPE)
                .with_object(Iri::from(ns::model::VOCABULARY)),
        )?;
        Ok(quads.into_iter().map(|q| q.graph).collect())
    }
}

/// The context `context` declares itself derived from, asserted inside itself.
///
/// Returns at most one parent; extra declarations are ignored with a warning.
pub(crate) fn derived_from(store: &dyn TripleStore, context: &Iri) -> StorageResult<Option<Iri>> {
    let quads = store.find(
        &QuadPattern::new()
            .in_graph(context.clone())
            .with_subject(context.clone())
            .with_predicate(ns::model::DERIVED_FROM),
    )?;
    let mut parents = quads.iter().filter_map(Quad::object_iri);
    let parent = parents.next().cloned();
    if parents.next().is_some() {
        tracing::warn!(%context, "context declares several derivation parents; using the first");
    }
    Ok(parent)
}

impl VocabularyContextMapper for RepositoryContextMapper {
    fn get_vocabulary_context(&self, vocabulary: &Iri) -> TermGraphResult<Iri> {
        let candidates = self.candidate_contexts(vocabulary)?;
        resolve_candidates(vocabulary, &candidates, |ctx| {
            Ok(derived_from(self.store.as_ref(), ctx)?)
        })
    }

    fn get_vocabulary_in_context(&self, context: &Iri) -> TermGraphResult<Option<Iri>> {
        let quads = self.store.find(
            &QuadPattern::new()
                .in_graph(context.clone())
                .with_predicate(ns::rdf::TYPE)
                .with_object(Iri::from(ns::model::VOCABULARY)),
        )?;
        let mut vocabularies = quads.into_iter().map(|q| q.subject);
        let first = vocabularies.next();
        if vocabularies.next().is_some() {
            tracing::warn!(%context, "context holds several vocabularies; using the first");
        }
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TermGraphError;
    use crate::storage::{OpenStore, SqliteStore};

    const V: &str = "http://ex.org/vocab";

    fn mapper_with(quads: &[Quad]) -> RepositoryContextMapper {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(quads).unwrap();
        RepositoryContextMapper::new(Arc::new(store))
    }

    fn declares(graph: &str) -> Quad {
        Quad::new(V, ns::rdf::TYPE, Iri::from(ns::model::VOCABULARY), graph)
    }

    fn derives(child: &str, parent: &str) -> Quad {
        Quad::new(child, ns::model::DERIVED_FROM, Iri::from(parent), child)
    }

    #[test]
    fn test_unknown_vocabulary_maps_to_itself() {
        let mapper = mapper_with(&[]);
        assert_eq!(mapper.get_vocabulary_context(&Iri::from(V)).unwrap(), Iri::from(V));
    }

    #[test]
    fn test_single_graph_is_returned() {
        let mapper = mapper_with(&[declares("http://ex.org/ctx")]);
        assert_eq!(
            mapper.get_vocabulary_context(&Iri::from(V)).unwrap(),
            Iri::from("http://ex.org/ctx")
        );
    }

    #[test]
    fn test_working_copy_defers_to_canonical() {
        let mapper = mapper_with(&[
            declares("http://ex.org/canon"),
            declares("http://ex.org/copy"),
            derives("http://ex.org/copy", "http://ex.org/canon"),
        ]);
        assert_eq!(
            mapper.get_vocabulary_context(&Iri::from(V)).unwrap(),
            Iri::from("http://ex.org/canon")
        );
    }

    #[test]
    fn test_derivation_asserted_elsewhere_is_ignored() {
        // The derivation must live inside the derived context itself
        let mapper = mapper_with(&[
            declares("http://ex.org/canon"),
            declares("http://ex.org/copy"),
            Quad::new(
                "http://ex.org/copy",
                ns::model::DERIVED_FROM,
                Iri::from("http://ex.org/canon"),
                "http://ex.org/other",
            ),
        ]);
        assert!(matches!(
            mapper.get_vocabulary_context(&Iri::from(V)),
            Err(TermGraphError::AmbiguousVocabularyContext { .. })
        ));
    }

    #[test]
    fn test_two_independent_graphs_fail() {
        let mapper = mapper_with(&[declares("http://ex.org/g1"), declares("http://ex.org/g2")]);
        assert!(matches!(
            mapper.get_vocabulary_context(&Iri::from(V)),
            Err(TermGraphError::AmbiguousVocabularyContext { .. })
        ));
    }

    #[test]
    fn test_inverse_lookup() {
        let mapper = mapper_with(&[declares("http://ex.org/ctx")]);
        assert_eq!(
            mapper.get_vocabulary_in_context(&Iri::from("http://ex.org/ctx")).unwrap(),
            Some(Iri::from(V))
        );
        assert_eq!(
            mapper.get_vocabulary_in_context(&Iri::from("http://ex.org/none")).unwrap(),
            None
        );
    }
}
