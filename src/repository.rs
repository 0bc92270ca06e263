//! Reads vocabulary metadata and terms from their resolved contexts

use crate::context::VocabularyContextMapper;
use crate::error::TermGraphResult;
use crate::graph::{Iri, Quad, Vocabulary, VocabularyTerm};
use crate::ns;
use crate::storage::{QuadPattern, TripleStore};
use std::sync::Arc;

/// Vocabulary-level queries bound to the context semantics of a mapper
#[derive(Clone)]
pub struct VocabularyRepository {
    store: Arc<dyn TripleStore>,
    mapper: Arc<dyn VocabularyContextMapper>,
}

impl VocabularyRepository {
    pub fn new(store: Arc<dyn TripleStore>, mapper: Arc<dyn VocabularyContextMapper>) -> Self {
        Self { store, mapper }
    }

    pub fn store(&self) -> &Arc<dyn TripleStore> {
        &self.store
    }

    pub fn context_of(&self, vocabulary: &Iri) -> TermGraphResult<Iri> {
        self.mapper.get_vocabulary_context(vocabulary)
    }

    /// Whether any graph declares `vocabulary` a vocabulary
    pub fn exists(&self, vocabulary: &Iri) -> TermGraphResult<bool> {
        Ok(self.store.ask(
            &QuadPattern::new()
                .with_subject(vocabulary.clone())
                .with_predicate(ns::rdf::TYPE)
                .with_object(Iri::from(ns::model::VOCABULARY)),
        )?)
    }

    /// Whether `asset` carries a snapshot type in any graph
    pub fn is_snapshot(&self, asset: &Iri) -> TermGraphResult<bool> {
        for class in [ns::model::VOCABULARY_SNAPSHOT, ns::model::TERM_SNAPSHOT] {
            let tagged = self.store.ask(
                &QuadPattern::new()
                    .with_subject(asset.clone())
                    .with_predicate(ns::rdf::TYPE)
                    .with_object(Iri::from(class)),
            )?;
            if tagged {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Load the vocabulary's metadata from its resolved context
    pub fn find(&self, vocabulary: &Iri) -> TermGraphResult<Option<(Vocabulary, Iri)>> {
        let context = self.context_of(vocabulary)?;
        Ok(self
            .find_in(vocabulary, &context)?
            .map(|found| (found, context)))
    }

    /// Load the vocabulary's metadata from the given context
    pub fn find_in(&self, vocabulary: &Iri, context: &Iri) -> TermGraphResult<Option<Vocabulary>> {
        let quads = self.store.find(
            &QuadPattern::new()
                .in_graph(context.clone())
                .with_subject(vocabulary.clone()),
        )?;
        if quads.is_empty() {
            return Ok(None);
        }

        let mut found = Vocabulary::new(vocabulary.clone());
        for quad in &quads {
            match quad.predicate.as_str() {
                ns::model::HAS_GLOSSARY => {
                    if found.glossary.is_none() {
                        found.glossary = quad.object_iri().cloned();
                    }
                }
                ns::model::DESCRIBES_DOCUMENT => {
                    if found.document.is_none() {
                        found.document = quad.object_iri().cloned();
                    }
                }
                ns::model::IMPORTS_VOCABULARY => {
                    if let Some(imported) = quad.object_iri() {
                        found.imports.insert(imported.clone());
                    }
                }
                ns::model::PRIMARY_LANGUAGE => {
                    found.language = quad.object.as_literal().map(|l| l.value.clone());
                }
                _ => {}
            }
        }
        Ok(Some(found))
    }

    /// Terms contained in the vocabulary's glossary inside `context`
    pub fn terms_in(&self, vocabulary: &Vocabulary, context: &Iri) -> TermGraphResult<Vec<VocabularyTerm>> {
        let Some(ref glossary) = vocabulary.glossary else {
            return Ok(Vec::new());
        };
        let quads = self.store.find(
            &QuadPattern::new()
                .in_graph(context.clone())
                .with_predicate(ns::skos::IN_SCHEME)
                .with_object(glossary.clone()),
        )?;
        let mut terms: Vec<VocabularyTerm> = quads
            .into_iter()
            .map(|q| VocabularyTerm {
                iri: q.subject,
                vocabulary: vocabulary.iri.clone(),
                glossary: glossary.clone(),
            })
            .collect();
        terms.dedup_by(|a, b| a.iri == b.iri);
        Ok(terms)
    }

    /// The vocabulary owning `term`, looked up across all graphs
    pub fn vocabulary_of_term(&self, term: &Iri) -> TermGraphResult<Option<Iri>> {
        let glossaries = self.store.find(
            &QuadPattern::new()
                .with_subject(term.clone())
                .with_predicate(ns::skos::IN_SCHEME),
        )?;
        for glossary in glossaries.iter().filter_map(Quad::object_iri) {
            let owners = self.store.find(
                &QuadPattern::new()
                    .with_predicate(ns::model::HAS_GLOSSARY)
                    .with_object(glossary.clone())
                    .with_limit(1),
            )?;
            if let Some(owner) = owners.into_iter().next() {
                return Ok(Some(owner.subject));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RepositoryContextMapper;
    use crate::graph::Literal;
    use crate::storage::{OpenStore, SqliteStore};

    const V: &str = "http://ex.org/vocab";
    const G: &str = "http://ex.org/vocab/glossary";

    fn setup() -> VocabularyRepository {
        let store: Arc<dyn TripleStore> = Arc::new(SqliteStore::open_in_memory().unwrap());
        store
            .insert(&[
                Quad::new(V, ns::rdf::TYPE, Iri::from(ns::model::VOCABULARY), V),
                Quad::new(V, ns::model::HAS_GLOSSARY, Iri::from(G), V),
                Quad::new(V, ns::model::DESCRIBES_DOCUMENT, Iri::from("http://ex.org/doc"), V),
                Quad::new(V, ns::model::IMPORTS_VOCABULARY, Iri::from("http://ex.org/other"), V),
                Quad::new(V, ns::model::PRIMARY_LANGUAGE, Literal::string("cs"), V),
                Quad::new("http://ex.org/t1", ns::skos::IN_SCHEME, Iri::from(G), V),
                Quad::new("http://ex.org/t2", ns::skos::IN_SCHEME, Iri::from(G), V),
            ])
            .unwrap();
        let mapper = Arc::new(RepositoryContextMapper::new(store.clone()));
        VocabularyRepository::new(store, mapper)
    }

    #[test]
    fn test_find_reads_metadata() {
        let repo = setup();
        let (vocabulary, context) = repo.find(&Iri::from(V)).unwrap().unwrap();
        assert_eq!(context, Iri::from(V));
        assert_eq!(vocabulary.glossary, Some(Iri::from(G)));
        assert_eq!(vocabulary.document, Some(Iri::from("http://ex.org/doc")));
        assert!(vocabulary.imports.contains(&Iri::from("http://ex.org/other")));
        assert_eq!(vocabulary.language.as_deref(), Some("cs"));
    }

    #[test]
    fn test_missing_vocabulary() {
        let repo = setup();
        assert!(repo.find(&Iri::from("http://ex.org/none")).unwrap().is_none());
        assert!(!repo.exists(&Iri::from("http://ex.org/none")).unwrap());
        assert!(repo.exists(&Iri::from(V)).unwrap());
    }

    #[test]
    fn test_terms_and_owner_lookup() {
        let repo = setup();
        let (vocabulary, context) = repo.find(&Iri::from(V)).unwrap().unwrap();
        let terms = repo.terms_in(&vocabulary, &context).unwrap();
        assert_eq!(terms.len(), 2);
        assert_eq!(
            repo.vocabulary_of_term(&Iri::from("http://ex.org/t1")).unwrap(),
            Some(Iri::from(V))
        );
        assert_eq!(repo.vocabulary_of_term(&Iri::from("http://ex.org/tx")).unwrap(), None);
    }

    #[test]
    fn test_live_vocabulary_is_not_a_snapshot() {
        let repo = setup();
        assert!(!repo.is_snapshot(&Iri::from(V)).unwrap());
    }
}
