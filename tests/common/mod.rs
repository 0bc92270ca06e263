//! Common test utilities for termgraph integration tests
//!
//! `VocabularyFixture` writes vocabularies, terms, links and workspaces into an
//! in-memory store using the same layout production data has.

#![allow(dead_code)]

use std::sync::Arc;
use termgraph::{ns, Config, Iri, Literal, OpenStore, Quad, SqliteStore, TermGraphApi, TripleStore};

pub fn iri(s: &str) -> Iri {
    Iri::from(s)
}

pub fn glossary_of(vocabulary: &str) -> String {
    format!("{}/glossary", vocabulary)
}

pub struct VocabularyFixture {
    pub store: Arc<dyn TripleStore>,
}

impl VocabularyFixture {
    pub fn new() -> Self {
        Self::with_store(Arc::new(SqliteStore::open_in_memory().unwrap()))
    }

    pub fn with_store(store: Arc<dyn TripleStore>) -> Self {
        Self { store }
    }

    pub fn api(&self) -> TermGraphApi {
        self.api_with(Config::default())
    }

    pub fn api_with(&self, config: Config) -> TermGraphApi {
        TermGraphApi::new(self.store.clone(), config).unwrap()
    }

    fn insert(&self, quads: Vec<Quad>) -> &Self {
        self.store.insert(&quads).unwrap();
        self
    }

    /// Vocabulary stored in a graph named after itself
    pub fn vocabulary(&self, vocabulary: &str) -> &Self {
        self.vocabulary_in(vocabulary, vocabulary)
    }

    pub fn vocabulary_in(&self, vocabulary: &str, graph: &str) -> &Self {
        let glossary = glossary_of(vocabulary);
        self.insert(vec![
            Quad::new(vocabulary, ns::rdf::TYPE, iri(ns::model::VOCABULARY), graph),
            Quad::new(vocabulary, ns::model::HAS_GLOSSARY, iri(&glossary), graph),
            Quad::new(glossary.as_str(), ns::rdf::TYPE, iri(ns::skos::CONCEPT_SCHEME), graph),
        ])
    }

    /// `<context> derivedFrom <parent>`, asserted inside `context`
    pub fn derived_from(&self, context: &str, parent: &str) -> &Self {
        self.insert(vec![Quad::new(context, ns::model::DERIVED_FROM, iri(parent), context)])
    }

    pub fn term(&self, vocabulary: &str, term: &str) -> &Self {
        self.insert(vec![
            Quad::new(term, ns::rdf::TYPE, iri(ns::skos::CONCEPT), vocabulary),
            Quad::new(term, ns::skos::IN_SCHEME, iri(&glossary_of(vocabulary)), vocabulary),
            Quad::new(term, ns::skos::PREF_LABEL, Literal::lang(term, "en"), vocabulary),
        ])
    }

    /// `<from> <predicate> <to>` asserted in the graph of `from`'s vocabulary
    pub fn link(&self, vocabulary: &str, from: &str, predicate: &str, to: &str) -> &Self {
        self.insert(vec![Quad::new(from, predicate, iri(to), vocabulary)])
    }

    pub fn import(&self, vocabulary: &str, imported: &str) -> &Self {
        self.link(vocabulary, vocabulary, ns::model::IMPORTS_VOCABULARY, imported)
    }

    /// Link node in the external modeling tool's graph
    pub fn term_link(&self, graph: &str, node: &str, source: &str, target: &str, active: bool) -> &Self {
        self.insert(vec![
            Quad::new(node, ns::rdf::TYPE, iri(ns::model::TERM_LINK), graph),
            Quad::new(node, ns::model::LINK_SOURCE, iri(source), graph),
            Quad::new(node, ns::model::LINK_TARGET, iri(target), graph),
            Quad::new(node, ns::model::LINK_ACTIVE, Literal::boolean(active), graph),
        ])
    }

    /// Workspace holding a working copy of `vocabulary` in `context`
    pub fn workspace(&self, workspace: &str, vocabulary: &str, context: &str, changes: &str) -> &Self {
        self.insert(vec![
            Quad::new(workspace, ns::rdf::TYPE, iri(ns::model::WORKSPACE), workspace),
            Quad::new(workspace, ns::model::REFERENCES_CONTEXT, iri(context), workspace),
            Quad::new(context, ns::model::BASED_ON_VOCABULARY, iri(vocabulary), workspace),
            Quad::new(context, ns::model::HAS_CHANGE_TRACKING_CONTEXT, iri(changes), workspace),
        ])
    }
}
