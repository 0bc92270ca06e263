//! Workspaces: named overlays that shadow canonical vocabulary contexts
//!
//! A workspace is described in the graph named after it:
//!
//! ```text
//! <ws>  rdf:type model:Workspace ; model:referencesContext <ctx> .
//! <ctx> model:basedOnVocabulary <vocabulary> ;
//!       model:hasChangeTrackingContext <changes> .
//! ```

mod cache;

pub use cache::WorkspaceMetadataCache;

use crate::graph::Iri;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Where a workspace keeps its copy of one vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyInfo {
    pub vocabulary: Iri,
    /// Working-copy context
    pub context: Iri,
    pub change_tracking_context: Option<Iri>,
}

/// Per-workspace mapping from vocabulary to its working contexts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMetadata {
    pub workspace: Iri,
    vocabularies: HashMap<Iri, VocabularyInfo>,
}

impl WorkspaceMetadata {
    pub fn new(workspace: Iri) -> Self {
        Self {
            workspace,
            vocabularies: HashMap::new(),
        }
    }

    pub fn with_vocabulary(mut self, info: VocabularyInfo) -> Self {
        self.vocabularies.insert(info.vocabulary.clone(), info);
        self
    }

    pub fn vocabulary_info(&self, vocabulary: &Iri) -> Option<&VocabularyInfo> {
        self.vocabularies.get(vocabulary)
    }

    /// Vocabularies with a working copy, sorted
    pub fn vocabularies(&self) -> Vec<&Iri> {
        let mut vocabularies: Vec<&Iri> = self.vocabularies.keys().collect();
        vocabularies.sort();
        vocabularies
    }

    pub fn vocabulary_contexts(&self) -> Vec<&Iri> {
        let mut contexts: Vec<&Iri> = self.vocabularies.values().map(|i| &i.context).collect();
        contexts.sort();
        contexts
    }

    pub fn change_tracking_contexts(&self) -> Vec<&Iri> {
        let mut contexts: Vec<&Iri> = self
            .vocabularies
            .values()
            .filter_map(|i| i.change_tracking_context.as_ref())
            .collect();
        contexts.sort();
        contexts
    }

    pub fn len(&self) -> usize {
        self.vocabularies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabularies.is_empty()
    }
}

/// The workspace selected for the whole process, if any
///
/// One selection is shared by every holder of the same `Arc`, so it suits a
/// single user at a time. Concurrent callers working in different workspaces
/// pass the workspace per call instead
/// (`WorkspaceContextMapper::context_in`).
#[derive(Debug, Default)]
pub struct CurrentWorkspace {
    selected: RwLock<Option<Iri>>,
}

impl CurrentWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&self, workspace: Option<Iri>) {
        *self.selected.write().unwrap_or_else(PoisonError::into_inner) = workspace;
    }

    pub fn get(&self) -> Option<Iri> {
        self.selected.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
