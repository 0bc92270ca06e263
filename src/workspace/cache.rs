//! Per-workspace metadata cache

use super::{VocabularyInfo, WorkspaceMetadata};
use crate::error::{TermGraphError, TermGraphResult};
use crate::graph::{Iri, Quad};
use crate::ns;
use crate::storage::{QuadPattern, TripleStore};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Caches [`WorkspaceMetadata`] per workspace
///
/// The first access to a workspace reads its whole graph in one query; later
/// accesses are map lookups. Entries are only ever replaced wholesale.
pub struct WorkspaceMetadataCache {
    store: Arc<dyn TripleStore>,
    entries: DashMap<Iri, Arc<WorkspaceMetadata>>,
}

impl WorkspaceMetadataCache {
    pub fn new(store: Arc<dyn TripleStore>) -> Self {
        Self {
            store,
            entries: DashMap::new(),
        }
    }

    /// Cached metadata, loading it on first access
    pub fn get_or_load(&self, workspace: &Iri) -> TermGraphResult<Arc<WorkspaceMetadata>> {
        if let Some(entry) = self.entries.get(workspace) {
            return Ok(entry.clone());
        }
        self.reload(workspace)
    }

    /// Re-read the workspace and replace its entry
    pub fn reload(&self, workspace: &Iri) -> TermGraphResult<Arc<WorkspaceMetadata>> {
        let metadata = Arc::new(self.load_metadata(workspace)?);
        tracing::debug!(%workspace, vocabularies = metadata.len(), "loaded workspace metadata");
        self.entries.insert(workspace.clone(), metadata.clone());
        Ok(metadata)
    }

    pub fn evict(&self, workspace: &Iri) -> bool {
        self.entries.remove(workspace).is_some()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn is_cached(&self, workspace: &Iri) -> bool {
        self.entries.contains_key(workspace)
    }

    fn load_metadata(&self, workspace: &Iri) -> TermGraphResult<WorkspaceMetadata> {
        let quads = self
            .store
            .find(&QuadPattern::new().in_graph(workspace.clone()))?;

        let is_workspace = quads.iter().any(|q| {
            q.subject == *workspace
                && q.predicate.as_str() == ns::rdf::TYPE
                && q.object_iri().map(Iri::as_str) == Some(ns::model::WORKSPACE)
        });
        if !is_workspace {
            return Err(TermGraphError::not_found("Workspace", workspace));
        }

        let objects = |subject: &Iri, predicate: &str| -> Vec<Iri> {
            quads
                .iter()
                .filter(|q| q.subject == *subject && q.predicate.as_str() == predicate)
                .filter_map(Quad::object_iri)
                .cloned()
                .collect()
        };

        let mut by_vocabulary: HashMap<Iri, VocabularyInfo> = HashMap::new();
        for context in objects(workspace, ns::model::REFERENCES_CONTEXT) {
            let Some(vocabulary) = objects(&context, ns::model::BASED_ON_VOCABULARY).into_iter().next() else {
                tracing::warn!(%workspace, %context, "workspace context is not based on any vocabulary");
                continue;
            };
            let change_tracking_context = objects(&context, ns::model::HAS_CHANGE_TRACKING_CONTEXT)
                .into_iter()
                .next();
            if by_vocabulary.contains_key(&vocabulary) {
                tracing::warn!(%workspace, %vocabulary, "several working copies of one vocabulary; keeping the first");
                continue;
            }
            by_vocabulary.insert(
                vocabulary.clone(),
                VocabularyInfo {
                    vocabulary,
                    context,
                    change_tracking_context,
                },
            );
        }

        Ok(by_vocabulary
            .into_values()
            .fold(WorkspaceMetadata::new(workspace.clone()), WorkspaceMetadata::with_vocabulary))
    }
}
