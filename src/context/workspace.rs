//! Context mapper overlaying the selected workspace's working copies

use super::VocabularyContextMapper;
use crate::error::TermGraphResult;
use crate::graph::Iri;
use crate::workspace::{CurrentWorkspace, WorkspaceMetadataCache};
use std::sync::Arc;

/// Returns a vocabulary's working-copy context when the selected workspace
/// has one; otherwise defers to the wrapped mapper.
pub struct WorkspaceContextMapper {
    delegate: Arc<dyn VocabularyContextMapper>,
    metadata: Arc<WorkspaceMetadataCache>,
    current: Arc<CurrentWorkspace>,
}

impl WorkspaceContextMapper {
    pub fn new(
        delegate: Arc<dyn VocabularyContextMapper>,
        metadata: Arc<WorkspaceMetadataCache>,
        current: Arc<CurrentWorkspace>,
    ) -> Self {
        Self {
            delegate,
            metadata,
            current,
        }
    }
}

impl WorkspaceContextMapper {
    /// Context of `vocabulary` inside `workspace`, independent of the selection
    pub fn context_in(&self, workspace: &Iri, vocabulary: &Iri) -> TermGraphResult<Iri> {
        let metadata = self.metadata.get_or_load(workspace)?;
        match metadata.vocabulary_info(vocabulary) {
            Some(info) => Ok(info.context.clone()),
            None => self.delegate.get_vocabulary_context(vocabulary),
        }
    }
}

impl VocabularyContextMapper for WorkspaceContextMapper {
    fn get_vocabulary_context(&self, vocabulary: &Iri) -> TermGraphResult<Iri> {
        match self.current.get() {
            Some(workspace) => self.context_in(&workspace, vocabulary),
            None => self.delegate.get_vocabulary_context(vocabulary),
        }
    }

    fn get_vocabulary_in_context(&self, context: &Iri) -> TermGraphResult<Option<Iri>> {
        self.delegate.get_vocabulary_in_context(context)
    }
}
