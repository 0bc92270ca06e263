//! Vocabulary lifecycle events
//!
//! Signals raised by whatever creates or deletes vocabularies. Caches that
//! derive state from vocabulary metadata react to them by reloading.

use crate::context::CachingContextMapper;
use crate::error::TermGraphResult;
use crate::graph::Iri;
use crate::workspace::WorkspaceMetadataCache;
use serde::{Deserialize, Serialize};

/// A vocabulary appeared, is about to disappear, or has disappeared
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum VocabularyEvent {
    Created { vocabulary: Iri },
    /// Raised before the vocabulary's graphs are dropped
    Removing { vocabulary: Iri },
    /// Raised after the vocabulary's graphs were dropped
    Removed { vocabulary: Iri },
}

impl VocabularyEvent {
    pub fn vocabulary(&self) -> &Iri {
        match self {
            VocabularyEvent::Created { vocabulary }
            | VocabularyEvent::Removing { vocabulary }
            | VocabularyEvent::Removed { vocabulary } => vocabulary,
        }
    }
}

/// Something that keeps derived state in step with vocabulary events
pub trait VocabularyEventHandler: Send + Sync {
    fn handle(&self, event: &VocabularyEvent) -> TermGraphResult<()>;
}

impl VocabularyEventHandler for CachingContextMapper {
    fn handle(&self, event: &VocabularyEvent) -> TermGraphResult<()> {
        tracing::debug!(?event, "reloading context index");
        self.load()
    }
}

impl VocabularyEventHandler for WorkspaceMetadataCache {
    /// Workspaces may reference the vocabulary; cached entries are dropped and
    /// rebuilt on next access.
    fn handle(&self, event: &VocabularyEvent) -> TermGraphResult<()> {
        tracing::debug!(vocabulary = %event.vocabulary(), "clearing workspace metadata");
        self.clear();
        Ok(())
    }
}
