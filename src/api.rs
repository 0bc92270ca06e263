//! Transport-independent API layer.
//!
//! `TermGraphApi` is the single entry point for consumer-facing operations.
//! The CLI (and any embedding application) calls its methods and never wires
//! mappers, resolvers or snapshot values by hand.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::context::{
    CachingContextMapper, RepositoryContextMapper, VocabularyContextMapper, WorkspaceContextMapper,
};
use crate::drop_queue::GraphDropQueue;
use crate::error::TermGraphResult;
use crate::events::{VocabularyEvent, VocabularyEventHandler};
use crate::graph::{Iri, Snapshot};
use crate::relation::{build_resolver, RelationSet};
use crate::repository::VocabularyRepository;
use crate::snapshot::{SnapshotCreator, SnapshotQuery, SnapshotRemover};
use crate::storage::TripleStore;
use crate::workspace::{CurrentWorkspace, WorkspaceMetadata, WorkspaceMetadataCache};
use tokio::task::JoinHandle;

/// Single entry point for all consumer-facing operations.
#[derive(Clone)]
pub struct TermGraphApi {
    config: Arc<Config>,
    store: Arc<dyn TripleStore>,
    /// Present when `context_cache` is enabled
    cache: Option<Arc<CachingContextMapper>>,
    /// Resolves to canonical contexts only; used for snapshots
    canonical: Arc<dyn VocabularyContextMapper>,
    /// Overlays the selected workspace's working copies
    workspace_mapper: Arc<WorkspaceContextMapper>,
    mapper: Arc<dyn VocabularyContextMapper>,
    workspaces: Arc<WorkspaceMetadataCache>,
    current: Arc<CurrentWorkspace>,
    drop_queue: Arc<GraphDropQueue>,
}

impl TermGraphApi {
    /// Wire every component over `store`. The context cache, when enabled, is
    /// loaded before this returns.
    pub fn new(store: Arc<dyn TripleStore>, config: Config) -> TermGraphResult<Self> {
        config.validate()?;

        let cache = if config.context_cache {
            let cache = Arc::new(CachingContextMapper::new(store.clone()));
            cache.load()?;
            Some(cache)
        } else {
            None
        };
        let canonical: Arc<dyn VocabularyContextMapper> = match &cache {
            Some(cache) => cache.clone(),
            None => Arc::new(RepositoryContextMapper::new(store.clone())),
        };

        let workspaces = Arc::new(WorkspaceMetadataCache::new(store.clone()));
        let current = Arc::new(CurrentWorkspace::new());
        let workspace_mapper = Arc::new(WorkspaceContextMapper::new(
            canonical.clone(),
            workspaces.clone(),
            current.clone(),
        ));
        let mapper: Arc<dyn VocabularyContextMapper> = workspace_mapper.clone();
        let drop_queue = Arc::new(GraphDropQueue::new(store.clone()));

        tracing::debug!(
            context_cache = config.context_cache,
            strategy = ?config.relations.strategy,
            "term graph api ready"
        );

        Ok(Self {
            config: Arc::new(config),
            store,
            cache,
            canonical,
            workspace_mapper,
            mapper,
            workspaces,
            current,
            drop_queue,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn TripleStore> {
        &self.store
    }

    fn canonical_repository(&self) -> VocabularyRepository {
        VocabularyRepository::new(self.store.clone(), self.canonical.clone())
    }

    fn workspace_repository(&self) -> VocabularyRepository {
        VocabularyRepository::new(self.store.clone(), self.mapper.clone())
    }

    // --- Context resolution ---

    /// The graph holding `vocabulary`, honouring the selected workspace
    pub fn get_vocabulary_context(&self, vocabulary: impl AsRef<Iri>) -> TermGraphResult<Iri> {
        self.mapper.get_vocabulary_context(vocabulary.as_ref())
    }

    /// The graph holding `vocabulary` inside `workspace`, regardless of the
    /// selected workspace
    pub fn get_vocabulary_context_in(
        &self,
        workspace: impl AsRef<Iri>,
        vocabulary: impl AsRef<Iri>,
    ) -> TermGraphResult<Iri> {
        self.workspace_mapper.context_in(workspace.as_ref(), vocabulary.as_ref())
    }

    /// The canonical graph holding `vocabulary`, ignoring any workspace
    pub fn get_canonical_context(&self, vocabulary: impl AsRef<Iri>) -> TermGraphResult<Iri> {
        self.canonical.get_vocabulary_context(vocabulary.as_ref())
    }

    pub fn get_vocabulary_in_context(&self, context: impl AsRef<Iri>) -> TermGraphResult<Option<Iri>> {
        self.mapper.get_vocabulary_in_context(context.as_ref())
    }

    /// Rebuild the context index; a no-op when caching is disabled
    pub fn load_contexts(&self) -> TermGraphResult<()> {
        match &self.cache {
            Some(cache) => cache.load(),
            None => Ok(()),
        }
    }

    // --- Relationships ---

    /// Related vocabularies of `vocabulary` (itself included) under the
    /// configured strategy. `relations` defaults to the configured set.
    pub fn get_related_vocabularies(
        &self,
        vocabulary: impl AsRef<Iri>,
        relations: Option<&RelationSet>,
    ) -> TermGraphResult<BTreeSet<Iri>> {
        let resolver = build_resolver(&self.config.relations, self.workspace_repository())?;
        let relations = relations.unwrap_or(&self.config.relations.skos_relations);
        resolver.related_vocabularies(vocabulary.as_ref(), relations)
    }

    // --- Snapshots ---

    /// Snapshot `vocabulary` and its related vocabularies under one timestamp
    pub fn create_snapshot(&self, vocabulary: impl AsRef<Iri>) -> TermGraphResult<Snapshot> {
        let repository = self.canonical_repository();
        let resolver = build_resolver(&self.config.relations, repository.clone())?;
        let creator = SnapshotCreator::new(repository, resolver, self.config.snapshot.clone());
        let snapshot = creator.create_snapshot(vocabulary.as_ref())?;
        self.refresh(&VocabularyEvent::Created {
            vocabulary: snapshot.iri.clone(),
        });
        Ok(snapshot)
    }

    /// Remove the snapshot cascade `snapshot` belongs to; returns the dropped graphs
    pub fn remove_snapshot(&self, snapshot: impl AsRef<Iri>) -> TermGraphResult<Vec<Iri>> {
        let snapshot = snapshot.as_ref();
        let repository = self.canonical_repository();
        let resolver = build_resolver(&self.config.relations, repository.clone())?;
        let remover = SnapshotRemover::new(repository, resolver, self.config.snapshot.clone());
        self.refresh(&VocabularyEvent::Removing {
            vocabulary: snapshot.clone(),
        });
        let dropped = remover.remove_snapshot(snapshot)?;
        self.refresh(&VocabularyEvent::Removed {
            vocabulary: snapshot.clone(),
        });
        Ok(dropped)
    }

    /// Notify the caches around a snapshot write. A failed refresh leaves them
    /// stale until the next reload and never fails the write itself.
    fn refresh(&self, event: &VocabularyEvent) {
        if let Err(e) = self.handle_event(event) {
            tracing::warn!(error = %e, ?event, "cache refresh failed");
        }
    }

    /// Snapshots of a vocabulary or term, newest first
    pub fn snapshots_of(&self, asset: impl AsRef<Iri>) -> TermGraphResult<Vec<Snapshot>> {
        SnapshotQuery::new(self.store.clone()).snapshots_of(asset.as_ref())
    }

    pub fn snapshot_valid_at(
        &self,
        asset: impl AsRef<Iri>,
        at: DateTime<Utc>,
    ) -> TermGraphResult<Option<Snapshot>> {
        SnapshotQuery::new(self.store.clone()).snapshot_valid_at(asset.as_ref(), at)
    }

    // --- Workspaces ---

    /// Select the workspace whose working copies override canonical contexts.
    ///
    /// The selection is shared by every clone of this API. Callers working in
    /// different workspaces concurrently use
    /// [`get_vocabulary_context_in`](Self::get_vocabulary_context_in) instead.
    pub fn select_workspace(&self, workspace: Option<Iri>) -> TermGraphResult<()> {
        if let Some(workspace) = &workspace {
            self.workspaces.get_or_load(workspace)?;
        }
        self.current.select(workspace);
        Ok(())
    }

    pub fn current_workspace(&self) -> Option<Iri> {
        self.current.get()
    }

    pub fn workspace_metadata(&self, workspace: impl AsRef<Iri>) -> TermGraphResult<Arc<WorkspaceMetadata>> {
        self.workspaces.get_or_load(workspace.as_ref())
    }

    pub fn reload_workspace(&self, workspace: impl AsRef<Iri>) -> TermGraphResult<Arc<WorkspaceMetadata>> {
        self.workspaces.reload(workspace.as_ref())
    }

    // --- Events & maintenance ---

    /// Bring cached state in line with a vocabulary being created or removed.
    /// Every cache sees the event; the first failure is returned.
    pub fn handle_event(&self, event: &VocabularyEvent) -> TermGraphResult<()> {
        let reloaded = match &self.cache {
            Some(cache) => cache.handle(event),
            None => Ok(()),
        };
        self.workspaces.handle(event)?;
        reloaded
    }

    /// Queue a graph for the next deferred drop
    pub fn enqueue_graph_drop(&self, graph: Iri) {
        self.drop_queue.enqueue(graph);
    }

    pub fn drop_queue(&self) -> &Arc<GraphDropQueue> {
        &self.drop_queue
    }

    /// Flush the drop queue every `drop_queue.flush_interval_secs` until the
    /// returned task is aborted. Must be called inside a tokio runtime.
    pub fn start_drop_queue(&self) -> JoinHandle<()> {
        let period = self.config.drop_queue.flush_interval();
        tracing::info!(?period, "starting deferred graph drops");
        self.drop_queue.clone().spawn_periodic(period)
    }
}
