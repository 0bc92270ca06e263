//! Cascading snapshot removal

use super::query::SnapshotQuery;
use crate::config::SnapshotConfig;
use crate::error::{TermGraphError, TermGraphResult};
use crate::graph::{Iri, SnapshotKind};
use crate::relation::RelatedVocabularyResolver;
use crate::repository::VocabularyRepository;
use crate::storage::{GraphUpdate, QuadPattern};

/// Removes a vocabulary snapshot and the snapshots created with it in the
/// same cascade (same timestamp) for the live vocabulary's related set.
pub struct SnapshotRemover {
    repository: VocabularyRepository,
    resolver: Box<dyn RelatedVocabularyResolver>,
    config: SnapshotConfig,
}

impl SnapshotRemover {
    pub fn new(
        repository: VocabularyRepository,
        resolver: Box<dyn RelatedVocabularyResolver>,
        config: SnapshotConfig,
    ) -> Self {
        Self {
            repository,
            resolver,
            config,
        }
    }

    /// Drop the snapshot graphs of the cascade `snapshot` belongs to.
    ///
    /// Fails with `NotFound` when nothing is known about `snapshot` and with
    /// `UnsupportedOperation` when it is not a vocabulary snapshot; neither
    /// case mutates the store. Related vocabularies without a matching
    /// snapshot are skipped. Returns the dropped graphs.
    pub fn remove_snapshot(&self, snapshot: &Iri) -> TermGraphResult<Vec<Iri>> {
        let store = self.repository.store();
        if !store.ask(&QuadPattern::new().with_subject(snapshot.clone()))? {
            return Err(TermGraphError::not_found("Snapshot", snapshot));
        }
        let query = SnapshotQuery::new(store.clone());
        let described = query.find_snapshot(snapshot)?.ok_or_else(|| {
            TermGraphError::UnsupportedOperation(format!("{} is not a snapshot", snapshot))
        })?;
        if described.kind != SnapshotKind::Vocabulary {
            return Err(TermGraphError::UnsupportedOperation(format!(
                "{} is a {} snapshot; remove the vocabulary snapshot instead",
                snapshot, described.kind
            )));
        }

        let related = self
            .resolver
            .related_vocabularies(&described.version_of, &self.config.cascade_relations)?;

        let mut graphs: Vec<Iri> = Vec::new();
        for vocabulary in &related {
            let found = query.vocabulary_snapshot_graphs(vocabulary, described.created)?;
            if found.is_empty() {
                tracing::debug!(%vocabulary, "no snapshot from this cascade; skipping");
            }
            for graph in found {
                if !graphs.contains(&graph) {
                    graphs.push(graph);
                }
            }
        }

        let updates: Vec<GraphUpdate> = graphs.iter().cloned().map(GraphUpdate::DropGraph).collect();
        store.apply(&updates)?;

        tracing::info!(
            %snapshot,
            version_of = %described.version_of,
            dropped = graphs.len(),
            "removed vocabulary snapshot cascade"
        );
        Ok(graphs)
    }
}
