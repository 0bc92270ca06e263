//! Read-only lookups over stored snapshots

use crate::error::TermGraphResult;
use crate::graph::{Iri, Quad, Snapshot, SnapshotKind};
use crate::ns;
use crate::storage::{QuadPattern, TripleStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct SnapshotQuery {
    store: Arc<dyn TripleStore>,
}

impl SnapshotQuery {
    pub fn new(store: Arc<dyn TripleStore>) -> Self {
        Self { store }
    }

    /// Describe `iri` as a snapshot, if it is one.
    ///
    /// Returns `None` when the resource lacks a snapshot type, `versionOf` or
    /// a parseable creation timestamp.
    pub fn find_snapshot(&self, iri: &Iri) -> TermGraphResult<Option<Snapshot>> {
        let quads = self.store.find(&QuadPattern::new().with_subject(iri.clone()))?;
        Ok(describe(iri, &quads))
    }

    /// Snapshots of `asset`, newest first
    pub fn snapshots_of(&self, asset: &Iri) -> TermGraphResult<Vec<Snapshot>> {
        let versions = self.store.find(
            &QuadPattern::new()
                .with_predicate(ns::model::VERSION_OF)
                .with_object(asset.clone()),
        )?;
        let mut snapshots = Vec::new();
        for version in versions {
            if snapshots.iter().any(|s: &Snapshot| s.iri == version.subject) {
                continue;
            }
            if let Some(snapshot) = self.find_snapshot(&version.subject)? {
                snapshots.push(snapshot);
            }
        }
        snapshots.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| a.iri.cmp(&b.iri)));
        Ok(snapshots)
    }

    /// The latest snapshot of `asset` created at or before `at`
    pub fn snapshot_valid_at(&self, asset: &Iri, at: DateTime<Utc>) -> TermGraphResult<Option<Snapshot>> {
        Ok(self
            .snapshots_of(asset)?
            .into_iter()
            .find(|s| s.created <= at))
    }

    /// Graphs holding a vocabulary snapshot of `vocabulary` created at `created`
    pub fn vocabulary_snapshot_graphs(
        &self,
        vocabulary: &Iri,
        created: DateTime<Utc>,
    ) -> TermGraphResult<Vec<Iri>> {
        let versions = self.store.find(
            &QuadPattern::new()
                .with_predicate(ns::model::VERSION_OF)
                .with_object(vocabulary.clone()),
        )?;
        let mut graphs = Vec::new();
        for version in versions {
            if graphs.contains(&version.graph) {
                continue;
            }
            let quads = self.store.find(
                &QuadPattern::new()
                    .in_graph(version.graph.clone())
                    .with_subject(version.subject.clone()),
            )?;
            let matches = describe(&version.subject, &quads).is_some_and(|s| {
                s.kind == SnapshotKind::Vocabulary && s.created == created
            });
            if matches {
                graphs.push(version.graph);
            }
        }
        Ok(graphs)
    }
}

/// Assemble a snapshot from the quads describing `iri`
fn describe(iri: &Iri, quads: &[Quad]) -> Option<Snapshot> {
    let mut kind = None;
    let mut version_of = None;
    let mut created = None;
    for quad in quads.iter().filter(|q| q.subject == *iri) {
        match quad.predicate.as_str() {
            ns::rdf::TYPE => {
                // A vocabulary snapshot tag wins over a term snapshot tag
                if let Some(found) = quad.object_iri().and_then(SnapshotKind::from_type_iri) {
                    if kind != Some(SnapshotKind::Vocabulary) {
                        kind = Some(found);
                    }
                }
            }
            ns::model::VERSION_OF => version_of = quad.object_iri().cloned(),
            ns::model::CREATED => created = quad.object.as_literal().and_then(|l| l.as_date_time()),
            _ => {}
        }
    }
    Some(Snapshot {
        iri: iri.clone(),
        created: created?,
        version_of: version_of?,
        kind: kind?,
    })
}
