//! Cascading snapshot creation

use super::{snapshot_suffix, truncate_to_seconds};
use crate::config::SnapshotConfig;
use crate::error::{TermGraphError, TermGraphResult};
use crate::graph::{Iri, Literal, Quad, Snapshot, SnapshotKind, Term, Vocabulary, VocabularyTerm};
use crate::ns;
use crate::relation::RelatedVocabularyResolver;
use crate::repository::VocabularyRepository;
use crate::storage::{GraphUpdate, QuadPattern};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// What one vocabulary contributes to a cascade
struct CopyPlan {
    vocabulary: Vocabulary,
    context: Iri,
    terms: Vec<VocabularyTerm>,
}

impl CopyPlan {
    /// Resources whose description moves into the snapshot graph
    fn owned(&self) -> impl Iterator<Item = &Iri> {
        std::iter::once(&self.vocabulary.iri)
            .chain(self.vocabulary.glossary.iter())
            .chain(self.vocabulary.document.iter())
            .chain(self.terms.iter().map(|t| &t.iri))
    }
}

/// Creates a snapshot of a vocabulary and of every vocabulary related to it.
///
/// Holds one timestamp, fixed at construction and truncated to seconds; every
/// graph written by [`create_snapshot`](Self::create_snapshot) uses it.
pub struct SnapshotCreator {
    repository: VocabularyRepository,
    resolver: Box<dyn RelatedVocabularyResolver>,
    config: SnapshotConfig,
    timestamp: DateTime<Utc>,
}

impl SnapshotCreator {
    pub fn new(
        repository: VocabularyRepository,
        resolver: Box<dyn RelatedVocabularyResolver>,
        config: SnapshotConfig,
    ) -> Self {
        Self::at(repository, resolver, config, Utc::now())
    }

    /// Creator with a fixed timestamp
    pub fn at(
        repository: VocabularyRepository,
        resolver: Box<dyn RelatedVocabularyResolver>,
        config: SnapshotConfig,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            repository,
            resolver,
            config,
            timestamp: truncate_to_seconds(timestamp),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The suffix appended to every snapshotted IRI
    pub fn suffix(&self) -> String {
        snapshot_suffix(&self.config.separator, self.timestamp)
    }

    /// Snapshot `vocabulary` together with its related vocabularies.
    ///
    /// All graphs are written in one atomic batch. The returned snapshot
    /// describes the origin vocabulary only.
    pub fn create_snapshot(&self, vocabulary: &Iri) -> TermGraphResult<Snapshot> {
        if self.repository.is_snapshot(vocabulary)? {
            return Err(TermGraphError::UnsupportedOperation(format!(
                "{} is itself a snapshot",
                vocabulary
            )));
        }
        if !self.repository.exists(vocabulary)? {
            return Err(TermGraphError::not_found("Vocabulary", vocabulary));
        }

        let related = self
            .resolver
            .related_vocabularies(vocabulary, &self.config.cascade_relations)?;
        let plans = self.plan(vocabulary, &related)?;
        let suffix = self.suffix();

        for plan in &plans {
            let target = plan.vocabulary.iri.with_suffix(&suffix);
            if self.repository.store().contains_graph(&target)? {
                return Err(TermGraphError::SnapshotConflict(target));
            }
        }

        let rewrites: HashMap<Iri, Iri> = plans
            .iter()
            .flat_map(CopyPlan::owned)
            .map(|iri| (iri.clone(), iri.with_suffix(&suffix)))
            .collect();

        let mut quads = Vec::new();
        for plan in &plans {
            quads.extend(self.copy(plan, &rewrites, &suffix)?);
        }
        self.repository.store().apply(&[GraphUpdate::Insert(quads)])?;

        tracing::info!(
            %vocabulary,
            cascade = plans.len(),
            timestamp = %self.timestamp,
            "created vocabulary snapshot"
        );

        Ok(Snapshot {
            iri: vocabulary.with_suffix(&suffix),
            created: self.timestamp,
            version_of: vocabulary.clone(),
            kind: SnapshotKind::Vocabulary,
        })
    }

    /// Read every live vocabulary of the cascade; snapshots and vocabularies
    /// without metadata are skipped.
    fn plan(&self, origin: &Iri, related: &std::collections::BTreeSet<Iri>) -> TermGraphResult<Vec<CopyPlan>> {
        let mut plans = Vec::new();
        for vocabulary in related {
            if self.repository.is_snapshot(vocabulary)? {
                tracing::debug!(%vocabulary, "skipping snapshot reached by the cascade");
                continue;
            }
            let Some((found, context)) = self.repository.find(vocabulary)? else {
                if vocabulary == origin {
                    return Err(TermGraphError::not_found("Vocabulary", vocabulary));
                }
                tracing::debug!(%vocabulary, "skipping related vocabulary without metadata");
                continue;
            };
            let terms = self.repository.terms_in(&found, &context)?;
            plans.push(CopyPlan {
                vocabulary: found,
                context,
                terms,
            });
        }
        Ok(plans)
    }

    /// Quads of one snapshot graph: owned descriptions with cascade IRIs
    /// rewritten, plus version metadata for the vocabulary and its terms
    fn copy(&self, plan: &CopyPlan, rewrites: &HashMap<Iri, Iri>, suffix: &str) -> TermGraphResult<Vec<Quad>> {
        let graph = plan.vocabulary.iri.with_suffix(suffix);
        let owned: HashSet<&Iri> = plan.owned().collect();
        let rewrite = |iri: &Iri| rewrites.get(iri).cloned().unwrap_or_else(|| iri.clone());

        let source = self
            .repository
            .store()
            .find(&QuadPattern::new().in_graph(plan.context.clone()))?;

        let mut quads: Vec<Quad> = source
            .into_iter()
            .filter(|q| owned.contains(&q.subject))
            .map(|q| Quad {
                subject: rewrite(&q.subject),
                object: match q.object {
                    Term::Iri { ref iri } => Term::iri(rewrite(iri)),
                    literal => literal,
                },
                predicate: q.predicate,
                graph: graph.clone(),
            })
            .collect();

        let created = Literal::date_time(self.timestamp);
        let mut tag = |original: &Iri, kind: SnapshotKind| {
            let snapshot = rewrite(original);
            quads.push(Quad::new(snapshot.clone(), ns::rdf::TYPE, kind.type_iri(), graph.clone()));
            quads.push(Quad::new(snapshot.clone(), ns::model::VERSION_OF, original.clone(), graph.clone()));
            quads.push(Quad::new(snapshot, ns::model::CREATED, created.clone(), graph.clone()));
        };
        tag(&plan.vocabulary.iri, SnapshotKind::Vocabulary);
        for term in &plan.terms {
            tag(&term.iri, SnapshotKind::Term);
        }
        Ok(quads)
    }
}
