//! Related-vocabulary resolution
//!
//! Vocabularies are related through SKOS mapping links between their terms,
//! through import declarations, and through links kept by an external modeling
//! tool. Three strategies compute the related set; deployment configuration
//! picks one (see [`build_resolver`]). Every strategy includes the origin
//! vocabulary in its result.

mod external;
mod recursive;
mod skos;

pub use external::ExternalLinkRelatedVocabularies;
pub use recursive::RecursiveRelatedVocabularies;
pub use skos::SkosRelatedVocabularies;

use crate::config::{ConfigError, RelationConfig};
use crate::error::TermGraphResult;
use crate::graph::Iri;
use crate::ns;
use crate::repository::VocabularyRepository;
use crate::storage::QuadPattern;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

/// Computes the set of vocabularies related to a vocabulary
pub trait RelatedVocabularyResolver: Send + Sync {
    /// Related vocabularies including `vocabulary` itself
    fn related_vocabularies(
        &self,
        vocabulary: &Iri,
        relations: &RelationSet,
    ) -> TermGraphResult<BTreeSet<Iri>>;
}

/// SKOS properties that link terms across vocabularies
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkosRelation {
    Broader,
    Narrower,
    Related,
    BroadMatch,
    NarrowMatch,
    ExactMatch,
    CloseMatch,
    RelatedMatch,
}

impl SkosRelation {
    pub const ALL: [SkosRelation; 8] = [
        SkosRelation::Broader,
        SkosRelation::Narrower,
        SkosRelation::Related,
        SkosRelation::BroadMatch,
        SkosRelation::NarrowMatch,
        SkosRelation::ExactMatch,
        SkosRelation::CloseMatch,
        SkosRelation::RelatedMatch,
    ];

    pub fn predicate(&self) -> &'static str {
        match self {
            SkosRelation::Broader => ns::skos::BROADER,
            SkosRelation::Narrower => ns::skos::NARROWER,
            SkosRelation::Related => ns::skos::RELATED,
            SkosRelation::BroadMatch => ns::skos::BROAD_MATCH,
            SkosRelation::NarrowMatch => ns::skos::NARROW_MATCH,
            SkosRelation::ExactMatch => ns::skos::EXACT_MATCH,
            SkosRelation::CloseMatch => ns::skos::CLOSE_MATCH,
            SkosRelation::RelatedMatch => ns::skos::RELATED_MATCH,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SkosRelation::Broader => "broader",
            SkosRelation::Narrower => "narrower",
            SkosRelation::Related => "related",
            SkosRelation::BroadMatch => "broad_match",
            SkosRelation::NarrowMatch => "narrow_match",
            SkosRelation::ExactMatch => "exact_match",
            SkosRelation::CloseMatch => "close_match",
            SkosRelation::RelatedMatch => "related_match",
        }
    }
}

impl FromStr for SkosRelation {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkosRelation::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown SKOS relation '{}'", s)))
    }
}

/// The mapping predicates a traversal follows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationSet(BTreeSet<SkosRelation>);

impl RelationSet {
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, relation: SkosRelation) -> bool {
        self.0.contains(&relation)
    }

    pub fn iter(&self) -> impl Iterator<Item = SkosRelation> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `predicate` is one of the followed properties
    pub fn matches_predicate(&self, predicate: &Iri) -> bool {
        self.0.iter().any(|r| r.predicate() == predicate.as_str())
    }
}

/// `relatedMatch` and `exactMatch`
impl Default for RelationSet {
    fn default() -> Self {
        [SkosRelation::RelatedMatch, SkosRelation::ExactMatch]
            .into_iter()
            .collect()
    }
}

impl FromIterator<SkosRelation> for RelationSet {
    fn from_iter<I: IntoIterator<Item = SkosRelation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which resolver a deployment uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationStrategy {
    /// One hop over SKOS mapping links
    Skos,
    /// Transitive closure over mapping links and imports
    Recursive,
    /// One layer of the external modeling tool's link graph
    ExternalLink,
}

impl FromStr for RelationStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skos" => Ok(RelationStrategy::Skos),
            "recursive" => Ok(RelationStrategy::Recursive),
            "external_link" => Ok(RelationStrategy::ExternalLink),
            other => Err(ConfigError::Invalid(format!("unknown relation strategy '{}'", other))),
        }
    }
}

/// Build the resolver selected by `config`
pub fn build_resolver(
    config: &RelationConfig,
    repository: VocabularyRepository,
) -> TermGraphResult<Box<dyn RelatedVocabularyResolver>> {
    let resolver: Box<dyn RelatedVocabularyResolver> = match config.strategy {
        RelationStrategy::Skos => Box::new(SkosRelatedVocabularies::new(repository)),
        RelationStrategy::Recursive => Box::new(RecursiveRelatedVocabularies::new(repository)),
        RelationStrategy::ExternalLink => {
            let graph = config.external_link_graph.clone().ok_or_else(|| {
                ConfigError::Invalid("external_link strategy requires a link graph".to_string())
            })?;
            Box::new(ExternalLinkRelatedVocabularies::new(repository, graph))
        }
    };
    Ok(resolver)
}

/// Memoizing term → vocabulary lookup shared by one traversal
struct TermOwners<'a> {
    repository: &'a VocabularyRepository,
    owners: HashMap<Iri, Option<Iri>>,
}

impl<'a> TermOwners<'a> {
    fn new(repository: &'a VocabularyRepository) -> Self {
        Self {
            repository,
            owners: HashMap::new(),
        }
    }

    fn owner(&mut self, term: &Iri) -> TermGraphResult<Option<Iri>> {
        if let Some(owner) = self.owners.get(term) {
            return Ok(owner.clone());
        }
        let owner = self.repository.vocabulary_of_term(term)?;
        self.owners.insert(term.clone(), owner.clone());
        Ok(owner)
    }
}

/// Result of reading one vocabulary's outgoing edges
struct Neighbourhood {
    /// Vocabularies of terms reached by one mapping hop
    mapped: BTreeSet<Iri>,
    /// Vocabularies declared as imports
    imports: BTreeSet<Iri>,
}

/// Read the one-hop neighbourhood of `vocabulary` from its resolved context.
///
/// Links to terms without a known vocabulary are ignored; links between terms
/// of the same vocabulary add nothing.
fn neighbourhood(
    repository: &VocabularyRepository,
    owners: &mut TermOwners<'_>,
    vocabulary: &Iri,
    relations: &RelationSet,
) -> TermGraphResult<Neighbourhood> {
    let mut result = Neighbourhood {
        mapped: BTreeSet::new(),
        imports: BTreeSet::new(),
    };
    let Some((found, context)) = repository.find(vocabulary)? else {
        tracing::debug!(%vocabulary, "vocabulary has no metadata; no outgoing edges");
        return Ok(result);
    };
    result.imports = found.imports.clone();

    if relations.is_empty() {
        return Ok(result);
    }
    for term in repository.terms_in(&found, &context)? {
        let links = repository.store().find(
            &QuadPattern::new()
                .in_graph(context.clone())
                .with_subject(term.iri.clone()),
        )?;
        for link in links.iter().filter(|q| relations.matches_predicate(&q.predicate)) {
            let Some(target) = link.object_iri() else {
                continue;
            };
            if let Some(owner) = owners.owner(target)? {
                if owner != *vocabulary {
                    result.mapped.insert(owner);
                }
            }
        }
    }
    Ok(result)
}
