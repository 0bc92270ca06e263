//! Relations recorded by the external modeling tool

use super::{RelatedVocabularyResolver, RelationSet, TermOwners};
use crate::error::TermGraphResult;
use crate::graph::Iri;
use crate::ns;
use crate::repository::VocabularyRepository;
use crate::storage::QuadPattern;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// One node of the link graph
#[derive(Debug, Default)]
struct TermLink {
    source: Option<Iri>,
    target: Option<Iri>,
    active: bool,
}

/// Reads the modeling tool's link graph: every active link with one end among
/// the vocabulary's terms relates the vocabulary owning the other end.
/// Only that single layer of links is considered; the mapping predicates
/// passed in are ignored since links are untyped.
pub struct ExternalLinkRelatedVocabularies {
    repository: VocabularyRepository,
    link_graph: Iri,
}

impl ExternalLinkRelatedVocabularies {
    pub fn new(repository: VocabularyRepository, link_graph: Iri) -> Self {
        Self {
            repository,
            link_graph,
        }
    }

    fn links(&self) -> TermGraphResult<Vec<TermLink>> {
        let quads = self
            .repository
            .store()
            .find(&QuadPattern::new().in_graph(self.link_graph.clone()))?;

        let mut links: BTreeMap<Iri, TermLink> = BTreeMap::new();
        for quad in quads {
            let link = links.entry(quad.subject.clone()).or_default();
            match quad.predicate.as_str() {
                ns::model::LINK_SOURCE => link.source = quad.object_iri().cloned(),
                ns::model::LINK_TARGET => link.target = quad.object_iri().cloned(),
                ns::model::LINK_ACTIVE => {
                    link.active = quad
                        .object
                        .as_literal()
                        .and_then(|l| l.as_bool())
                        .unwrap_or(false)
                }
                _ => {}
            }
        }
        Ok(links.into_values().collect())
    }
}

impl RelatedVocabularyResolver for ExternalLinkRelatedVocabularies {
    fn related_vocabularies(
        &self,
        vocabulary: &Iri,
        _relations: &RelationSet,
    ) -> TermGraphResult<BTreeSet<Iri>> {
        let mut related = BTreeSet::from([vocabulary.clone()]);
        let Some((found, context)) = self.repository.find(vocabulary)? else {
            return Ok(related);
        };
        let terms: HashSet<Iri> = self
            .repository
            .terms_in(&found, &context)?
            .into_iter()
            .map(|t| t.iri)
            .collect();
        if terms.is_empty() {
            return Ok(related);
        }

        let mut owners = TermOwners::new(&self.repository);
        for link in self.links()?.into_iter().filter(|l| l.active) {
            let (Some(source), Some(target)) = (link.source, link.target) else {
                continue;
            };
            let other = match (terms.contains(&source), terms.contains(&target)) {
                (true, false) => target,
                (false, true) => source,
                _ => continue,
            };
            if let Some(owner) = owners.owner(&other)? {
                related.insert(owner);
            }
        }
        Ok(related)
    }
}
