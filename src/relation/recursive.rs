//! Transitive closure over mapping links and imports

use super::{neighbourhood, RelatedVocabularyResolver, RelationSet, TermOwners};
use crate::error::TermGraphResult;
use crate::graph::Iri;
use crate::repository::VocabularyRepository;
use std::collections::{BTreeSet, VecDeque};

/// Breadth-first closure following, for every visited vocabulary, the mapping
/// links of its terms and its declared imports. The visited set guarantees
/// termination on cyclic graphs.
pub struct RecursiveRelatedVocabularies {
    repository: VocabularyRepository,
}

impl RecursiveRelatedVocabularies {
    pub fn new(repository: VocabularyRepository) -> Self {
        Self { repository }
    }
}

impl RelatedVocabularyResolver for RecursiveRelatedVocabularies {
    fn related_vocabularies(
        &self,
        vocabulary: &Iri,
        relations: &RelationSet,
    ) -> TermGraphResult<BTreeSet<Iri>> {
        let mut owners = TermOwners::new(&self.repository);
        let mut visited: BTreeSet<Iri> = BTreeSet::new();
        let mut queue: VecDeque<Iri> = VecDeque::new();
        visited.insert(vocabulary.clone());
        queue.push_back(vocabulary.clone());

        while let Some(current) = queue.pop_front() {
            let next = neighbourhood(&self.repository, &mut owners, &current, relations)?;
            for neighbour in next.mapped.into_iter().chain(next.imports) {
                if visited.insert(neighbour.clone()) {
                    queue.push_back(neighbour);
                }
            }
        }

        tracing::debug!(%vocabulary, related = visited.len(), "computed related vocabulary closure");
        Ok(visited)
    }
}
