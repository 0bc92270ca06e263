//! One-hop SKOS mapping strategy

use super::{neighbourhood, RelatedVocabularyResolver, RelationSet, TermOwners};
use crate::error::TermGraphResult;
use crate::graph::Iri;
use crate::repository::VocabularyRepository;
use std::collections::BTreeSet;

/// Vocabularies of terms one mapping hop away from the vocabulary's terms.
/// Imports and further hops are not followed.
pub struct SkosRelatedVocabularies {
    repository: VocabularyRepository,
}

impl SkosRelatedVocabularies {
    pub fn new(repository: VocabularyRepository) -> Self {
        Self { repository }
    }
}

impl RelatedVocabularyResolver for SkosRelatedVocabularies {
    fn related_vocabularies(
        &self,
        vocabulary: &Iri,
        relations: &RelationSet,
    ) -> TermGraphResult<BTreeSet<Iri>> {
        let mut owners = TermOwners::new(&self.repository);
        let mut related = neighbourhood(&self.repository, &mut owners, vocabulary, relations)?.mapped;
        related.insert(vocabulary.clone());
        Ok(related)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{iri, Fixture};
    use crate::ns;
    use crate::relation::SkosRelation;

    fn chain() -> Fixture {
        let f = Fixture::new();
        f.vocabulary("http://ex.org/v1")
            .vocabulary("http://ex.org/v2")
            .vocabulary("http://ex.org/v3")
            .term("http://ex.org/v1", "http://ex.org/v1/t1")
            .term("http://ex.org/v2", "http://ex.org/v2/t2")
            .term("http://ex.org/v3", "http://ex.org/v3/t3")
            .link("http://ex.org/v1", "http://ex.org/v1/t1", ns::skos::RELATED_MATCH, "http://ex.org/v2/t2")
            .link("http://ex.org/v2", "http://ex.org/v2/t2", ns::skos::EXACT_MATCH, "http://ex.org/v3/t3");
        f
    }

    #[test]
    fn test_isolated_vocabulary_relates_to_itself() {
        let f = Fixture::new();
        f.vocabulary("http://ex.org/v1");
        let resolver = SkosRelatedVocabularies::new(f.repository());
        let related = resolver
            .related_vocabularies(&iri("http://ex.org/v1"), &RelationSet::default())
            .unwrap();
        assert_eq!(related, BTreeSet::from([iri("http://ex.org/v1")]));
    }

    #[test]
    fn test_follows_a_single_hop_only() {
        let f = chain();
        let resolver = SkosRelatedVocabularies::new(f.repository());
        let related = resolver
            .related_vocabularies(&iri("http://ex.org/v1"), &RelationSet::default())
            .unwrap();
        assert_eq!(related, BTreeSet::from([iri("http://ex.org/v1"), iri("http://ex.org/v2")]));
    }

    #[test]
    fn test_respects_relation_set() {
        let f = chain();
        let resolver = SkosRelatedVocabularies::new(f.repository());
        let only_exact: RelationSet = [SkosRelation::ExactMatch].into_iter().collect();
        let related = resolver
            .related_vocabularies(&iri("http://ex.org/v1"), &only_exact)
            .unwrap();
        assert_eq!(related, BTreeSet::from([iri("http://ex.org/v1")]));
    }

    #[test]
    fn test_ignores_imports() {
        let f = Fixture::new();
        f.vocabulary("http://ex.org/a")
            .vocabulary("http://ex.org/b")
            .import("http://ex.org/a", "http://ex.org/b");
        let resolver = SkosRelatedVocabularies::new(f.repository());
        let related = resolver
            .related_vocabularies(&iri("http://ex.org/a"), &RelationSet::default())
            .unwrap();
        assert_eq!(related, BTreeSet::from([iri("http://ex.org/a")]));
    }
}
