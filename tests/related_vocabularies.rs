//! Related-vocabulary resolution under each configured strategy
//!
//! Run with: `cargo test --test related_vocabularies`

mod common;

use common::{iri, VocabularyFixture};
use std::collections::BTreeSet;
use termgraph::config::RelationConfig;
use termgraph::{ns, Config, Iri, RelationSet, RelationStrategy, SkosRelation};

const A: &str = "https://example.org/a";
const B: &str = "https://example.org/b";
const C: &str = "https://example.org/c";
const LINKS: &str = "https://example.org/links";

fn config(strategy: RelationStrategy) -> Config {
    Config {
        relations: RelationConfig {
            strategy,
            external_link_graph: Some(iri(LINKS)),
            ..RelationConfig::default()
        },
        ..Config::default()
    }
}

fn set(items: &[&str]) -> BTreeSet<Iri> {
    items.iter().map(|s| iri(s)).collect()
}

/// t1 ∈ A relatedMatch t2 ∈ B exactMatch t3 ∈ C
fn chain() -> VocabularyFixture {
    let f = VocabularyFixture::new();
    f.vocabulary(A)
        .vocabulary(B)
        .vocabulary(C)
        .term(A, "https://example.org/a/t1")
        .term(B, "https://example.org/b/t2")
        .term(C, "https://example.org/c/t3")
        .link(A, "https://example.org/a/t1", ns::skos::RELATED_MATCH, "https://example.org/b/t2")
        .link(B, "https://example.org/b/t2", ns::skos::EXACT_MATCH, "https://example.org/c/t3");
    f
}

#[test]
fn origin_is_always_included() {
    let f = VocabularyFixture::new();
    f.vocabulary(A);
    for strategy in [RelationStrategy::Skos, RelationStrategy::Recursive, RelationStrategy::ExternalLink] {
        let api = f.api_with(config(strategy));
        assert_eq!(api.get_related_vocabularies(iri(A), None).unwrap(), set(&[A]), "{:?}", strategy);
        // Unknown vocabularies still contain themselves
        assert_eq!(api.get_related_vocabularies(iri(C), None).unwrap(), set(&[C]), "{:?}", strategy);
    }
}

#[test]
fn recursive_follows_imports() {
    let f = VocabularyFixture::new();
    f.vocabulary(A).vocabulary(B).vocabulary(C).import(A, B);
    let api = f.api_with(config(RelationStrategy::Recursive));
    assert_eq!(api.get_related_vocabularies(iri(A), None).unwrap(), set(&[A, B]));
    // Imports are directed
    assert_eq!(api.get_related_vocabularies(iri(B), None).unwrap(), set(&[B]));
}

#[test]
fn recursive_follows_mapping_chain() {
    let f = chain();
    let api = f.api_with(config(RelationStrategy::Recursive));
    assert_eq!(api.get_related_vocabularies(iri(A), None).unwrap(), set(&[A, B, C]));
}

#[test]
fn recursive_terminates_on_cycle() {
    let f = chain();
    f.link(C, "https://example.org/c/t3", ns::skos::EXACT_MATCH, "https://example.org/a/t1")
        .import(B, A);
    let api = f.api_with(config(RelationStrategy::Recursive));
    assert_eq!(api.get_related_vocabularies(iri(A), None).unwrap(), set(&[A, B, C]));
    assert_eq!(api.get_related_vocabularies(iri(C), None).unwrap(), set(&[A, B, C]));
}

#[test]
fn skos_strategy_stops_after_one_hop() {
    let f = chain();
    let api = f.api_with(config(RelationStrategy::Skos));
    assert_eq!(api.get_related_vocabularies(iri(A), None).unwrap(), set(&[A, B]));
}

#[test]
fn relation_set_limits_followed_predicates() {
    let f = chain();
    let api = f.api_with(config(RelationStrategy::Recursive));
    let exact_only: RelationSet = [SkosRelation::ExactMatch].into_iter().collect();
    assert_eq!(
        api.get_related_vocabularies(iri(A), Some(&exact_only)).unwrap(),
        set(&[A])
    );
    assert_eq!(
        api.get_related_vocabularies(iri(B), Some(&exact_only)).unwrap(),
        set(&[B, C])
    );
}

#[test]
fn external_links_relate_one_layer_in_both_directions() {
    let f = VocabularyFixture::new();
    f.vocabulary(A)
        .vocabulary(B)
        .vocabulary(C)
        .term(A, "https://example.org/a/t1")
        .term(B, "https://example.org/b/t2")
        .term(C, "https://example.org/c/t3")
        .term_link(LINKS, "https://example.org/links/1", "https://example.org/b/t2", "https://example.org/a/t1", true)
        .term_link(LINKS, "https://example.org/links/2", "https://example.org/b/t2", "https://example.org/c/t3", true);
    let api = f.api_with(config(RelationStrategy::ExternalLink));

    assert_eq!(api.get_related_vocabularies(iri(A), None).unwrap(), set(&[A, B]));
    assert_eq!(api.get_related_vocabularies(iri(B), None).unwrap(), set(&[A, B, C]));
}

#[test]
fn inactive_external_links_are_ignored() {
    let f = VocabularyFixture::new();
    f.vocabulary(A)
        .vocabulary(B)
        .term(A, "https://example.org/a/t1")
        .term(B, "https://example.org/b/t2")
        .term_link(LINKS, "https://example.org/links/1", "https://example.org/a/t1", "https://example.org/b/t2", false);
    let api = f.api_with(config(RelationStrategy::ExternalLink));
    assert_eq!(api.get_related_vocabularies(iri(A), None).unwrap(), set(&[A]));
}

#[test]
fn external_link_strategy_requires_graph() {
    let yaml = "relations:\n  strategy: external_link\n";
    assert!(Config::from_yaml_str(yaml).is_err());
}
