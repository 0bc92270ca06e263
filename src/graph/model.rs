//! Domain records read from the store: vocabularies, terms, snapshots

use super::iri::Iri;
use crate::ns;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A SKOS vocabulary as described by its metadata triples
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub iri: Iri,
    /// The `skos:ConceptScheme` holding the vocabulary's terms
    pub glossary: Option<Iri>,
    pub document: Option<Iri>,
    /// Vocabularies declared via `model:importsVocabulary`
    pub imports: BTreeSet<Iri>,
    pub language: Option<String>,
}

impl Vocabulary {
    pub fn new(iri: impl Into<Iri>) -> Self {
        Self {
            iri: iri.into(),
            glossary: None,
            document: None,
            imports: BTreeSet::new(),
            language: None,
        }
    }
}

impl AsRef<Iri> for Vocabulary {
    fn as_ref(&self) -> &Iri {
        &self.iri
    }
}

/// A term (concept) of a vocabulary, identified by glossary containment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabularyTerm {
    pub iri: Iri,
    pub vocabulary: Iri,
    pub glossary: Iri,
}

impl AsRef<Iri> for VocabularyTerm {
    fn as_ref(&self) -> &Iri {
        &self.iri
    }
}

/// What kind of asset a snapshot versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotKind {
    Vocabulary,
    Term,
}

impl SnapshotKind {
    /// The rdf:type tagging snapshots of this kind
    pub fn type_iri(&self) -> Iri {
        match self {
            SnapshotKind::Vocabulary => Iri::from(ns::model::VOCABULARY_SNAPSHOT),
            SnapshotKind::Term => Iri::from(ns::model::TERM_SNAPSHOT),
        }
    }

    pub fn from_type_iri(iri: &Iri) -> Option<Self> {
        match iri.as_str() {
            ns::model::VOCABULARY_SNAPSHOT => Some(SnapshotKind::Vocabulary),
            ns::model::TERM_SNAPSHOT => Some(SnapshotKind::Term),
            _ => None,
        }
    }
}

impl std::fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotKind::Vocabulary => write!(f, "vocabulary"),
            SnapshotKind::Term => write!(f, "term"),
        }
    }
}

/// An immutable, timestamped copy of an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub iri: Iri,
    pub created: DateTime<Utc>,
    /// The live asset this snapshot is a version of
    pub version_of: Iri,
    pub kind: SnapshotKind,
}

impl AsRef<Iri> for Snapshot {
    fn as_ref(&self) -> &Iri {
        &self.iri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_kind_type_roundtrip() {
        for kind in [SnapshotKind::Vocabulary, SnapshotKind::Term] {
            assert_eq!(SnapshotKind::from_type_iri(&kind.type_iri()), Some(kind));
        }
        assert_eq!(SnapshotKind::from_type_iri(&Iri::from(ns::model::VOCABULARY)), None);
    }
}
