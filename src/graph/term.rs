//! RDF terms and quads

use super::iri::Iri;
use crate::ns;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A literal value with an optional language tag or datatype
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    pub language: Option<String>,
    pub datatype: Option<Iri>,
}

impl Literal {
    /// Plain string literal
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    /// Language-tagged string
    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            value: value.to_string(),
            language: None,
            datatype: Some(Iri::from(ns::xsd::BOOLEAN)),
        }
    }

    /// `xsd:dateTime` literal at second precision, always in UTC
    pub fn date_time(value: DateTime<Utc>) -> Self {
        Self {
            value: value.to_rfc3339_opts(SecondsFormat::Secs, true),
            language: None,
            datatype: Some(Iri::from(ns::xsd::DATE_TIME)),
        }
    }

    /// Interpret the literal as a boolean (`true`/`1`)
    pub fn as_bool(&self) -> Option<bool> {
        match self.value.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }

    /// Interpret the literal as an RFC 3339 date-time
    pub fn as_date_time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.value)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// The object position of a quad
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Term {
    Iri { iri: Iri },
    Literal { literal: Literal },
}

impl Term {
    pub fn iri(iri: impl Into<Iri>) -> Self {
        Term::Iri { iri: iri.into() }
    }

    pub fn literal(literal: Literal) -> Self {
        Term::Literal { literal }
    }

    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri { iri } => Some(iri),
            Term::Literal { .. } => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal { literal } => Some(literal),
            Term::Iri { .. } => None,
        }
    }
}

impl From<Iri> for Term {
    fn from(iri: Iri) -> Self {
        Term::Iri { iri }
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal { literal }
    }
}

/// A triple asserted inside a named graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quad {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Term,
    pub graph: Iri,
}

impl Quad {
    pub fn new(
        subject: impl Into<Iri>,
        predicate: impl Into<Iri>,
        object: impl Into<Term>,
        graph: impl Into<Iri>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            graph: graph.into(),
        }
    }

    /// The object as an IRI, if it is one
    pub fn object_iri(&self) -> Option<&Iri> {
        self.object.as_iri()
    }
}
