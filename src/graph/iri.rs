//! Iri: identity of every resource and named graph

use serde::{Deserialize, Serialize};

/// An absolute IRI naming a resource or a named graph.
///
/// Serializes as a plain string. No syntactic validation is performed; the
/// store treats IRIs as opaque keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Iri(String);

impl Iri {
    /// Create an Iri from a string
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Append `suffix` verbatim, e.g. a snapshot suffix `/version/2024-01-01T000000Z`
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}{}", self.0, suffix))
    }
}

impl std::fmt::Display for Iri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Iri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&Iri> for Iri {
    fn from(iri: &Iri) -> Self {
        iri.clone()
    }
}

impl AsRef<Iri> for Iri {
    fn as_ref(&self) -> &Iri {
        self
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_suffix_appends_verbatim() {
        let iri = Iri::from("https://example.org/vocab");
        assert_eq!(
            iri.with_suffix("/version/2024-01-01T000000Z").as_str(),
            "https://example.org/vocab/version/2024-01-01T000000Z"
        );
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let iri = Iri::from("https://example.org/a");
        let json = serde_json::to_string(&iri).unwrap();
        assert_eq!(json, "\"https://example.org/a\"");
    }
}
