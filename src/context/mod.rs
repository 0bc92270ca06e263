//! Vocabulary context resolution
//!
//! A vocabulary's triples live in a named graph (its *context*). Usually the
//! graph is named after the vocabulary itself, but working copies and imports
//! can leave several graphs asserting the same vocabulary. Resolution picks the
//! canonical one or fails; it never guesses.
//!
//! Three layers implement [`VocabularyContextMapper`]:
//!
//! - [`RepositoryContextMapper`]: queries the store on every call
//! - [`CachingContextMapper`]: answers from a bulk-loaded index
//! - [`WorkspaceContextMapper`]: returns working-copy contexts of the selected workspace

mod caching;
mod repository;
mod workspace;

pub use caching::{CachingContextMapper, ContextIndex};
pub use repository::RepositoryContextMapper;
pub use workspace::WorkspaceContextMapper;

use crate::error::{TermGraphError, TermGraphResult};
use crate::graph::Iri;
use std::collections::{BTreeSet, HashSet};

/// Resolves vocabularies to the graphs physically holding them
pub trait VocabularyContextMapper: Send + Sync {
    /// The effective context of `vocabulary`
    ///
    /// Fails with [`TermGraphError::AmbiguousVocabularyContext`] when several
    /// graphs hold the vocabulary and none of them is canonical.
    fn get_vocabulary_context(&self, vocabulary: &Iri) -> TermGraphResult<Iri>;

    /// The vocabulary stored in `context`, if any
    fn get_vocabulary_in_context(&self, context: &Iri) -> TermGraphResult<Option<Iri>>;
}

/// Reduce the candidate graphs of `vocabulary` to its effective context.
///
/// - no candidate: the vocabulary's own IRI
/// - one candidate: that graph
/// - several: the only candidate whose derivation chain never reaches another
///   candidate. Chains of any length are followed; a cycle ends the walk.
///
/// `parent_of` returns the graph a context declares itself derived from.
pub fn resolve_candidates<F>(
    vocabulary: &Iri,
    candidates: &[Iri],
    mut parent_of: F,
) -> TermGraphResult<Iri>
where
    F: FnMut(&Iri) -> TermGraphResult<Option<Iri>>,
{
    let unique: BTreeSet<&Iri> = candidates.iter().collect();
    if unique.len() <= 1 {
        let only = unique.into_iter().next().cloned();
        return Ok(only.unwrap_or_else(|| vocabulary.clone()));
    }

    let mut roots = Vec::new();
    for candidate in &unique {
        let mut visited: HashSet<Iri> = HashSet::new();
        visited.insert((*candidate).clone());
        let mut derived = false;
        let mut current = parent_of(candidate)?;
        while let Some(parent) = current {
            if unique.contains(&parent) {
                derived = true;
                break;
            }
            if !visited.insert(parent.clone()) {
                break;
            }
            current = parent_of(&parent)?;
        }
        if !derived {
            roots.push((*candidate).clone());
        }
    }

    if roots.len() == 1 {
        let root = roots.remove(0);
        tracing::debug!(%vocabulary, context = %root, "resolved canonical context among candidates");
        return Ok(root);
    }

    Err(TermGraphError::AmbiguousVocabularyContext {
        vocabulary: vocabulary.clone(),
        candidates: unique.into_iter().cloned().collect(),
    })
}
