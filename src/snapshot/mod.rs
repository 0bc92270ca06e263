//! Cascading vocabulary snapshots
//!
//! A snapshot is an immutable copy of a vocabulary stored in its own graph
//! named `<vocabulary><separator>/<timestamp>`. Creating a snapshot of one
//! vocabulary also snapshots every related vocabulary, all under the same
//! timestamp, so that the cascade can later be regrouped (and removed) by
//! timestamp alone.
//!
//! [`SnapshotCreator`] and [`SnapshotRemover`] are built fresh for each
//! operation and dropped afterwards.

mod creator;
mod query;
mod remover;

pub use creator::SnapshotCreator;
pub use query::SnapshotQuery;
pub use remover::SnapshotRemover;

use chrono::{DateTime, SubsecRound, Utc};

/// Timestamp format used in snapshot identifiers: no colons, second precision
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H%M%SZ";

/// Truncate to whole seconds
pub fn truncate_to_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(0)
}

/// `<separator>/<timestamp>`, appended to a source IRI to name its snapshot
pub fn snapshot_suffix(separator: &str, at: DateTime<Utc>) -> String {
    format!("{}/{}", separator, truncate_to_seconds(at).format(TIMESTAMP_FORMAT))
}
