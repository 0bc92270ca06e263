//! Storage backends for termgraph
//!
//! The core talks to a quad store through the `TripleStore` trait.
//! The primary implementation is `SqliteStore` for persistent storage.

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{GraphUpdate, OpenStore, QuadPattern, StorageError, StorageResult, TripleStore};
