//! Path-addressed tree store adapter.
//!
//! The authoritative game state lives in a hierarchical key/value tree (a
//! Firebase Realtime Database in production). This module only moves JSON
//! values in and out of it; business rules live in `repos`, `domain` and
//! `services`. The store offers no transactions.

use async_trait::async_trait;
use serde_json::{Map, Value};

pub mod codec;
pub mod error;
pub mod memory;
pub mod path;
pub mod rest;

pub use error::StoreError;
pub use memory::InMemoryTree;
pub use path::StorePath;
pub use rest::RestTree;

/// Operations the engine consumes from the external tree store.
///
/// Implementations must be cheap to share; the engine holds one instance for
/// the whole process behind an `Arc`.
#[async_trait]
pub trait TreeStore: Send + Sync {
    /// Read the subtree at `path`. Absent (or null) values yield `None`.
    async fn get(&self, path: &StorePath) -> Result<Option<Value>, StoreError>;

    /// Overwrite the subtree at `path`. Writing null removes it.
    async fn set(&self, path: &StorePath, value: Value) -> Result<(), StoreError>;

    /// Merge the named fields into the node at `path`.
    ///
    /// Field names may themselves be slash-separated relative paths, in which
    /// case only that nested location is replaced.
    async fn update(&self, path: &StorePath, fields: Map<String, Value>) -> Result<(), StoreError>;

    /// Remove the subtree at `path`. Removing an absent path succeeds.
    async fn delete(&self, path: &StorePath) -> Result<(), StoreError>;

    /// Append `value` under `path` with a store-generated, time-ordered key.
    async fn push(&self, path: &StorePath, value: Value) -> Result<String, StoreError>;
}
