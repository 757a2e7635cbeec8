use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::adapters::tree::{InMemoryTree, TreeStore};
use crate::config::engine::EngineConfig;

/// Shared resources every service call runs against.
///
/// Cloning is cheap; clones share the store handle and the write lock.
#[derive(Clone)]
pub struct EngineState {
    /// The tree holding all game state
    pub store: Arc<dyn TreeStore>,
    /// Serializes read-modify-write sequences issued by this process
    write_lock: Arc<Mutex<()>>,
    pub config: EngineConfig,
}

impl EngineState {
    pub fn new(store: Arc<dyn TreeStore>, config: EngineConfig) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
            config,
        }
    }

    pub fn store(&self) -> &dyn TreeStore {
        self.store.as_ref()
    }

    /// Hold for the whole of a read-modify-write so two calls in this process
    /// cannot interleave on the same records. Writers in other processes are
    /// not excluded.
    pub async fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// State over a fresh in-memory tree, returning the tree for inspection
    /// and fault injection.
    pub fn for_tests() -> (Self, Arc<InMemoryTree>) {
        let tree = Arc::new(InMemoryTree::new());
        let state = Self::new(tree.clone(), EngineConfig::default());
        (state, tree)
    }
}

impl fmt::Debug for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
