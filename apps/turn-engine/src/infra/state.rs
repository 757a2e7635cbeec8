use std::sync::Arc;

use tracing::info;

use crate::adapters::tree::{InMemoryTree, RestTree, TreeStore};
use crate::config::engine::EngineConfig;
use crate::config::store::{store_settings, StoreKind, StoreProfile};
use crate::error::AppError;
use crate::state::engine_state::EngineState;

/// Builder for creating EngineState instances (used in both tests and main)
pub struct StateBuilder {
    store: Option<Arc<dyn TreeStore>>,
    profile: Option<StoreProfile>,
    config: Option<EngineConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            profile: None,
            config: None,
        }
    }

    /// Use an already constructed store; takes precedence over a profile.
    pub fn with_store(mut self, store: Arc<dyn TreeStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Resolve the store from environment variables for `profile`.
    pub fn with_profile(mut self, profile: StoreProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn build(self) -> Result<EngineState, AppError> {
        let config = match self.config {
            Some(config) => config,
            None => EngineConfig::from_env()?,
        };
        let store: Arc<dyn TreeStore> = match (self.store, self.profile) {
            (Some(store), _) => store,
            (None, Some(profile)) => {
                let settings = store_settings(profile)?;
                match settings.kind {
                    StoreKind::InMemory => Arc::new(InMemoryTree::new()),
                    StoreKind::Rest { base_url } => {
                        info!(%base_url, "using REST tree store");
                        let tree = RestTree::new(&base_url, settings.auth_token)
                            .map_err(|e| AppError::config(e.to_string()))?;
                        Arc::new(tree)
                    }
                }
            }
            // No store configured: run against a process-local tree
            (None, None) => Arc::new(InMemoryTree::new()),
        };
        Ok(EngineState::new(store, config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
