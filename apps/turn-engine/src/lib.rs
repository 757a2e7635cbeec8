#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod state;
pub mod telemetry;


// Re-exports for public API
pub use adapters::tree::{InMemoryTree, RestTree, StoreError, StorePath, TreeStore};
pub use config::engine::EngineConfig;
pub use config::store::{store_settings, StoreKind, StoreProfile, StoreSettings};
pub use domain::{GameTransition, StepAdvance};
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use infra::state::{build_state, StateBuilder};
pub use services::{
    CatalogService, GameLifecycleService, GroupService, InvitationService, MutationResult,
    PlayerService, StepService, VoteService,
};
pub use state::engine_state::EngineState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
