//! Service layer: orchestrates repos and domain rules against an `EngineState`.
//!
//! Every read-modify-write sequence runs under the state's write guard.
//! Errors are returned as `AppError`; a failed call may have applied some of
//! its writes, and nothing is retried or rolled back.

pub mod catalog;
pub mod game_lifecycle;
pub mod groups;
pub mod invitations;
pub mod players;
pub mod steps;
pub mod votes;

use crate::domain::GameTransition;

pub use catalog::CatalogService;
pub use game_lifecycle::GameLifecycleService;
pub use groups::GroupService;
pub use invitations::InvitationService;
pub use players::PlayerService;
pub use steps::StepService;
pub use votes::VoteService;

/// Result of a state-changing call plus the transitions it caused.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult<T> {
    pub value: T,
    pub transitions: Vec<GameTransition>,
}

impl<T> MutationResult<T> {
    pub fn new(value: T, transitions: Vec<GameTransition>) -> Self {
        Self { value, transitions }
    }

    /// A result that changed nothing observable.
    pub fn quiet(value: T) -> Self {
        Self::new(value, Vec::new())
    }
}
