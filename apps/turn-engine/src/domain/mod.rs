//! Domain layer: pure turn, vote and membership rules. No store access.

pub mod game_transition;
pub mod invitations;
pub mod keys;
pub mod lifecycle;
pub mod membership;
pub mod results;
pub mod schedule;

#[cfg(test)]
mod tests_invitations;

// Re-exports for ergonomics
pub use game_transition::GameTransition;
pub use keys::ensure_key;
pub use lifecycle::StepAdvance;
pub use results::{append_vote, archive_results, ArchiveOutcome};
pub use schedule::{parse_start_time, schedule_steps, STEP_BUFFER_MS};
