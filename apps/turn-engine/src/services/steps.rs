use tracing::{debug, info};

use crate::domain::{parse_start_time, schedule_steps};
use crate::entities::{EpochMillis, Step};
use crate::error::AppError;
use crate::repos::{games, steps};
use crate::state::engine_state::EngineState;

/// Step scheduling and placement.
#[derive(Default)]
pub struct StepService;

impl StepService {
    pub fn new() -> Self {
        Self
    }

    /// Index and time `steps` back to back from `start_time` (decimal epoch
    /// millis) and persist each at `steps/{bin}`.
    ///
    /// The first failed write aborts the call; steps written before it stay
    /// written. An empty list is a no-op.
    pub async fn schedule_steps(
        &self,
        state: &EngineState,
        mut steps_to_schedule: Vec<Step>,
        start_time: &str,
    ) -> Result<Vec<Step>, AppError> {
        if steps_to_schedule.is_empty() {
            debug!("No steps to schedule");
            return Ok(steps_to_schedule);
        }
        let start = parse_start_time(start_time)?;
        schedule_steps(&mut steps_to_schedule, start, state.config.step_buffer_ms);

        for step in &steps_to_schedule {
            steps::save_step(state.store(), step).await?;
        }
        info!(
            count = steps_to_schedule.len(),
            start = %start,
            "Steps scheduled"
        );
        Ok(steps_to_schedule)
    }

    /// Copy already scheduled steps into `games/{g}/steps/{bin}`.
    pub async fn add_steps_to_game(
        &self,
        state: &EngineState,
        game_bin: &str,
        game_steps: Vec<Step>,
    ) -> Result<Vec<Step>, AppError> {
        debug!(game_bin, count = game_steps.len(), "Adding steps to game");
        games::require_game(state.store(), game_bin).await?;
        for step in &game_steps {
            steps::save_game_step(state.store(), game_bin, step).await?;
        }
        Ok(game_steps)
    }

    /// A game's steps ordered by index.
    pub async fn steps_for_game(&self, state: &EngineState, game_bin: &str) -> Result<Vec<Step>, AppError> {
        Ok(steps::steps_for_game(state.store(), game_bin).await?)
    }

    pub async fn set_game_times(
        &self,
        state: &EngineState,
        game_bin: &str,
        start: EpochMillis,
        end: EpochMillis,
    ) -> Result<(), AppError> {
        debug!(game_bin, %start, %end, "Setting game times");
        let _guard = state.write_guard().await;
        games::require_game(state.store(), game_bin).await?;
        games::set_times(state.store(), game_bin, start, end).await?;
        Ok(())
    }
}
