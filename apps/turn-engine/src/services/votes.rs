use tracing::{debug, info};
use uuid::Uuid;

use super::MutationResult;
use crate::adapters::tree::codec::FieldMap;
use crate::adapters::tree::path;
use crate::domain::{append_vote, archive_results, ensure_key, ArchiveOutcome, GameTransition};
use crate::entities::{EpochMillis, StepResult, Vote};
use crate::error::AppError;
use crate::repos::games;
use crate::state::engine_state::EngineState;

/// Vote recording and result archival.
#[derive(Default)]
pub struct VoteService;

impl VoteService {
    pub fn new() -> Self {
        Self
    }

    /// Append one result for `source_gamer_id` to the game's current step.
    ///
    /// Only `games/{g}/steps/{current}/result/{gamer}` is written, so votes by
    /// other gamers and all other game fields are untouched.
    pub async fn record_vote(
        &self,
        state: &EngineState,
        game_bin: &str,
        source_gamer_id: &str,
        vote: Vote,
    ) -> Result<MutationResult<StepResult>, AppError> {
        debug!(game_bin, source_gamer_id, step_bin = %vote.step_bin, "Recording vote");
        ensure_key("game", game_bin)?;
        ensure_key("gamer", source_gamer_id)?;
        let _guard = state.write_guard().await;

        let mut game = games::require_game(state.store(), game_bin).await?;
        let result_bin = Uuid::new_v4().to_string();
        let (current, results) =
            append_vote(&mut game, source_gamer_id, vote, result_bin, EpochMillis::now())?;
        ensure_key("step", &current)?;

        let at = path::game(game_bin);
        let fields = FieldMap::new().with(
            &at,
            path::step_result_field(&current, source_gamer_id),
            &results,
        )?;
        games::patch_game(state.store(), game_bin, fields.into_inner()).await?;

        let recorded = results
            .last()
            .cloned()
            .ok_or_else(|| AppError::internal("vote was not appended"))?;
        info!(
            game_bin,
            step_bin = %current,
            gamer_id = source_gamer_id,
            votes_for_gamer = results.len(),
            "Vote recorded"
        );
        Ok(MutationResult::new(
            recorded,
            vec![GameTransition::VoteRecorded {
                step_bin: current,
                gamer_id: source_gamer_id.to_string(),
            }],
        ))
    }

    /// Move every step's results into the game's permanent `step_results`.
    ///
    /// `steps` and `step_results` are written in one update. With no new
    /// votes since the last call nothing is written.
    pub async fn archive_step_results(
        &self,
        state: &EngineState,
        game_bin: &str,
    ) -> Result<MutationResult<ArchiveOutcome>, AppError> {
        debug!(game_bin, "Archiving step results");
        let _guard = state.write_guard().await;

        let mut game = games::require_game(state.store(), game_bin).await?;
        let outcome = archive_results(&mut game);
        if outcome.moved == 0 {
            debug!(game_bin, "No step results to archive");
            return Ok(MutationResult::quiet(outcome));
        }

        let at = path::game(game_bin);
        let fields = FieldMap::new()
            .with(&at, "steps", &game.steps)?
            .with(&at, "step_results", &game.step_results)?;
        games::patch_game(state.store(), game_bin, fields.into_inner()).await?;

        info!(
            game_bin,
            moved = outcome.moved,
            steps_cleared = outcome.steps_cleared,
            "Step results archived"
        );
        Ok(MutationResult::new(
            outcome,
            vec![GameTransition::ResultsArchived {
                moved: outcome.moved,
            }],
        ))
    }
}
