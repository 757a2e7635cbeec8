//! Vote recording and archival over an in-memory `Game`.

use std::collections::BTreeMap;

use crate::entities::{EpochMillis, Game, StepResult, Vote};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Append one result for `gamer_id` to the game's current step.
///
/// Votes are never deduplicated or replaced. Returns the current step bin and
/// the gamer's full result list for that step after the append.
pub fn append_vote(
    game: &mut Game,
    gamer_id: &str,
    vote: Vote,
    result_bin: String,
    at: EpochMillis,
) -> Result<(String, Vec<StepResult>), DomainError> {
    let current = game
        .current_step
        .clone()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            DomainError::validation(
                ValidationKind::NoCurrentStep,
                format!("game {} has no current step", game.bin),
            )
        })?;
    let game_bin = game.bin.clone();
    let step = game.steps.get_mut(&current).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Step,
            format!("current step {current} is not part of game {game_bin}"),
        )
    })?;

    let results = step.result.entry(gamer_id.to_string()).or_default();
    results.push(StepResult {
        bin: result_bin,
        step_bin: vote.step_bin.clone(),
        game_bin,
        gamer_id: gamer_id.to_string(),
        timestamp: at,
        vote,
    });
    Ok((current, results.clone()))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveOutcome {
    /// Results moved into `step_results` by this call.
    pub moved: usize,
    /// Steps whose transient results were cleared.
    pub steps_cleared: usize,
}

/// Move every step's transient results into the game's permanent history.
///
/// Archived entries are appended per gamer, ordered by step then timestamp;
/// nothing already archived is rewritten. Afterwards no step holds results,
/// so a second call without new votes moves nothing.
pub fn archive_results(game: &mut Game) -> ArchiveOutcome {
    let mut order: Vec<(usize, String)> = game
        .steps
        .values()
        .map(|s| (s.step_index, s.bin.clone()))
        .collect();
    order.sort();

    let mut outcome = ArchiveOutcome::default();
    let mut moved: BTreeMap<String, Vec<StepResult>> = BTreeMap::new();
    for (_, bin) in order {
        let Some(step) = game.steps.get_mut(&bin) else {
            continue;
        };
        if step.result.is_empty() {
            continue;
        }
        outcome.steps_cleared += 1;
        let mut batch: Vec<StepResult> = std::mem::take(&mut step.result)
            .into_values()
            .flatten()
            .collect();
        batch.sort_by_key(|r| r.timestamp);
        for result in batch {
            moved.entry(result.gamer_id.clone()).or_default().push(result);
        }
    }

    for (gamer_id, mut results) in moved {
        outcome.moved += results.len();
        game.step_results
            .entry(gamer_id)
            .or_default()
            .append(&mut results);
    }
    outcome
}
