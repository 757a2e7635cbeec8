//! Game status and current-step rules.

use crate::entities::{Game, GameStatus, Step};

use super::game_transition::GameTransition;

/// Outcome of trying to move a game to its next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAdvance {
    Advanced { from: Option<String>, to: String },
    /// The pointer could not be followed; the game was not modified.
    Unchanged { reason: String },
}

/// Set a game's status, reporting the edge if it changed.
pub fn apply_status(game: &mut Game, status: GameStatus) -> Option<GameTransition> {
    if game.status == status {
        return None;
    }
    game.status = status;
    match status {
        GameStatus::Started => Some(GameTransition::GameStarted),
        GameStatus::Ended => Some(GameTransition::GameEnded),
        GameStatus::Waiting => None,
    }
}

/// The step a step points to, ignoring blank pointers.
pub fn next_step_of(step: &Step) -> Option<&str> {
    step.next_step.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub fn current_step(game: &Game) -> Option<&Step> {
    game.current_step
        .as_deref()
        .and_then(|bin| game.steps.get(bin))
}
