//! Game status, current-step pointer and roster management.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::MutationResult;
use crate::adapters::tree::codec::FieldMap;
use crate::adapters::tree::path;
use crate::domain::lifecycle::{apply_status, current_step, next_step_of};
use crate::domain::membership::seat_gamer;
use crate::domain::{GameTransition, StepAdvance};
use crate::entities::{Ability, Character, EpochMillis, Fate, Game, GameStatus, Gamer};
use crate::error::AppError;
use crate::repos::{catalog, games, steps};
use crate::state::engine_state::EngineState;

#[derive(Default)]
pub struct GameLifecycleService;

impl GameLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Write a new game record, replacing any game with the same bin.
    pub async fn initialize_game(&self, state: &EngineState, game: Game) -> Result<Game, AppError> {
        debug!(game_bin = %game.bin, "Initializing game");
        games::save_game(state.store(), &game).await?;
        info!(game_bin = %game.bin, "Game initialized");
        Ok(game)
    }

    pub async fn start_game(
        &self,
        state: &EngineState,
        game_bin: &str,
    ) -> Result<MutationResult<GameStatus>, AppError> {
        self.change_status(state, game_bin, GameStatus::Started).await
    }

    pub async fn end_game(
        &self,
        state: &EngineState,
        game_bin: &str,
    ) -> Result<MutationResult<GameStatus>, AppError> {
        self.change_status(state, game_bin, GameStatus::Ended).await
    }

    /// Fetch the game, set its status and persist only `status`.
    async fn change_status(
        &self,
        state: &EngineState,
        game_bin: &str,
        status: GameStatus,
    ) -> Result<MutationResult<GameStatus>, AppError> {
        debug!(game_bin, ?status, "Changing game status");
        let _guard = state.write_guard().await;

        let mut game = games::require_game(state.store(), game_bin).await?;
        let transition = apply_status(&mut game, status);
        games::set_status(state.store(), game_bin, game.status).await?;

        if transition.is_some() {
            info!(game_bin, ?status, "Game status changed");
        }
        Ok(MutationResult::new(game.status, transition.into_iter().collect()))
    }

    /// Point the game at the configured initial step.
    pub async fn set_new_step(
        &self,
        state: &EngineState,
        game_bin: &str,
    ) -> Result<MutationResult<String>, AppError> {
        let initial = state.config.initial_step.clone();
        self.set_first_step(state, game_bin, &initial).await
    }

    /// Point the game at `step_bin`.
    pub async fn set_first_step(
        &self,
        state: &EngineState,
        game_bin: &str,
        step_bin: &str,
    ) -> Result<MutationResult<String>, AppError> {
        debug!(game_bin, step_bin, "Setting current step");
        let _guard = state.write_guard().await;

        let game = games::require_game(state.store(), game_bin).await?;
        games::set_current_step(state.store(), game_bin, step_bin).await?;

        let mut transitions = Vec::new();
        if game.current_step.as_deref() != Some(step_bin) {
            transitions.push(GameTransition::StepAdvanced {
                from: game.current_step,
                to: step_bin.to_string(),
            });
        }
        Ok(MutationResult::new(step_bin.to_string(), transitions))
    }

    /// Advance `current_step` along the current step's `next_step` pointer.
    ///
    /// The step is looked up among the game's own steps first and then in the
    /// shared step catalog. If there is no current step, no pointer, or the
    /// pointer names an unknown step, the game is left as is and the reason
    /// is reported in `StepAdvance::Unchanged`.
    pub async fn set_next_step(
        &self,
        state: &EngineState,
        game_bin: &str,
    ) -> Result<MutationResult<StepAdvance>, AppError> {
        debug!(game_bin, "Advancing to next step");
        let _guard = state.write_guard().await;

        let game = games::require_game(state.store(), game_bin).await?;
        let Some(from) = game.current_step.clone() else {
            return Ok(unchanged(game_bin, format!("game {game_bin} has no current step")));
        };

        let step = match current_step(&game) {
            Some(step) => Some(step.clone()),
            None => steps::find_step(state.store(), &from).await?,
        };
        let Some(step) = step else {
            return Ok(unchanged(game_bin, format!("current step {from} does not exist")));
        };
        let Some(next) = next_step_of(&step).map(str::to_string) else {
            return Ok(unchanged(game_bin, format!("step {from} has no next step")));
        };
        if !game.steps.contains_key(&next) && steps::find_step(state.store(), &next).await?.is_none() {
            return Ok(unchanged(game_bin, format!("next step {next} does not exist")));
        }

        games::set_current_step(state.store(), game_bin, &next).await?;
        info!(game_bin, from = %from, to = %next, "Step advanced");
        Ok(MutationResult::new(
            StepAdvance::Advanced {
                from: Some(from.clone()),
                to: next.clone(),
            },
            vec![GameTransition::StepAdvanced {
                from: Some(from),
                to: next,
            }],
        ))
    }

    /// Clear `first_day_completed` and `explanation_seen`.
    pub async fn reset_first_day_flags(&self, state: &EngineState, game_bin: &str) -> Result<(), AppError> {
        debug!(game_bin, "Resetting first day flags");
        let _guard = state.write_guard().await;
        games::require_game(state.store(), game_bin).await?;

        let at = path::game(game_bin);
        let fields = FieldMap::new()
            .with(&at, "first_day_completed", &false)?
            .with(&at, "explanation_seen", &false)?;
        games::patch_game(state.store(), game_bin, fields.into_inner()).await?;
        Ok(())
    }

    /// Seat a gamer at `games/{g}/gamers/{gamer.bin}`. An existing gamer with
    /// the same bin is kept unchanged.
    pub async fn add_gamer(
        &self,
        state: &EngineState,
        game_bin: &str,
        gamer: Gamer,
    ) -> Result<MutationResult<Gamer>, AppError> {
        debug!(game_bin, gamer_bin = %gamer.bin, "Adding gamer");
        let _guard = state.write_guard().await;

        let mut game = games::require_game(state.store(), game_bin).await?;
        let character = if gamer.character_id.is_empty() {
            state.config.default_character.clone()
        } else {
            gamer.character_id.clone()
        };
        if !seat_gamer(&mut game, &gamer.bin, &character) {
            debug!(game_bin, gamer_bin = %gamer.bin, "Gamer already seated");
            let existing = game.gamers.get(&gamer.bin).cloned().unwrap_or(gamer);
            return Ok(MutationResult::quiet(existing));
        }

        let seated = game
            .gamers
            .get(&gamer.bin)
            .cloned()
            .ok_or_else(|| AppError::internal("seated gamer missing from roster"))?;
        let seated = Gamer {
            is_alive: gamer.is_alive,
            fates: gamer.fates,
            ..seated
        };
        games::save_gamer(state.store(), game_bin, &seated).await?;
        info!(game_bin, gamer_bin = %seated.bin, "Gamer joined");
        Ok(MutationResult::new(
            seated.clone(),
            vec![GameTransition::GamerJoined {
                player_bin: seated.bin,
            }],
        ))
    }

    /// Remove a gamer from the roster; returns whether one was removed.
    pub async fn remove_gamer(
        &self,
        state: &EngineState,
        game_bin: &str,
        player_bin: &str,
    ) -> Result<MutationResult<bool>, AppError> {
        debug!(game_bin, player_bin, "Removing gamer");
        let _guard = state.write_guard().await;

        let game = games::require_game(state.store(), game_bin).await?;
        if !game.gamers.contains_key(player_bin) {
            return Ok(MutationResult::quiet(false));
        }
        games::delete_gamer(state.store(), game_bin, player_bin).await?;
        info!(game_bin, player_bin, "Gamer left");
        Ok(MutationResult::new(
            true,
            vec![GameTransition::GamerLeft {
                player_bin: player_bin.to_string(),
            }],
        ))
    }

    /// Copy every character played in the game into `games/{g}/characters`.
    pub async fn add_gamer_characters_to_game(
        &self,
        state: &EngineState,
        game_bin: &str,
    ) -> Result<Vec<Character>, AppError> {
        debug!(game_bin, "Adding gamer characters to game");
        let game = games::require_game(state.store(), game_bin).await?;

        let character_bins: BTreeSet<&str> = game
            .gamers
            .values()
            .map(|g| g.character_id.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        let mut added = Vec::with_capacity(character_bins.len());
        for bin in character_bins {
            let character = catalog::require_character(state.store(), bin).await?;
            catalog::save_game_character(state.store(), game_bin, &character).await?;
            added.push(character);
        }
        Ok(added)
    }

    /// Replace the game's ability list.
    pub async fn add_abilities_to_game(
        &self,
        state: &EngineState,
        game_bin: &str,
        abilities: Vec<Ability>,
    ) -> Result<Vec<Ability>, AppError> {
        debug!(game_bin, count = abilities.len(), "Adding abilities to game");
        games::require_game(state.store(), game_bin).await?;
        catalog::save_game_abilities(state.store(), game_bin, &abilities).await?;
        Ok(abilities)
    }

    /// Record the effect of `ability_bin` on `target_gamer` as a new fate.
    pub async fn apply_ability(
        &self,
        state: &EngineState,
        ability_bin: &str,
        game_bin: &str,
        target_gamer: &str,
    ) -> Result<Fate, AppError> {
        debug!(ability_bin, game_bin, target_gamer, "Applying ability");
        catalog::require_ability(state.store(), ability_bin).await?;
        games::require_gamer(state.store(), game_bin, target_gamer).await?;

        let fate = Fate {
            bin: Uuid::new_v4().to_string(),
            ability_bin: ability_bin.to_string(),
            applied_at: Some(EpochMillis::now()),
        };
        let key = games::push_fate(state.store(), game_bin, target_gamer, &fate).await?;
        info!(game_bin, target_gamer, ability_bin, fate_key = %key, "Ability applied");
        Ok(fate)
    }
}

fn unchanged(game_bin: &str, reason: String) -> MutationResult<StepAdvance> {
    warn!(game_bin, %reason, "Step not advanced");
    MutationResult::quiet(StepAdvance::Unchanged { reason })
}
