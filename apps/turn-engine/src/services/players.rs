use rand::seq::IndexedRandom;
use tracing::{debug, info};
use uuid::Uuid;

use crate::entities::Player;
use crate::error::AppError;
use crate::repos::players;
use crate::state::engine_state::EngineState;

#[derive(Default)]
pub struct PlayerService;

impl PlayerService {
    pub fn new() -> Self {
        Self
    }

    /// Create one available, public player per name, each with a photo
    /// picked at random from `photo_urls` (blank when none are given).
    pub async fn register_players(
        &self,
        state: &EngineState,
        user_names: &[String],
        photo_urls: &[String],
    ) -> Result<Vec<Player>, AppError> {
        debug!(count = user_names.len(), "Registering players");
        let mut created = Vec::with_capacity(user_names.len());
        for name in user_names {
            let mut player = Player::new(Uuid::new_v4().to_string(), name.clone());
            player.photo = photo_urls
                .choose(&mut rand::rng())
                .cloned()
                .unwrap_or_default();
            players::save_player(state.store(), &player).await?;
            created.push(player);
        }
        info!(count = created.len(), "Players registered");
        Ok(created)
    }

    pub async fn find_player(&self, state: &EngineState, bin: &str) -> Result<Option<Player>, AppError> {
        Ok(players::find_player(state.store(), bin).await?)
    }

    pub async fn list_players(&self, state: &EngineState) -> Result<Vec<Player>, AppError> {
        Ok(players::list_players(state.store()).await?)
    }
}
