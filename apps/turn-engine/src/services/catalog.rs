use tracing::{debug, info};

use crate::entities::{Ability, Character};
use crate::error::AppError;
use crate::repos::catalog;
use crate::state::engine_state::EngineState;

/// Seeding and lookup of the shared character and ability catalog.
#[derive(Default)]
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        Self
    }

    /// Write each character at `characters/{bin}`, stopping at the first failure.
    pub async fn add_characters(&self, state: &EngineState, characters: &[Character]) -> Result<(), AppError> {
        debug!(count = characters.len(), "Adding characters");
        for character in characters {
            catalog::save_character(state.store(), character).await?;
        }
        info!(count = characters.len(), "Characters added");
        Ok(())
    }

    /// Write each ability at `abilities/{bin}`, stopping at the first failure.
    pub async fn add_abilities(&self, state: &EngineState, abilities: &[Ability]) -> Result<(), AppError> {
        debug!(count = abilities.len(), "Adding abilities");
        for ability in abilities {
            catalog::save_ability(state.store(), ability).await?;
        }
        info!(count = abilities.len(), "Abilities added");
        Ok(())
    }

    /// Resolve a character's ability references against the catalog.
    ///
    /// A reference to a missing ability fails with `AbilityNotFound`.
    pub async fn abilities_for_character(
        &self,
        state: &EngineState,
        character_bin: &str,
    ) -> Result<Vec<Ability>, AppError> {
        let character = catalog::require_character(state.store(), character_bin).await?;
        let mut abilities = Vec::with_capacity(character.abilities.len());
        for reference in &character.abilities {
            abilities.push(catalog::require_ability(state.store(), &reference.bin).await?);
        }
        Ok(abilities)
    }

    pub async fn list_characters(&self, state: &EngineState) -> Result<Vec<Character>, AppError> {
        Ok(catalog::list_characters(state.store()).await?)
    }

    pub async fn list_abilities(&self, state: &EngineState) -> Result<Vec<Ability>, AppError> {
        Ok(catalog::list_abilities(state.store()).await?)
    }
}
