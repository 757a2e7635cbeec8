//! Character and ability catalog repository functions.

use crate::adapters::tree::codec;
use crate::adapters::tree::{path, TreeStore};
use crate::domain::ensure_key;
use crate::entities::{Ability, Character};
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn find_character(store: &dyn TreeStore, bin: &str) -> Result<Option<Character>, DomainError> {
    Ok(codec::get_typed(store, &path::character(bin)).await?)
}

pub async fn require_character(store: &dyn TreeStore, bin: &str) -> Result<Character, DomainError> {
    find_character(store, bin).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Character, format!("character {bin} not found"))
    })
}

pub async fn list_characters(store: &dyn TreeStore) -> Result<Vec<Character>, DomainError> {
    Ok(codec::get_children(store, &path::characters()).await?)
}

pub async fn save_character(store: &dyn TreeStore, character: &Character) -> Result<(), DomainError> {
    ensure_key("character", &character.bin)?;
    codec::set_typed(store, &path::character(&character.bin), character).await?;
    Ok(())
}

pub async fn delete_character(store: &dyn TreeStore, bin: &str) -> Result<(), DomainError> {
    ensure_key("character", bin)?;
    store.delete(&path::character(bin)).await?;
    Ok(())
}

pub async fn find_ability(store: &dyn TreeStore, bin: &str) -> Result<Option<Ability>, DomainError> {
    Ok(codec::get_typed(store, &path::ability(bin)).await?)
}

pub async fn require_ability(store: &dyn TreeStore, bin: &str) -> Result<Ability, DomainError> {
    find_ability(store, bin).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Ability, format!("ability {bin} not found"))
    })
}

pub async fn list_abilities(store: &dyn TreeStore) -> Result<Vec<Ability>, DomainError> {
    Ok(codec::get_children(store, &path::abilities()).await?)
}

pub async fn save_ability(store: &dyn TreeStore, ability: &Ability) -> Result<(), DomainError> {
    ensure_key("ability", &ability.bin)?;
    codec::set_typed(store, &path::ability(&ability.bin), ability).await?;
    Ok(())
}

pub async fn delete_ability(store: &dyn TreeStore, bin: &str) -> Result<(), DomainError> {
    ensure_key("ability", bin)?;
    store.delete(&path::ability(bin)).await?;
    Ok(())
}

/// Copy a character into `games/{g}/characters/{bin}`.
pub async fn save_game_character(
    store: &dyn TreeStore,
    game_bin: &str,
    character: &Character,
) -> Result<(), DomainError> {
    ensure_key("game", game_bin)?;
    ensure_key("character", &character.bin)?;
    codec::set_typed(store, &path::game_character(game_bin, &character.bin), character).await?;
    Ok(())
}

/// Replace the game's ability list.
pub async fn save_game_abilities(
    store: &dyn TreeStore,
    game_bin: &str,
    abilities: &[Ability],
) -> Result<(), DomainError> {
    ensure_key("game", game_bin)?;
    codec::set_typed(store, &path::game_abilities(game_bin), abilities).await?;
    Ok(())
}
