//! Game repository functions: the game record and its gamer roster.

use serde_json::{Map, Value};

use crate::adapters::tree::codec::{self, FieldMap};
use crate::adapters::tree::{path, TreeStore};
use crate::domain::ensure_key;
use crate::entities::{EpochMillis, Fate, Game, GameStatus, Gamer};
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn find_game(store: &dyn TreeStore, bin: &str) -> Result<Option<Game>, DomainError> {
    Ok(codec::get_typed(store, &path::game(bin)).await?)
}

pub async fn require_game(store: &dyn TreeStore, bin: &str) -> Result<Game, DomainError> {
    find_game(store, bin)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("game {bin} not found")))
}

pub async fn list_games(store: &dyn TreeStore) -> Result<Vec<Game>, DomainError> {
    Ok(codec::get_children(store, &path::games()).await?)
}

pub async fn save_game(store: &dyn TreeStore, game: &Game) -> Result<(), DomainError> {
    ensure_key("game", &game.bin)?;
    codec::set_typed(store, &path::game(&game.bin), game).await?;
    Ok(())
}

pub async fn delete_game(store: &dyn TreeStore, bin: &str) -> Result<(), DomainError> {
    ensure_key("game", bin)?;
    store.delete(&path::game(bin)).await?;
    Ok(())
}

/// Merge `fields` into `games/{bin}`; keys may be nested relative paths.
pub async fn patch_game(
    store: &dyn TreeStore,
    bin: &str,
    fields: Map<String, Value>,
) -> Result<(), DomainError> {
    ensure_key("game", bin)?;
    store.update(&path::game(bin), fields).await?;
    Ok(())
}

pub async fn set_status(store: &dyn TreeStore, bin: &str, status: GameStatus) -> Result<(), DomainError> {
    let at = path::game(bin);
    let fields = FieldMap::new().with(&at, "status", &status)?;
    patch_game(store, bin, fields.into_inner()).await
}

pub async fn set_current_step(
    store: &dyn TreeStore,
    bin: &str,
    step_bin: &str,
) -> Result<(), DomainError> {
    let at = path::game(bin);
    let fields = FieldMap::new().with(&at, "current_step", step_bin)?;
    patch_game(store, bin, fields.into_inner()).await
}

pub async fn set_times(
    store: &dyn TreeStore,
    bin: &str,
    start: EpochMillis,
    end: EpochMillis,
) -> Result<(), DomainError> {
    let at = path::game(bin);
    let fields = FieldMap::new()
        .with(&at, "start_time", &start)?
        .with(&at, "end_time", &end)?;
    patch_game(store, bin, fields.into_inner()).await
}

pub async fn save_invited(store: &dyn TreeStore, game: &Game) -> Result<(), DomainError> {
    let at = path::game(&game.bin);
    let fields = FieldMap::new().with(&at, "invited", &game.invited)?;
    patch_game(store, &game.bin, fields.into_inner()).await
}

pub async fn find_gamer(
    store: &dyn TreeStore,
    game_bin: &str,
    gamer_bin: &str,
) -> Result<Option<Gamer>, DomainError> {
    Ok(codec::get_typed(store, &path::game_gamer(game_bin, gamer_bin)).await?)
}

pub async fn require_gamer(
    store: &dyn TreeStore,
    game_bin: &str,
    gamer_bin: &str,
) -> Result<Gamer, DomainError> {
    find_gamer(store, game_bin, gamer_bin).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Gamer,
            format!("gamer {gamer_bin} not found in game {game_bin}"),
        )
    })
}

pub async fn save_gamer(store: &dyn TreeStore, game_bin: &str, gamer: &Gamer) -> Result<(), DomainError> {
    ensure_key("game", game_bin)?;
    ensure_key("gamer", &gamer.bin)?;
    codec::set_typed(store, &path::game_gamer(game_bin, &gamer.bin), gamer).await?;
    Ok(())
}

pub async fn delete_gamer(store: &dyn TreeStore, game_bin: &str, gamer_bin: &str) -> Result<(), DomainError> {
    ensure_key("game", game_bin)?;
    ensure_key("gamer", gamer_bin)?;
    store.delete(&path::game_gamer(game_bin, gamer_bin)).await?;
    Ok(())
}

/// Append a fate to a gamer; returns the store-generated key.
pub async fn push_fate(
    store: &dyn TreeStore,
    game_bin: &str,
    gamer_bin: &str,
    fate: &Fate,
) -> Result<String, DomainError> {
    ensure_key("game", game_bin)?;
    ensure_key("gamer", gamer_bin)?;
    Ok(codec::push_typed(store, &path::gamer_fates(game_bin, gamer_bin), fate).await?)
}
