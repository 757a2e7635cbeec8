//! Step repository functions: the top-level step catalog and a game's steps.

use crate::adapters::tree::codec;
use crate::adapters::tree::{path, TreeStore};
use crate::domain::ensure_key;
use crate::entities::Step;
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn find_step(store: &dyn TreeStore, bin: &str) -> Result<Option<Step>, DomainError> {
    Ok(codec::get_typed(store, &path::step(bin)).await?)
}

pub async fn require_step(store: &dyn TreeStore, bin: &str) -> Result<Step, DomainError> {
    find_step(store, bin)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Step, format!("step {bin} not found")))
}

pub async fn list_steps(store: &dyn TreeStore) -> Result<Vec<Step>, DomainError> {
    let mut steps: Vec<Step> = codec::get_children(store, &path::steps()).await?;
    sort_by_index(&mut steps);
    Ok(steps)
}

/// Write a step at `steps/{bin}`.
pub async fn save_step(store: &dyn TreeStore, step: &Step) -> Result<(), DomainError> {
    ensure_key("step", &step.bin)?;
    codec::set_typed(store, &path::step(&step.bin), step).await?;
    Ok(())
}

pub async fn delete_step(store: &dyn TreeStore, bin: &str) -> Result<(), DomainError> {
    ensure_key("step", bin)?;
    store.delete(&path::step(bin)).await?;
    Ok(())
}

/// A game's steps ordered by `step_index`, ties broken by bin.
pub async fn steps_for_game(store: &dyn TreeStore, game_bin: &str) -> Result<Vec<Step>, DomainError> {
    let mut steps: Vec<Step> = codec::get_children(store, &path::game_steps(game_bin)).await?;
    sort_by_index(&mut steps);
    Ok(steps)
}

/// Write a step at `games/{g}/steps/{bin}`.
pub async fn save_game_step(store: &dyn TreeStore, game_bin: &str, step: &Step) -> Result<(), DomainError> {
    ensure_key("game", game_bin)?;
    ensure_key("step", &step.bin)?;
    codec::set_typed(store, &path::game_step(game_bin, &step.bin), step).await?;
    Ok(())
}

fn sort_by_index(steps: &mut [Step]) {
    steps.sort_by(|a, b| a.step_index.cmp(&b.step_index).then_with(|| a.bin.cmp(&b.bin)));
}
