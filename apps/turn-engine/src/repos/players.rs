//! Player repository functions.

use crate::adapters::tree::codec::{self, FieldMap};
use crate::adapters::tree::{path, TreeStore};
use crate::domain::ensure_key;
use crate::entities::{Invitation, Player};
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn find_player(store: &dyn TreeStore, bin: &str) -> Result<Option<Player>, DomainError> {
    Ok(codec::get_typed(store, &path::player(bin)).await?)
}

pub async fn require_player(store: &dyn TreeStore, bin: &str) -> Result<Player, DomainError> {
    find_player(store, bin)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, format!("player {bin} not found")))
}

pub async fn list_players(store: &dyn TreeStore) -> Result<Vec<Player>, DomainError> {
    Ok(codec::get_children(store, &path::players()).await?)
}

pub async fn save_player(store: &dyn TreeStore, player: &Player) -> Result<(), DomainError> {
    ensure_key("player", &player.bin)?;
    codec::set_typed(store, &path::player(&player.bin), player).await?;
    Ok(())
}

pub async fn delete_player(store: &dyn TreeStore, bin: &str) -> Result<(), DomainError> {
    ensure_key("player", bin)?;
    store.delete(&path::player(bin)).await?;
    Ok(())
}

/// Write one invitation under the player, replacing any with the same bin.
pub async fn save_invitation(
    store: &dyn TreeStore,
    player_bin: &str,
    invitation: &Invitation,
) -> Result<(), DomainError> {
    ensure_key("player", player_bin)?;
    ensure_key("invitation", &invitation.bin)?;
    let at = path::player_invitation(player_bin, &invitation.bin);
    codec::set_typed(store, &at, invitation).await?;
    Ok(())
}

/// Persist only the terminal flags and status of an invitation.
pub async fn update_invitation_outcome(
    store: &dyn TreeStore,
    player_bin: &str,
    invitation: &Invitation,
) -> Result<(), DomainError> {
    ensure_key("player", player_bin)?;
    ensure_key("invitation", &invitation.bin)?;
    let at = path::player_invitation(player_bin, &invitation.bin);
    let fields = FieldMap::new()
        .with(&at, "accepted", &invitation.accepted)?
        .with(&at, "declined", &invitation.declined)?
        .with(&at, "status", &invitation.status)?;
    store.update(&at, fields.into_inner()).await?;
    Ok(())
}

/// Replace the player's whole invitation map.
pub async fn save_invitations(store: &dyn TreeStore, player: &Player) -> Result<(), DomainError> {
    ensure_key("player", &player.bin)?;
    let at = path::player(&player.bin);
    let fields = FieldMap::new().with(&at, "invitations", &player.invitations)?;
    store.update(&at, fields.into_inner()).await?;
    Ok(())
}

pub async fn save_group_ids(store: &dyn TreeStore, player: &Player) -> Result<(), DomainError> {
    ensure_key("player", &player.bin)?;
    let at = path::player(&player.bin);
    let fields = FieldMap::new().with(&at, "group_ids", &player.group_ids)?;
    store.update(&at, fields.into_inner()).await?;
    Ok(())
}
