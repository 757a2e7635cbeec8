//! Group repository functions.

use crate::adapters::tree::codec;
use crate::adapters::tree::{path, TreeStore};
use crate::domain::ensure_key;
use crate::entities::{Group, Invitation, PlayerSummary};
use crate::errors::domain::{DomainError, NotFoundKind};

pub async fn find_group(store: &dyn TreeStore, bin: &str) -> Result<Option<Group>, DomainError> {
    Ok(codec::get_typed(store, &path::group(bin)).await?)
}

pub async fn require_group(store: &dyn TreeStore, bin: &str) -> Result<Group, DomainError> {
    find_group(store, bin)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Group, format!("group {bin} not found")))
}

pub async fn list_groups(store: &dyn TreeStore) -> Result<Vec<Group>, DomainError> {
    Ok(codec::get_children(store, &path::groups()).await?)
}

pub async fn save_group(store: &dyn TreeStore, group: &Group) -> Result<(), DomainError> {
    ensure_key("group", &group.bin)?;
    codec::set_typed(store, &path::group(&group.bin), group).await?;
    Ok(())
}

pub async fn delete_group(store: &dyn TreeStore, bin: &str) -> Result<(), DomainError> {
    ensure_key("group", bin)?;
    store.delete(&path::group(bin)).await?;
    Ok(())
}

pub async fn list_members(store: &dyn TreeStore, group_bin: &str) -> Result<Vec<PlayerSummary>, DomainError> {
    Ok(codec::get_children(store, &path::group_members(group_bin)).await?)
}

pub async fn list_invitations(store: &dyn TreeStore, group_bin: &str) -> Result<Vec<Invitation>, DomainError> {
    Ok(codec::get_children(store, &path::group_invitations(group_bin)).await?)
}

/// Write one member at `game_groups/{g}/members/{player}`; idempotent.
pub async fn save_member(
    store: &dyn TreeStore,
    group_bin: &str,
    member: &PlayerSummary,
) -> Result<(), DomainError> {
    ensure_key("group", group_bin)?;
    ensure_key("player", &member.bin)?;
    codec::set_typed(store, &path::group_member(group_bin, &member.bin), member).await?;
    Ok(())
}

pub async fn delete_member(store: &dyn TreeStore, group_bin: &str, player_bin: &str) -> Result<(), DomainError> {
    ensure_key("group", group_bin)?;
    ensure_key("player", player_bin)?;
    store.delete(&path::group_member(group_bin, player_bin)).await?;
    Ok(())
}

pub async fn save_invitation(
    store: &dyn TreeStore,
    group_bin: &str,
    invitation: &Invitation,
) -> Result<(), DomainError> {
    ensure_key("group", group_bin)?;
    ensure_key("invitation", &invitation.bin)?;
    let at = path::group_invitations(group_bin).child(&invitation.bin);
    codec::set_typed(store, &at, invitation).await?;
    Ok(())
}
