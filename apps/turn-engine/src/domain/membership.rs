//! Membership list rules: every collection here is deduplicated by bin.

use crate::entities::{Game, Gamer, Group, PlayerSummary};
use crate::errors::domain::{ConflictKind, DomainError};

/// Add `group_bin` to a player's group list; returns false if already present.
pub fn add_group_id(group_ids: &mut Vec<String>, group_bin: &str) -> bool {
    if group_ids.iter().any(|id| id == group_bin) {
        return false;
    }
    group_ids.push(group_bin.to_string());
    true
}

/// Members plus the creator when the creator is not also listed as a member.
pub fn head_count(group: &Group) -> usize {
    let creator_extra = group
        .creator
        .as_ref()
        .is_some_and(|c| !group.members.contains_key(&c.bin));
    group.members.len() + usize::from(creator_extra)
}

pub fn is_member(group: &Group, player_bin: &str) -> bool {
    group.members.contains_key(player_bin)
        || group.creator.as_ref().is_some_and(|c| c.bin == player_bin)
}

/// Fail with `GroupFull` if `player_bin` would be a new head beyond capacity.
pub fn ensure_capacity(group: &Group, player_bin: &str) -> Result<(), DomainError> {
    if group.capacity == 0 || is_member(group, player_bin) {
        return Ok(());
    }
    if head_count(group) >= group.capacity as usize {
        return Err(DomainError::conflict(
            ConflictKind::GroupFull,
            format!(
                "group {} is at capacity {}",
                group.bin, group.capacity
            ),
        ));
    }
    Ok(())
}

/// Insert a member keyed by bin; returns false when already present.
pub fn insert_member(group: &mut Group, member: PlayerSummary) -> Result<bool, DomainError> {
    if group.members.contains_key(&member.bin) {
        return Ok(false);
    }
    ensure_capacity(group, &member.bin)?;
    group.members.insert(member.bin.clone(), member);
    Ok(true)
}

pub fn remove_member(group: &mut Group, player_bin: &str) -> bool {
    group.members.remove(player_bin).is_some()
}

/// Record a player as invited to a game; returns false if already listed.
pub fn add_invited(game: &mut Game, player_bin: &str) -> bool {
    if game.invited.iter().any(|b| b == player_bin) {
        return false;
    }
    game.invited.push(player_bin.to_string());
    true
}

/// Remove a player's bin from the game's invited list by value.
pub fn remove_invited(game: &mut Game, player_bin: &str) -> bool {
    let before = game.invited.len();
    game.invited.retain(|b| b != player_bin);
    game.invited.len() != before
}

/// Seat a player in the game's roster; an existing gamer is left as is.
pub fn seat_gamer(game: &mut Game, player_bin: &str, character_bin: &str) -> bool {
    if game.gamers.contains_key(player_bin) {
        return false;
    }
    let gamer = Gamer::new(player_bin, game.bin.clone(), character_bin);
    game.gamers.insert(player_bin.to_string(), gamer);
    true
}
