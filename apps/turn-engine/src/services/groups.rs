use tracing::{debug, info};
use uuid::Uuid;

use super::MutationResult;
use crate::domain::membership::{add_group_id, insert_member, remove_member};
use crate::domain::GameTransition;
use crate::entities::{Group, Invitation, PlayerSummary};
use crate::error::AppError;
use crate::repos::{groups, players};
use crate::state::engine_state::EngineState;

/// Group creation and membership.
#[derive(Default)]
pub struct GroupService;

impl GroupService {
    pub fn new() -> Self {
        Self
    }

    /// Create a group owned by `owner_bin` with the given initial members.
    ///
    /// Every player must exist and the members plus the owner must fit in
    /// `capacity` (zero means unlimited); otherwise nothing is written.
    pub async fn create_group(
        &self,
        state: &EngineState,
        group_name: &str,
        capacity: u32,
        owner_bin: &str,
        member_bins: &[String],
    ) -> Result<MutationResult<Group>, AppError> {
        debug!(group_name, capacity, owner_bin, members = member_bins.len(), "Creating group");
        let _guard = state.write_guard().await;

        let owner = players::require_player(state.store(), owner_bin).await?;
        let mut group = Group {
            bin: Uuid::new_v4().to_string(),
            group_name: group_name.to_string(),
            creator: Some(owner.summary()),
            members: Default::default(),
            capacity,
            status: "waiting".to_string(),
            invitations: Default::default(),
        };

        let mut members = Vec::with_capacity(member_bins.len());
        for bin in member_bins {
            let player = players::require_player(state.store(), bin).await?;
            if insert_member(&mut group, player.summary())? && player.bin != owner.bin {
                members.push(player);
            }
        }

        groups::save_group(state.store(), &group).await?;
        let mut transitions = Vec::with_capacity(members.len());
        for mut player in std::iter::once(owner).chain(members) {
            if add_group_id(&mut player.group_ids, &group.bin) {
                players::save_group_ids(state.store(), &player).await?;
            }
            if group.members.contains_key(&player.bin) {
                transitions.push(GameTransition::MemberJoined {
                    group_bin: group.bin.clone(),
                    player_bin: player.bin.clone(),
                });
            }
        }
        info!(group_bin = %group.bin, group_name, "Group created");
        Ok(MutationResult::new(group, transitions))
    }

    /// Add a player to a group's members; returns whether they were added.
    pub async fn add_player_to_group(
        &self,
        state: &EngineState,
        player_bin: &str,
        group_bin: &str,
    ) -> Result<MutationResult<bool>, AppError> {
        debug!(player_bin, group_bin, "Adding player to group");
        let _guard = state.write_guard().await;

        let mut player = players::require_player(state.store(), player_bin).await?;
        let mut group = groups::require_group(state.store(), group_bin).await?;

        let summary = player.summary();
        let inserted = insert_member(&mut group, summary.clone())?;
        if inserted {
            groups::save_member(state.store(), group_bin, &summary).await?;
        }
        if add_group_id(&mut player.group_ids, group_bin) {
            players::save_group_ids(state.store(), &player).await?;
        }
        if !inserted {
            return Ok(MutationResult::quiet(false));
        }
        info!(player_bin, group_bin, "Member joined");
        Ok(MutationResult::new(
            true,
            vec![GameTransition::MemberJoined {
                group_bin: group_bin.to_string(),
                player_bin: player_bin.to_string(),
            }],
        ))
    }

    /// Remove a player from a group's members; returns whether they were removed.
    pub async fn remove_player_from_group(
        &self,
        state: &EngineState,
        player_bin: &str,
        group_bin: &str,
    ) -> Result<MutationResult<bool>, AppError> {
        debug!(player_bin, group_bin, "Removing player from group");
        let _guard = state.write_guard().await;

        let mut group = groups::require_group(state.store(), group_bin).await?;
        let removed = remove_member(&mut group, player_bin);
        if removed {
            groups::delete_member(state.store(), group_bin, player_bin).await?;
        }

        if let Some(mut player) = players::find_player(state.store(), player_bin).await? {
            let before = player.group_ids.len();
            player.group_ids.retain(|id| id != group_bin);
            if player.group_ids.len() != before {
                players::save_group_ids(state.store(), &player).await?;
            }
        }

        if !removed {
            return Ok(MutationResult::quiet(false));
        }
        info!(player_bin, group_bin, "Member left");
        Ok(MutationResult::new(
            true,
            vec![GameTransition::MemberLeft {
                group_bin: group_bin.to_string(),
                player_bin: player_bin.to_string(),
            }],
        ))
    }

    pub async fn list_groups(&self, state: &EngineState) -> Result<Vec<Group>, AppError> {
        Ok(groups::list_groups(state.store()).await?)
    }

    pub async fn members(&self, state: &EngineState, group_bin: &str) -> Result<Vec<PlayerSummary>, AppError> {
        Ok(groups::list_members(state.store(), group_bin).await?)
    }

    pub async fn invitations(&self, state: &EngineState, group_bin: &str) -> Result<Vec<Invitation>, AppError> {
        Ok(groups::list_invitations(state.store(), group_bin).await?)
    }
}
