//! Invitation delivery and the accept/decline transitions for games and groups.

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::MutationResult;
use crate::domain::invitations::{
    accept, decline, ensure_kind, ensure_open, find_invitation_mut, mark_received,
};
use crate::domain::membership::{
    add_group_id, add_invited, ensure_capacity, insert_member, remove_invited, remove_member,
    seat_gamer,
};
use crate::domain::GameTransition;
use crate::entities::{Invitation, InvitationKind, InvitationStatus, Player};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::{games, groups, players};
use crate::state::engine_state::EngineState;

#[derive(Default)]
pub struct InvitationService;

impl InvitationService {
    pub fn new() -> Self {
        Self
    }

    /// Deliver a group invitation to `players/{p}/invitations/{bin}` and
    /// record it on the group.
    pub async fn invite_player_to_group(
        &self,
        state: &EngineState,
        player_bin: &str,
        invitation: Invitation,
    ) -> Result<Invitation, AppError> {
        debug!(player_bin, group_bin = %invitation.game_group, "Inviting player to group");
        let _guard = state.write_guard().await;

        let player = players::require_player(state.store(), player_bin).await?;
        groups::require_group(state.store(), &invitation.game_group).await?;
        let invitation = prepare(&player, invitation, InvitationKind::Group)?;

        players::save_invitation(state.store(), player_bin, &invitation).await?;
        groups::save_invitation(state.store(), &invitation.game_group, &invitation).await?;
        info!(player_bin, invitation_bin = %invitation.bin, "Group invitation sent");
        Ok(invitation)
    }

    /// Deliver a game invitation and list the player in the game's `invited`.
    pub async fn invite_player_to_game(
        &self,
        state: &EngineState,
        player_bin: &str,
        invitation: Invitation,
    ) -> Result<Invitation, AppError> {
        debug!(player_bin, game_bin = %invitation.game_id, "Inviting player to game");
        let _guard = state.write_guard().await;

        let player = players::require_player(state.store(), player_bin).await?;
        let mut game = games::require_game(state.store(), &invitation.game_id).await?;
        let invitation = prepare(&player, invitation, InvitationKind::Game)?;

        players::save_invitation(state.store(), player_bin, &invitation).await?;
        if add_invited(&mut game, player_bin) {
            games::save_invited(state.store(), &game).await?;
        }
        info!(player_bin, invitation_bin = %invitation.bin, "Game invitation sent");
        Ok(invitation)
    }

    /// Accept a group invitation: mark it accepted, add the group to the
    /// player's `group_ids` and the player to the group's members.
    ///
    /// Fails with `InvitationAlreadyAccepted`/`InvitationAlreadyDeclined` on a
    /// terminal invitation, and with `GroupFull` when the player would exceed
    /// the group's capacity; in both cases nothing is written.
    pub async fn accept_group_invitation(
        &self,
        state: &EngineState,
        player_bin: &str,
        invitation_bin: &str,
        group_bin: &str,
    ) -> Result<MutationResult<Invitation>, AppError> {
        debug!(player_bin, invitation_bin, group_bin, "Accepting group invitation");
        let _guard = state.write_guard().await;

        let mut player = players::require_player(state.store(), player_bin).await?;
        let mut group = groups::require_group(state.store(), group_bin).await?;
        let summary = player.summary();

        let invitation = find_invitation_mut(&mut player, invitation_bin)?;
        ensure_kind(invitation, InvitationKind::Group)?;
        ensure_open(invitation).inspect_err(|e| log_rejected(invitation_bin, e))?;
        ensure_capacity(&group, player_bin)?;
        accept(invitation)?;
        let invitation = invitation.clone();
        players::update_invitation_outcome(state.store(), player_bin, &invitation).await?;

        if add_group_id(&mut player.group_ids, group_bin) {
            players::save_group_ids(state.store(), &player).await?;
        }

        let mut transitions = vec![GameTransition::InvitationAccepted {
            invitation_bin: invitation_bin.to_string(),
        }];
        if insert_member(&mut group, summary.clone())? {
            groups::save_member(state.store(), group_bin, &summary).await?;
            transitions.push(GameTransition::MemberJoined {
                group_bin: group_bin.to_string(),
                player_bin: player_bin.to_string(),
            });
        }
        info!(player_bin, invitation_bin, group_bin, "Group invitation accepted");
        Ok(MutationResult::new(invitation, transitions))
    }

    /// Decline a group invitation, persist the player's invitation map and
    /// drop the player from the group's members if present.
    pub async fn decline_group_invitation(
        &self,
        state: &EngineState,
        player_bin: &str,
        invitation_bin: &str,
        group_bin: &str,
    ) -> Result<MutationResult<Invitation>, AppError> {
        debug!(player_bin, invitation_bin, group_bin, "Declining group invitation");
        let _guard = state.write_guard().await;

        let mut player = players::require_player(state.store(), player_bin).await?;
        let mut group = groups::require_group(state.store(), group_bin).await?;

        let invitation = find_invitation_mut(&mut player, invitation_bin)?;
        ensure_kind(invitation, InvitationKind::Group)?;
        decline(invitation).inspect_err(|e| log_rejected(invitation_bin, e))?;
        let invitation = invitation.clone();
        players::save_invitations(state.store(), &player).await?;

        let mut transitions = vec![GameTransition::InvitationDeclined {
            invitation_bin: invitation_bin.to_string(),
        }];
        if remove_member(&mut group, player_bin) {
            groups::delete_member(state.store(), group_bin, player_bin).await?;
            transitions.push(GameTransition::MemberLeft {
                group_bin: group_bin.to_string(),
                player_bin: player_bin.to_string(),
            });
        }
        info!(player_bin, invitation_bin, group_bin, "Group invitation declined");
        Ok(MutationResult::new(invitation, transitions))
    }

    /// Accept a game invitation and seat the player as a gamer keyed by the
    /// player's bin with the default character.
    pub async fn accept_game_invitation(
        &self,
        state: &EngineState,
        player_bin: &str,
        invitation_bin: &str,
    ) -> Result<MutationResult<Invitation>, AppError> {
        debug!(player_bin, invitation_bin, "Accepting game invitation");
        let _guard = state.write_guard().await;

        let mut player = players::require_player(state.store(), player_bin).await?;
        let invitation = find_invitation_mut(&mut player, invitation_bin)?;
        ensure_kind(invitation, InvitationKind::Game)?;
        ensure_open(invitation).inspect_err(|e| log_rejected(invitation_bin, e))?;
        let mut game = games::require_game(state.store(), &invitation.game_id).await?;

        accept(invitation)?;
        let invitation = invitation.clone();
        players::update_invitation_outcome(state.store(), player_bin, &invitation).await?;

        let mut transitions = vec![GameTransition::InvitationAccepted {
            invitation_bin: invitation_bin.to_string(),
        }];
        if seat_gamer(&mut game, player_bin, &state.config.default_character) {
            let gamer = game
                .gamers
                .get(player_bin)
                .ok_or_else(|| AppError::internal("seated gamer missing from roster"))?;
            games::save_gamer(state.store(), &game.bin, gamer).await?;
            transitions.push(GameTransition::GamerJoined {
                player_bin: player_bin.to_string(),
            });
        }
        info!(player_bin, invitation_bin, game_bin = %game.bin, "Game invitation accepted");
        Ok(MutationResult::new(invitation, transitions))
    }

    /// Decline a game invitation and remove the player from the game's
    /// `invited` list.
    pub async fn decline_game_invitation(
        &self,
        state: &EngineState,
        player_bin: &str,
        invitation_bin: &str,
    ) -> Result<MutationResult<Invitation>, AppError> {
        debug!(player_bin, invitation_bin, "Declining game invitation");
        let _guard = state.write_guard().await;

        let mut player = players::require_player(state.store(), player_bin).await?;
        let invitation = find_invitation_mut(&mut player, invitation_bin)?;
        ensure_kind(invitation, InvitationKind::Game)?;
        ensure_open(invitation).inspect_err(|e| log_rejected(invitation_bin, e))?;
        let mut game = games::require_game(state.store(), &invitation.game_id).await?;

        decline(invitation)?;
        let invitation = invitation.clone();
        players::save_invitations(state.store(), &player).await?;

        if remove_invited(&mut game, player_bin) {
            games::save_invited(state.store(), &game).await?;
        }
        info!(player_bin, invitation_bin, game_bin = %game.bin, "Game invitation declined");
        Ok(MutationResult::new(
            invitation,
            vec![GameTransition::InvitationDeclined {
                invitation_bin: invitation_bin.to_string(),
            }],
        ))
    }
}

/// Normalize an outgoing invitation. Re-sending an open invitation replaces
/// it; a terminal one is never overwritten.
fn prepare(player: &Player, mut invitation: Invitation, kind: InvitationKind) -> Result<Invitation, DomainError> {
    if invitation.bin.is_empty() {
        invitation.bin = Uuid::new_v4().to_string();
    }
    if let Some(existing) = player.invitations.get(&invitation.bin) {
        ensure_open(existing)?;
    }
    invitation.kind = kind;
    invitation.accepted = false;
    invitation.declined = false;
    invitation.status = InvitationStatus::Created;
    mark_received(&mut invitation);
    Ok(invitation)
}

fn log_rejected(invitation_bin: &str, err: &DomainError) {
    warn!(invitation_bin, error = %err, "Invitation transition rejected");
}
