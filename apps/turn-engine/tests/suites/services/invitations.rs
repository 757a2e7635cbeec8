use turn_engine::entities::{InvitationStatus, Player};
use turn_engine::errors::ErrorCode;
use turn_engine::repos::{games, groups, players};
use turn_engine::services::{GroupService, InvitationService};
use turn_engine::{AppError, GameTransition};

use crate::support::fixtures::{
    game_invitation, group_invitation, seed_game, seed_group, seed_player, test_state,
};

async fn invited_to_group(
    state: &turn_engine::EngineState,
    player: &str,
    group: &str,
    invitation: &str,
) -> Result<Player, AppError> {
    let owner = seed_player(state, "owner").await?;
    seed_group(state, group, 0, &owner).await?;
    seed_player(state, player).await?;
    InvitationService::new()
        .invite_player_to_group(state, player, group_invitation(invitation, group))
        .await?;
    Ok(players::require_player(state.store(), player).await?)
}

#[tokio::test]
async fn invitation_is_delivered_as_received() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    let player = invited_to_group(&state, "p2", "grp", "inv-1").await?;

    let inv = &player.invitations["inv-1"];
    assert_eq!(inv.status, InvitationStatus::Received);
    assert!(!inv.accepted && !inv.declined);
    let on_group = groups::list_invitations(state.store(), "grp").await?;
    assert_eq!(on_group.len(), 1);
    Ok(())
}

#[tokio::test]
async fn accepting_group_invitation_joins_group() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    invited_to_group(&state, "p2", "grp", "inv-1").await?;

    let outcome = InvitationService::new()
        .accept_group_invitation(&state, "p2", "inv-1", "grp")
        .await?;
    assert_eq!(
        outcome.transitions,
        vec![
            GameTransition::InvitationAccepted {
                invitation_bin: "inv-1".into()
            },
            GameTransition::MemberJoined {
                group_bin: "grp".into(),
                player_bin: "p2".into()
            },
        ]
    );

    let player = players::require_player(state.store(), "p2").await?;
    let inv = &player.invitations["inv-1"];
    assert!(inv.accepted && !inv.declined);
    assert_eq!(inv.status, InvitationStatus::Accepted);
    assert_eq!(player.group_ids, vec!["grp"]);

    let members = groups::list_members(state.store(), "grp").await?;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].bin, "p2");
    Ok(())
}

#[tokio::test]
async fn accepting_twice_fails_and_changes_nothing() -> Result<(), AppError> {
    let (state, tree) = test_state();
    invited_to_group(&state, "p2", "grp", "inv-1").await?;
    let service = InvitationService::new();
    service
        .accept_group_invitation(&state, "p2", "inv-1", "grp")
        .await?;
    let before = tree.snapshot();

    let err = service
        .accept_group_invitation(&state, "p2", "inv-1", "grp")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvitationAlreadyAccepted);
    assert!(err.is_already_terminal());
    assert_eq!(tree.snapshot(), before);
    Ok(())
}

#[tokio::test]
async fn declined_invitation_cannot_be_accepted() -> Result<(), AppError> {
    let (state, tree) = test_state();
    invited_to_group(&state, "p2", "grp", "inv-1").await?;
    let service = InvitationService::new();
    service
        .decline_group_invitation(&state, "p2", "inv-1", "grp")
        .await?;
    let before = tree.snapshot();

    let err = service
        .accept_group_invitation(&state, "p2", "inv-1", "grp")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvitationAlreadyDeclined);
    assert_eq!(tree.snapshot(), before);

    let player = players::require_player(state.store(), "p2").await?;
    let inv = &player.invitations["inv-1"];
    assert!(inv.declined && !inv.accepted);
    Ok(())
}

#[tokio::test]
async fn declining_removes_existing_membership() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    invited_to_group(&state, "p2", "grp", "inv-1").await?;
    GroupService::new()
        .add_player_to_group(&state, "p2", "grp")
        .await?;

    let outcome = InvitationService::new()
        .decline_group_invitation(&state, "p2", "inv-1", "grp")
        .await?;
    assert!(outcome.transitions.contains(&GameTransition::MemberLeft {
        group_bin: "grp".into(),
        player_bin: "p2".into()
    }));
    assert!(groups::list_members(state.store(), "grp").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_invitation_is_not_found() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    invited_to_group(&state, "p2", "grp", "inv-1").await?;
    let err = InvitationService::new()
        .accept_group_invitation(&state, "p2", "inv-9", "grp")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvitationNotFound);
    Ok(())
}

#[tokio::test]
async fn game_invitation_accept_seats_player() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    seed_player(&state, "p2").await?;
    let service = InvitationService::new();
    service
        .invite_player_to_game(&state, "p2", game_invitation("inv-g", "g1"))
        .await?;
    assert_eq!(games::require_game(state.store(), "g1").await?.invited, vec!["p2"]);

    // Inviting again does not duplicate the invited entry.
    service
        .invite_player_to_game(&state, "p2", game_invitation("inv-g", "g1"))
        .await?;
    assert_eq!(games::require_game(state.store(), "g1").await?.invited, vec!["p2"]);

    let outcome = service
        .accept_game_invitation(&state, "p2", "inv-g")
        .await?;
    assert!(outcome.value.accepted);
    assert!(outcome.transitions.contains(&GameTransition::GamerJoined {
        player_bin: "p2".into()
    }));

    let gamer = games::require_gamer(state.store(), "g1", "p2").await?;
    assert_eq!(gamer.bin, "p2");
    assert_eq!(gamer.game_id, "g1");
    assert_eq!(gamer.character_id, "3");
    assert!(gamer.is_alive);
    Ok(())
}

#[tokio::test]
async fn game_invitation_decline_removes_invited_entry() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    seed_player(&state, "p2").await?;
    seed_player(&state, "p3").await?;
    let service = InvitationService::new();
    service
        .invite_player_to_game(&state, "p2", game_invitation("inv-a", "g1"))
        .await?;
    service
        .invite_player_to_game(&state, "p3", game_invitation("inv-b", "g1"))
        .await?;

    service
        .decline_game_invitation(&state, "p2", "inv-a")
        .await?;
    let game = games::require_game(state.store(), "g1").await?;
    assert_eq!(game.invited, vec!["p3"]);
    assert!(game.gamers.is_empty());

    let player = players::require_player(state.store(), "p2").await?;
    assert!(player.invitations["inv-a"].declined);

    let err = service
        .accept_game_invitation(&state, "p2", "inv-a")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvitationAlreadyDeclined);
    Ok(())
}

#[tokio::test]
async fn terminal_invitation_is_not_overwritten_by_reinvite() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    invited_to_group(&state, "p2", "grp", "inv-1").await?;
    let service = InvitationService::new();
    service
        .decline_group_invitation(&state, "p2", "inv-1", "grp")
        .await?;

    let err = service
        .invite_player_to_group(&state, "p2", group_invitation("inv-1", "grp"))
        .await
        .unwrap_err();
    assert!(err.is_already_terminal());
    Ok(())
}

#[tokio::test]
async fn group_invitation_cannot_be_used_for_a_game() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    invited_to_group(&state, "p2", "grp", "inv-1").await?;
    let err = InvitationService::new()
        .accept_game_invitation(&state, "p2", "inv-1")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvitationKindMismatch);
    Ok(())
}
