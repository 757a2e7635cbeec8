use turn_engine::adapters::tree::path;
use turn_engine::entities::Step;
use turn_engine::errors::ErrorCode;
use turn_engine::repos::{games, players};
use turn_engine::services::{InvitationService, StepService, VoteService};
use turn_engine::AppError;

use crate::support::fixtures::{
    group_invitation, seed_game, seed_group, seed_player, test_state, vote,
};

#[tokio::test]
async fn failed_vote_write_surfaces_and_leaves_game_untouched() -> Result<(), AppError> {
    let (state, tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    tree.fail_writes_under(&path::game_steps("g1"));
    let before = tree.snapshot();

    let err = VoteService::new()
        .record_vote(&state, "g1", "gamer-a", vote("g1", "s1", "gamer-a", "p2"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreWriteFailed);
    assert_eq!(tree.snapshot(), before);

    tree.clear_faults();
    VoteService::new()
        .record_vote(&state, "g1", "gamer-a", vote("g1", "s1", "gamer-a", "p2"))
        .await?;
    Ok(())
}

#[tokio::test]
async fn failed_archive_moves_nothing() -> Result<(), AppError> {
    let (state, tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    VoteService::new()
        .record_vote(&state, "g1", "gamer-a", vote("g1", "s1", "gamer-a", "p2"))
        .await?;
    tree.fail_writes_under(&path::game("g1").child("step_results"));

    let err = VoteService::new()
        .archive_step_results(&state, "g1")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreWriteFailed);

    let game = games::require_game(state.store(), "g1").await?;
    assert_eq!(game.steps["s1"].result["gamer-a"].len(), 1);
    assert!(game.step_results.is_empty());
    Ok(())
}

#[tokio::test]
async fn schedule_stops_at_first_failed_write() -> Result<(), AppError> {
    let (state, tree) = test_state();
    tree.fail_writes_under(&path::step("b"));
    let steps = vec![Step::new("a", "day", 30), Step::new("b", "night", 30), Step::new("c", "day", 30)];

    let err = StepService::new()
        .schedule_steps(&state, steps, "1000")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreWriteFailed);

    // Writes before the failure stay applied.
    let written: Vec<String> = turn_engine::repos::steps::list_steps(state.store())
        .await?
        .into_iter()
        .map(|s| s.bin)
        .collect();
    assert_eq!(written, vec!["a"]);
    Ok(())
}

#[tokio::test]
async fn failed_acceptance_write_reports_store_error() -> Result<(), AppError> {
    let (state, tree) = test_state();
    let owner = seed_player(&state, "owner").await?;
    seed_group(&state, "grp", 0, &owner).await?;
    seed_player(&state, "p2").await?;
    let service = InvitationService::new();
    service
        .invite_player_to_group(&state, "p2", group_invitation("inv-1", "grp"))
        .await?;
    tree.fail_writes_under(&path::player_invitation("p2", "inv-1"));

    let err = service
        .accept_group_invitation(&state, "p2", "inv-1", "grp")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreWriteFailed);
    let player = players::require_player(state.store(), "p2").await?;
    assert!(!player.invitations["inv-1"].accepted);
    assert!(player.group_ids.is_empty());
    Ok(())
}

#[tokio::test]
async fn unavailable_store_fails_reads_and_writes() -> Result<(), AppError> {
    let (state, tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    tree.set_unavailable(true);

    let err = VoteService::new()
        .record_vote(&state, "g1", "gamer-a", vote("g1", "s1", "gamer-a", "p2"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreUnavailable);

    let err = StepService::new()
        .schedule_steps(&state, vec![Step::new("a", "day", 30)], "0")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreUnavailable);

    tree.set_unavailable(false);
    assert!(games::find_game(state.store(), "g1").await?.is_some());
    Ok(())
}
