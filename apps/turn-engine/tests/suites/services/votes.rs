use serde_json::json;
use turn_engine::adapters::tree::path;
use turn_engine::errors::ErrorCode;
use turn_engine::repos::games;
use turn_engine::services::VoteService;
use turn_engine::{AppError, GameTransition, TreeStore};

use crate::support::fixtures::{seed_game, test_state, vote};

#[tokio::test]
async fn vote_appends_exactly_one_matching_result() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    seed_game(&state, "g1", &["s1", "s2"]).await?;
    let service = VoteService::new();

    service
        .record_vote(&state, "g1", "gm1", vote("g1", "s1", "gm1", "gm2"))
        .await?;
    let outcome = service
        .record_vote(&state, "g1", "gm1", vote("g1", "s1", "gm1", "gm3"))
        .await?;

    let game = games::require_game(state.store(), "g1").await?;
    let results = &game.steps["s1"].result["gm1"];
    assert_eq!(results.len(), 2);
    let last = results.last().unwrap();
    assert_eq!(last, &outcome.value);
    assert_eq!(last.step_bin, "s1");
    assert_eq!(last.game_bin, "g1");
    assert_eq!(last.gamer_id, "gm1");
    assert_eq!(last.vote.choice, "gm3");
    assert_ne!(results[0].bin, results[1].bin);
    assert_eq!(
        outcome.transitions,
        vec![GameTransition::VoteRecorded {
            step_bin: "s1".into(),
            gamer_id: "gm1".into()
        }]
    );
    Ok(())
}

#[tokio::test]
async fn vote_writes_only_the_gamers_result_node() -> Result<(), AppError> {
    let (state, tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    let service = VoteService::new();
    service
        .record_vote(&state, "g1", "gm2", vote("g1", "s1", "gm2", "gm1"))
        .await?;

    // A concurrent external edit elsewhere in the game survives the next vote.
    tree.set(&path::game("g1").child("server_name"), json!("edited"))
        .await
        .unwrap();
    service
        .record_vote(&state, "g1", "gm1", vote("g1", "s1", "gm1", "gm2"))
        .await?;

    let game = games::require_game(state.store(), "g1").await?;
    assert_eq!(game.server_name, "edited");
    assert_eq!(game.steps["s1"].result["gm2"].len(), 1);
    assert_eq!(game.steps["s1"].result["gm1"].len(), 1);
    Ok(())
}

#[tokio::test]
async fn vote_without_current_step_is_rejected() -> Result<(), AppError> {
    let (state, tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    tree.delete(&path::game("g1").child("current_step")).await.unwrap();

    let err = VoteService::new()
        .record_vote(&state, "g1", "gm1", vote("g1", "s1", "gm1", "x"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NoCurrentStep);
    Ok(())
}

#[tokio::test]
async fn vote_on_unknown_game_is_not_found() {
    let (state, _tree) = test_state();
    let err = VoteService::new()
        .record_vote(&state, "missing", "gm1", vote("missing", "s1", "gm1", "x"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);
}

#[tokio::test]
async fn archive_moves_results_and_is_idempotent() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    seed_game(&state, "g1", &["s1", "s2"]).await?;
    let service = VoteService::new();
    service
        .record_vote(&state, "g1", "gm1", vote("g1", "s1", "gm1", "gm2"))
        .await?;
    service
        .record_vote(&state, "g1", "gm2", vote("g1", "s1", "gm2", "gm1"))
        .await?;

    let first = service.archive_step_results(&state, "g1").await?;
    assert_eq!(first.value.moved, 2);
    assert_eq!(
        first.transitions,
        vec![GameTransition::ResultsArchived { moved: 2 }]
    );

    let archived = games::require_game(state.store(), "g1").await?;
    assert!(archived.steps.values().all(|s| s.result.is_empty()));
    assert_eq!(archived.steps.len(), 2);
    assert_eq!(archived.step_results["gm1"].len(), 1);
    assert_eq!(archived.step_results["gm2"].len(), 1);

    let second = service.archive_step_results(&state, "g1").await?;
    assert_eq!(second.value.moved, 0);
    assert!(second.transitions.is_empty());
    let after = games::require_game(state.store(), "g1").await?;
    assert_eq!(after, archived);
    Ok(())
}

#[tokio::test]
async fn archived_history_only_grows() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    let service = VoteService::new();

    let mut previous = 0;
    for round in 0..3 {
        service
            .record_vote(&state, "g1", "gm1", vote("g1", "s1", "gm1", &format!("c{round}")))
            .await?;
        service.archive_step_results(&state, "g1").await?;
        let game = games::require_game(state.store(), "g1").await?;
        assert!(game.archived_count() > previous);
        previous = game.archived_count();
    }
    let game = games::require_game(state.store(), "g1").await?;
    let choices: Vec<&str> = game.step_results["gm1"]
        .iter()
        .map(|r| r.vote.choice.as_str())
        .collect();
    assert_eq!(choices, vec!["c0", "c1", "c2"]);
    Ok(())
}

#[tokio::test]
async fn malformed_gamer_id_is_rejected_before_any_write() -> Result<(), AppError> {
    let (state, tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    let service = VoteService::new();
    service
        .record_vote(&state, "g1", "gm1", vote("g1", "s1", "gm1", "p2"))
        .await?;
    let before = tree.snapshot();

    for gamer in ["", "gm1/0", "gm.1", "a[1]"] {
        let err = service
            .record_vote(&state, "g1", gamer, vote("g1", "s1", gamer, "p3"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument, "gamer id {gamer:?}");
    }

    assert_eq!(tree.snapshot(), before);
    let game = games::require_game(state.store(), "g1").await?;
    assert_eq!(game.steps["s1"].result["gm1"].len(), 1);
    Ok(())
}
