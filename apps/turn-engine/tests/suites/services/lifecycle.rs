use serde_json::json;
use turn_engine::adapters::tree::path;
use turn_engine::entities::{Ability, Character, Game, GameStatus, Gamer, Step};
use turn_engine::errors::ErrorCode;
use turn_engine::repos::{catalog, games, steps};
use turn_engine::services::{CatalogService, GameLifecycleService};
use turn_engine::{AppError, GameTransition, StepAdvance, TreeStore};

use crate::support::fixtures::{seed_game, test_state};

#[tokio::test]
async fn start_and_end_persist_only_status() -> Result<(), AppError> {
    let (state, tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    let service = GameLifecycleService::new();

    let started = service.start_game(&state, "g1").await?;
    assert_eq!(started.value, GameStatus::Started);
    assert_eq!(started.transitions, vec![GameTransition::GameStarted]);
    assert_eq!(tree.snapshot()["games"]["g1"]["status"], json!("started"));

    // Starting again reports no new transition.
    let again = service.start_game(&state, "g1").await?;
    assert!(again.transitions.is_empty());

    tree.set(&path::game("g1").child("server_name"), json!("moved"))
        .await
        .unwrap();
    let ended = service.end_game(&state, "g1").await?;
    assert_eq!(ended.transitions, vec![GameTransition::GameEnded]);

    let game = games::require_game(state.store(), "g1").await?;
    assert_eq!(game.status, GameStatus::Ended);
    assert_eq!(game.server_name, "moved");
    Ok(())
}

#[tokio::test]
async fn start_unknown_game_is_not_found() {
    let (state, _tree) = test_state();
    let err = GameLifecycleService::new()
        .start_game(&state, "nope")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);
}

#[tokio::test]
async fn set_new_step_uses_configured_initial_step() -> Result<(), AppError> {
    let (mut state, _tree) = test_state();
    seed_game(&state, "g1", &["s1", "s2"]).await?;
    let service = GameLifecycleService::new();

    let outcome = service.set_new_step(&state, "g1").await?;
    assert_eq!(outcome.value, "1");
    assert_eq!(
        games::require_game(state.store(), "g1").await?.current_step.as_deref(),
        Some("1")
    );

    state.config.initial_step = "s2".into();
    service.set_new_step(&state, "g1").await?;
    assert_eq!(
        games::require_game(state.store(), "g1").await?.current_step.as_deref(),
        Some("s2")
    );
    Ok(())
}

#[tokio::test]
async fn set_first_step_reports_the_move_once() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    seed_game(&state, "g1", &["s1", "s2"]).await?;
    let service = GameLifecycleService::new();

    let moved = service.set_first_step(&state, "g1", "s2").await?;
    assert_eq!(
        moved.transitions,
        vec![GameTransition::StepAdvanced {
            from: Some("s1".into()),
            to: "s2".into()
        }]
    );
    let same = service.set_first_step(&state, "g1", "s2").await?;
    assert!(same.transitions.is_empty());
    Ok(())
}

#[tokio::test]
async fn set_next_step_follows_pointer() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    seed_game(&state, "g1", &["s1", "s2", "s3"]).await?;
    let service = GameLifecycleService::new();

    let first = service.set_next_step(&state, "g1").await?;
    assert_eq!(
        first.value,
        StepAdvance::Advanced {
            from: Some("s1".into()),
            to: "s2".into()
        }
    );
    service.set_next_step(&state, "g1").await?;
    let game = games::require_game(state.store(), "g1").await?;
    assert_eq!(game.current_step.as_deref(), Some("s3"));

    // Last step has no pointer: nothing changes.
    let last = service.set_next_step(&state, "g1").await?;
    assert!(matches!(last.value, StepAdvance::Unchanged { .. }));
    assert!(last.transitions.is_empty());
    let unchanged = games::require_game(state.store(), "g1").await?;
    assert_eq!(unchanged, game);
    Ok(())
}

#[tokio::test]
async fn set_next_step_falls_back_to_step_catalog() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    let mut game = Game::new("g1");
    game.current_step = Some("intro".into());
    games::save_game(state.store(), &game).await?;
    steps::save_step(state.store(), &Step::new("intro", "day", 5).with_next("night-1")).await?;
    steps::save_step(state.store(), &Step::new("night-1", "night", 5)).await?;

    let outcome = GameLifecycleService::new().set_next_step(&state, "g1").await?;
    assert_eq!(
        outcome.transitions,
        vec![GameTransition::StepAdvanced {
            from: Some("intro".into()),
            to: "night-1".into()
        }]
    );
    Ok(())
}

#[tokio::test]
async fn dangling_pointer_leaves_game_unchanged() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    let mut game = Game::new("g1");
    game.steps
        .insert("s1".into(), Step::new("s1", "night", 5).with_next("ghost"));
    game.current_step = Some("s1".into());
    games::save_game(state.store(), &game).await?;

    let outcome = GameLifecycleService::new().set_next_step(&state, "g1").await?;
    match outcome.value {
        StepAdvance::Unchanged { reason } => assert!(reason.contains("ghost")),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(games::require_game(state.store(), "g1").await?, game);
    Ok(())
}

#[tokio::test]
async fn first_day_flags_are_reset() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    let mut game = Game::new("g1");
    game.first_day_completed = true;
    game.explanation_seen = true;
    game.day_counter = 4;
    GameLifecycleService::new().initialize_game(&state, game).await?;

    GameLifecycleService::new()
        .reset_first_day_flags(&state, "g1")
        .await?;
    let game = games::require_game(state.store(), "g1").await?;
    assert!(!game.first_day_completed);
    assert!(!game.explanation_seen);
    assert_eq!(game.day_counter, 4);
    Ok(())
}

#[tokio::test]
async fn gamers_join_once_and_leave() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    let service = GameLifecycleService::new();

    let joined = service
        .add_gamer(&state, "g1", Gamer::new("p1", "g1", ""))
        .await?;
    assert_eq!(joined.value.character_id, "3");
    assert_eq!(
        joined.transitions,
        vec![GameTransition::GamerJoined {
            player_bin: "p1".into()
        }]
    );

    let again = service
        .add_gamer(&state, "g1", Gamer::new("p1", "g1", "7"))
        .await?;
    assert!(again.transitions.is_empty());
    assert_eq!(again.value.character_id, "3");

    let removed = service.remove_gamer(&state, "g1", "p1").await?;
    assert!(removed.value);
    assert!(!service.remove_gamer(&state, "g1", "p1").await?.value);
    assert!(games::find_gamer(state.store(), "g1", "p1").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn characters_of_seated_gamers_are_copied_once() -> Result<(), AppError> {
    let (state, tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    CatalogService::new()
        .add_characters(
            &state,
            &[
                Character {
                    bin: "3".into(),
                    name: "villager".into(),
                    description: String::new(),
                    abilities: Vec::new(),
                },
                Character {
                    bin: "5".into(),
                    name: "doctor".into(),
                    description: String::new(),
                    abilities: Vec::new(),
                },
            ],
        )
        .await?;
    let service = GameLifecycleService::new();
    for (player, character) in [("p1", "3"), ("p2", "3"), ("p3", "5")] {
        service
            .add_gamer(&state, "g1", Gamer::new(player, "g1", character))
            .await?;
    }

    let copied = service.add_gamer_characters_to_game(&state, "g1").await?;
    let bins: Vec<&str> = copied.iter().map(|c| c.bin.as_str()).collect();
    assert_eq!(bins, vec!["3", "5"]);
    assert_eq!(
        tree.snapshot()["games"]["g1"]["characters"]["5"]["name"],
        json!("doctor")
    );
    Ok(())
}

#[tokio::test]
async fn unknown_character_fails_the_copy() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    let service = GameLifecycleService::new();
    service
        .add_gamer(&state, "g1", Gamer::new("p1", "g1", "99"))
        .await?;
    let err = service
        .add_gamer_characters_to_game(&state, "g1")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::CharacterNotFound);
    Ok(())
}

#[tokio::test]
async fn abilities_and_fates() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    seed_game(&state, "g1", &["s1"]).await?;
    let heal = Ability {
        bin: "heal".into(),
        name: "Heal".into(),
        description: "Protect one player tonight".into(),
    };
    catalog::save_ability(state.store(), &heal).await?;
    let service = GameLifecycleService::new();

    service
        .add_abilities_to_game(&state, "g1", vec![heal.clone()])
        .await?;
    assert_eq!(games::require_game(state.store(), "g1").await?.abilities, vec![heal]);

    service
        .add_gamer(&state, "g1", Gamer::new("p1", "g1", "3"))
        .await?;
    let first = service.apply_ability(&state, "heal", "g1", "p1").await?;
    let second = service.apply_ability(&state, "heal", "g1", "p1").await?;
    assert_ne!(first.bin, second.bin);

    let gamer = games::require_gamer(state.store(), "g1", "p1").await?;
    assert_eq!(gamer.fates.len(), 2);
    assert!(gamer.fates.values().all(|f| f.ability_bin == "heal"));

    let err = service
        .apply_ability(&state, "heal", "g1", "nobody")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GamerNotFound);
    Ok(())
}
