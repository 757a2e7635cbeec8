use turn_engine::services::PlayerService;
use turn_engine::AppError;

use crate::support::fixtures::test_state;

#[tokio::test]
async fn registered_players_get_a_photo_from_the_list() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    let photos = vec!["a.png".to_string(), "b.png".to_string()];
    let names = vec!["ana".to_string(), "bo".to_string(), "cy".to_string()];

    let created = PlayerService::new()
        .register_players(&state, &names, &photos)
        .await?;
    assert_eq!(created.len(), 3);
    for player in &created {
        assert!(photos.contains(&player.photo));
        assert_eq!(player.status, "available");
        assert_eq!(player.privacy, "public");
        assert!(!player.bin.is_empty());
    }

    let mut stored = PlayerService::new().list_players(&state).await?;
    stored.sort_by(|a, b| a.user_name.cmp(&b.user_name));
    let stored_names: Vec<&str> = stored.iter().map(|p| p.user_name.as_str()).collect();
    assert_eq!(stored_names, vec!["ana", "bo", "cy"]);
    Ok(())
}

#[tokio::test]
async fn no_photos_leaves_photo_blank() -> Result<(), AppError> {
    let (state, _tree) = test_state();
    let service = PlayerService::new();
    let created = service
        .register_players(&state, &["solo".to_string()], &[])
        .await?;

    let found = service.find_player(&state, &created[0].bin).await?;
    assert_eq!(found.map(|p| p.photo), Some(String::new()));
    assert!(service.find_player(&state, "nobody").await?.is_none());
    Ok(())
}
