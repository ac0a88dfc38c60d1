use recipe_finder::config::FavoritesConfig;
use recipe_finder::favorites::store_from_config;
use recipe_finder::{FavoriteStore, NewFavorite, RecipeError};
use std::sync::Arc;

fn favorite(recipe_id: &str, title: &str) -> NewFavorite {
    NewFavorite {
        recipe_id: recipe_id.to_string(),
        recipe_title: title.to_string(),
        recipe_image: Some(format!("https://img.spoonacular.com/recipes/{recipe_id}.jpg")),
        view_recipe_url: format!("/recipe/{recipe_id}"),
    }
}

async fn exercise(store: &dyn FavoriteStore) {
    let added = store
        .toggle("alice", favorite("715538", "Bruschetta Pasta"))
        .await
        .unwrap();
    assert!(added.success);
    assert!(added.favorited);

    store
        .toggle("alice", favorite("716429", "Garlic Pasta"))
        .await
        .unwrap();
    store
        .toggle("bob", favorite("715538", "Bruschetta Pasta"))
        .await
        .unwrap();

    let alice: Vec<_> = store
        .list("alice")
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.recipe_id)
        .collect();
    assert_eq!(alice, vec!["715538", "716429"]);

    let removed = store
        .toggle("alice", favorite("715538", "Bruschetta Pasta"))
        .await
        .unwrap();
    assert!(!removed.favorited);
    assert_eq!(removed.message, "Recipe removed from favorites.");

    let removed = store.remove("alice", "716429").await.unwrap();
    assert!(!removed.favorited);
    assert!(store.list("alice").await.unwrap().is_empty());
    assert_eq!(store.list("bob").await.unwrap().len(), 1);

    let err = store.remove("alice", "716429").await.unwrap_err();
    assert!(matches!(err, RecipeError::FavoriteNotFound(_)));
    assert_eq!(err.status_code(), 404);
}

#[tokio::test]
async fn test_memory_store_from_config() {
    let store = store_from_config(&FavoritesConfig::default());
    exercise(store.as_ref()).await;
}

#[tokio::test]
async fn test_file_store_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_from_config(&FavoritesConfig {
        path: Some(dir.path().join("favorites.json")),
    });
    exercise(store.as_ref()).await;
}

#[tokio::test]
async fn test_concurrent_toggles_are_not_lost() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn FavoriteStore> = Arc::from(store_from_config(&FavoritesConfig {
        path: Some(dir.path().join("favorites.json")),
    }));

    let mut handles = Vec::new();
    for id in 0..10 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .toggle("alice", favorite(&id.to_string(), "Recipe"))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(store.list("alice").await.unwrap().len(), 10);
}
