use super::{list_in, remove_in, toggle_in, Favorite, FavoriteStore, NewFavorite, ToggleOutcome};
use crate::error::Result;
use async_trait::async_trait;
use log::info;
use tokio::sync::RwLock;

/// Favorites kept in process memory; lost on exit.
#[derive(Debug, Default)]
pub struct MemoryFavoriteStore {
    favorites: RwLock<Vec<Favorite>>,
}

#[async_trait]
impl FavoriteStore for MemoryFavoriteStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Favorite>> {
        Ok(list_in(&self.favorites.read().await, user_id))
    }

    async fn toggle(&self, user_id: &str, favorite: NewFavorite) -> Result<ToggleOutcome> {
        let recipe_id = favorite.recipe_id.clone();
        let outcome = toggle_in(&mut *self.favorites.write().await, user_id, favorite)?;
        info!("{}: recipe {} favorited={}", user_id, recipe_id, outcome.favorited);
        Ok(outcome)
    }

    async fn remove(&self, user_id: &str, recipe_id: &str) -> Result<ToggleOutcome> {
        let outcome = remove_in(&mut *self.favorites.write().await, user_id, recipe_id)?;
        info!("{}: recipe {} removed from favorites", user_id, recipe_id);
        Ok(outcome)
    }
}
