use super::{list_in, remove_in, toggle_in, Favorite, FavoriteStore, NewFavorite, ToggleOutcome};
use crate::error::Result;
use async_trait::async_trait;
use log::{debug, info};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Favorites persisted as a JSON array in a single file.
///
/// Every operation reads the whole file and writes it back, serialized by a
/// lock so concurrent toggles from one process cannot lose updates.
pub struct JsonFileFavoriteStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileFavoriteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<Vec<Favorite>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet", self.path.display());
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, favorites: &[Favorite]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(favorites)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl FavoriteStore for JsonFileFavoriteStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Favorite>> {
        let _guard = self.lock.lock().await;
        Ok(list_in(&self.load().await?, user_id))
    }

    async fn toggle(&self, user_id: &str, favorite: NewFavorite) -> Result<ToggleOutcome> {
        let _guard = self.lock.lock().await;
        let mut favorites = self.load().await?;
        let recipe_id = favorite.recipe_id.clone();
        let outcome = toggle_in(&mut favorites, user_id, favorite)?;
        self.save(&favorites).await?;
        info!("{}: recipe {} favorited={}", user_id, recipe_id, outcome.favorited);
        Ok(outcome)
    }

    async fn remove(&self, user_id: &str, recipe_id: &str) -> Result<ToggleOutcome> {
        let _guard = self.lock.lock().await;
        let mut favorites = self.load().await?;
        let outcome = remove_in(&mut favorites, user_id, recipe_id)?;
        self.save(&favorites).await?;
        info!("{}: recipe {} removed from favorites", user_id, recipe_id);
        Ok(outcome)
    }
}
