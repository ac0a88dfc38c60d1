mod json_file;
mod memory;

pub use json_file::JsonFileFavoriteStore;
pub use memory::MemoryFavoriteStore;

use crate::config::FavoritesConfig;
use crate::error::{RecipeError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A recipe a user has marked as favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub user_id: String,
    pub recipe_id: String,
    pub recipe_title: String,
    pub recipe_image: Option<String>,
    pub view_recipe_url: String,
    /// Unix seconds
    pub created_at: u64,
}

/// Fields a caller supplies to favorite a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFavorite {
    pub recipe_id: String,
    pub recipe_title: String,
    #[serde(default)]
    pub recipe_image: Option<String>,
    pub view_recipe_url: String,
}

impl NewFavorite {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("recipe_id", &self.recipe_id),
            ("recipe_title", &self.recipe_title),
            ("view_recipe_url", &self.view_recipe_url),
        ] {
            if value.trim().is_empty() {
                return Err(RecipeError::Validation(format!("{field} is required")));
            }
        }
        Ok(())
    }

    fn into_favorite(self, user_id: &str) -> Favorite {
        Favorite {
            user_id: user_id.to_string(),
            recipe_id: self.recipe_id,
            recipe_title: self.recipe_title,
            recipe_image: self.recipe_image,
            view_recipe_url: self.view_recipe_url,
            created_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }
}

/// Result of toggling a favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    pub success: bool,
    pub message: String,
    /// Whether the recipe is a favorite after the toggle
    pub favorited: bool,
}

impl ToggleOutcome {
    fn added() -> Self {
        Self {
            success: true,
            message: "Recipe added to favorites!".to_string(),
            favorited: true,
        }
    }

    fn removed() -> Self {
        Self {
            success: true,
            message: "Recipe removed from favorites.".to_string(),
            favorited: false,
        }
    }
}

/// Per-user favorites list. `(user_id, recipe_id)` is unique.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// All favorites of a user, oldest first
    async fn list(&self, user_id: &str) -> Result<Vec<Favorite>>;

    /// Remove the recipe if it is already a favorite, add it otherwise
    async fn toggle(&self, user_id: &str, favorite: NewFavorite) -> Result<ToggleOutcome>;

    /// Remove a favorite; fails with `FavoriteNotFound` if it does not exist
    async fn remove(&self, user_id: &str, recipe_id: &str) -> Result<ToggleOutcome>;
}

/// Store selected by configuration: file-backed when a path is set.
pub fn store_from_config(config: &FavoritesConfig) -> Box<dyn FavoriteStore> {
    match &config.path {
        Some(path) => Box::new(JsonFileFavoriteStore::new(path.clone())),
        None => Box::new(MemoryFavoriteStore::default()),
    }
}

// Shared list operations for the store implementations.

fn list_in(favorites: &[Favorite], user_id: &str) -> Vec<Favorite> {
    favorites
        .iter()
        .filter(|f| f.user_id == user_id)
        .cloned()
        .collect()
}

fn position_of(favorites: &[Favorite], user_id: &str, recipe_id: &str) -> Option<usize> {
    favorites
        .iter()
        .position(|f| f.user_id == user_id && f.recipe_id == recipe_id)
}

fn toggle_in(
    favorites: &mut Vec<Favorite>,
    user_id: &str,
    new: NewFavorite,
) -> Result<ToggleOutcome> {
    new.validate()?;
    match position_of(favorites, user_id, &new.recipe_id) {
        Some(index) => {
            favorites.remove(index);
            Ok(ToggleOutcome::removed())
        }
        None => {
            favorites.push(new.into_favorite(user_id));
            Ok(ToggleOutcome::added())
        }
    }
}

fn remove_in(
    favorites: &mut Vec<Favorite>,
    user_id: &str,
    recipe_id: &str,
) -> Result<ToggleOutcome> {
    let index = position_of(favorites, user_id, recipe_id)
        .ok_or_else(|| RecipeError::FavoriteNotFound(recipe_id.to_string()))?;
    favorites.remove(index);
    Ok(ToggleOutcome::removed())
}

#[cfg(test)]
pub(crate) fn sample(recipe_id: &str) -> NewFavorite {
    NewFavorite {
        recipe_id: recipe_id.to_string(),
        recipe_title: format!("Recipe {recipe_id}"),
        recipe_image: None,
        view_recipe_url: format!("/recipe/{recipe_id}"),
    }
}
