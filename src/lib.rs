//! Recipe discovery on top of the Spoonacular API.
//!
//! Search by ingredients, nutrient ranges or name, view a recipe with the
//! caller's ingredients matched against it and its instructions formatted as
//! numbered steps, and keep a per-user list of favorites.

pub mod builder;
pub mod config;
pub mod error;
pub mod favorites;
pub mod instructions;
pub mod matcher;
pub mod model;
pub mod search;
pub mod service;
pub mod spoonacular;

pub use builder::{RecipeFinder, RecipeFinderBuilder};
pub use config::{load_config, AppConfig};
pub use error::{RecipeError, Result};
pub use favorites::{
    Favorite, FavoriteStore, JsonFileFavoriteStore, MemoryFavoriteStore, NewFavorite,
    ToggleOutcome,
};
pub use instructions::{normalize_instructions, InstructionText};
pub use matcher::{match_ingredients, parse_ingredient_list};
pub use model::{
    IngredientMatch, IngredientRecipe, NutrientRecipe, NutritionSummary, RecipeDetail,
    RecipeIngredient,
};
pub use search::{IngredientQuery, NameQuery, NutrientBounds, NutrientQuery, Ranking};
pub use service::RecipeService;

/// Fetch a recipe and match a comma-separated ingredient list against it,
/// using configuration from `config.toml` and the environment.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let detail = recipe_finder::recipe_detail(716429, "garlic,pasta").await?;
/// println!("{}", detail.formatted_instructions);
/// # Ok(())
/// # }
/// ```
pub async fn recipe_detail(id: u64, ingredients: &str) -> Result<RecipeDetail> {
    let config = load_config()?;
    RecipeService::from_config(&config)?
        .recipe_detail(id, parse_ingredient_list(ingredients))
        .await
}
