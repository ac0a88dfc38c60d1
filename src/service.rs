use crate::config::{AppConfig, SearchConfig};
use crate::error::Result;
use crate::instructions::normalize_instructions;
use crate::matcher::match_ingredients;
use crate::model::{IngredientRecipe, NutrientRecipe, NutritionSummary, RecipeDetail};
use crate::search::{
    ingredient_recipe, nutrient_recipe_by_name, nutrient_recipe_positional, nutrition_summary,
    paginate, IngredientQuery, NameQuery, NutrientQuery,
};
use crate::spoonacular::types::{IngredientSearchHit, RecipeInformation};
use crate::spoonacular::{ComplexSearch, SpoonacularClient};
use log::{debug, warn};

/// Recipe search and detail operations on top of Spoonacular.
pub struct RecipeService {
    client: SpoonacularClient,
    search: SearchConfig,
}

impl RecipeService {
    pub fn new(client: SpoonacularClient, search: SearchConfig) -> Self {
        Self { client, search }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            SpoonacularClient::new(&config.spoonacular)?,
            config.search.clone(),
        ))
    }

    /// Recipes that use the given ingredients, optionally restricted to a dish type.
    pub async fn find_by_ingredients(
        &self,
        query: &IngredientQuery,
    ) -> Result<Vec<IngredientRecipe>> {
        let limit = query.validate(&self.search)?;

        let mut hits = self.client.find_by_ingredients(query).await?;
        if let Some(dish_type) = query.dish_type.as_deref().filter(|t| !t.is_empty()) {
            hits = self.filter_by_dish_type(hits, dish_type).await;
        }

        Ok(paginate(hits, query.offset, limit)
            .into_iter()
            .map(|hit| ingredient_recipe(hit, &self.search.placeholder_image))
            .collect())
    }

    /// Recipes whose macros fall inside the requested bounds.
    pub async fn find_by_nutrients(&self, query: &NutrientQuery) -> Result<Vec<NutrientRecipe>> {
        let limit = query.validate(&self.search)?;

        let hits = self
            .client
            .complex_search(&ComplexSearch {
                query: None,
                bounds: Some(query.bounds),
                dish_type: query.dish_type.clone().filter(|t| !t.is_empty()),
            })
            .await?;

        Ok(paginate(hits, query.offset, limit)
            .into_iter()
            .map(|hit| nutrient_recipe_positional(hit, &self.search.placeholder_image))
            .collect())
    }

    /// Recipes whose name matches a free-text query.
    pub async fn search_by_name(&self, query: &NameQuery) -> Result<Vec<NutrientRecipe>> {
        let limit = query.validate(&self.search)?;

        let hits = self
            .client
            .complex_search(&ComplexSearch {
                query: Some(query.query.clone()),
                ..Default::default()
            })
            .await?;

        Ok(paginate(hits, query.offset, limit)
            .into_iter()
            .map(|hit| nutrient_recipe_by_name(hit, &self.search.placeholder_image))
            .collect())
    }

    /// Full recipe record with the user's ingredients matched against it and
    /// its instructions formatted as numbered steps.
    pub async fn recipe_detail(
        &self,
        id: u64,
        user_ingredients: Vec<String>,
    ) -> Result<RecipeDetail> {
        let recipe = self.client.information(id, false).await?;
        let info: RecipeInformation = serde_json::from_value(recipe.clone())?;
        debug!(
            "recipe {} has {} ingredients",
            id,
            info.extended_ingredients.len()
        );

        let matching_ingredients = match_ingredients(&user_ingredients, &info.ingredients());
        let formatted_instructions = normalize_instructions(info.instructions);

        Ok(RecipeDetail {
            recipe,
            user_ingredients,
            matching_ingredients,
            formatted_instructions,
        })
    }

    /// Protein, carbs and fat of one recipe. Title and image are echoed back
    /// from the caller since the nutrition endpoint does not return them.
    pub async fn nutrition(
        &self,
        id: u64,
        title: Option<String>,
        image: Option<String>,
    ) -> Result<NutritionSummary> {
        let widget = self.client.nutrition_widget(id).await?;
        Ok(nutrition_summary(
            id,
            &widget.nutrients,
            title,
            image,
            &self.search.placeholder_image,
        ))
    }

    // Spoonacular's ingredient search cannot filter by dish type, so each hit
    // is looked up individually. Hits whose lookup fails are dropped.
    async fn filter_by_dish_type(
        &self,
        hits: Vec<IngredientSearchHit>,
        dish_type: &str,
    ) -> Vec<IngredientSearchHit> {
        let mut kept = Vec::with_capacity(hits.len());
        for hit in hits {
            let info = match self.client.information(hit.id, false).await {
                Ok(value) => serde_json::from_value::<RecipeInformation>(value),
                Err(e) => {
                    warn!("Skipping recipe {}: {}", hit.id, e);
                    continue;
                }
            };
            match info {
                Ok(info) if info.has_dish_type(dish_type) => kept.push(hit),
                Ok(_) => {}
                Err(e) => warn!("Skipping recipe {}: {}", hit.id, e),
            }
        }
        kept
    }
}
