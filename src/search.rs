//! Search parameters, their validation, and the reshaping of upstream hits
//! into the result records handed back to callers.

use crate::config::SearchConfig;
use crate::error::{RecipeError, Result};
use crate::model::{IngredientRecipe, NutrientRecipe, NutritionSummary};
use crate::spoonacular::types::{ComplexSearchHit, IngredientSearchHit, Nutrient};
use serde::{Deserialize, Serialize};

const MAX_INGREDIENT_LEN: usize = 255;

/// Ranking strategy for ingredient searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Ranking {
    /// Maximize used ingredients
    #[default]
    MaximizeUsed,
    /// Minimize missing ingredients
    MinimizeMissing,
}

impl Ranking {
    pub fn as_param(self) -> u8 {
        match self {
            Ranking::MaximizeUsed => 1,
            Ranking::MinimizeMissing => 2,
        }
    }
}

impl TryFrom<u8> for Ranking {
    type Error = RecipeError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Ranking::MaximizeUsed),
            2 => Ok(Ranking::MinimizeMissing),
            other => Err(RecipeError::Validation(format!(
                "ranking must be 1 or 2, got {other}"
            ))),
        }
    }
}

/// Find recipes that use the given ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IngredientQuery {
    pub ingredients: Vec<String>,
    /// Page size; the configured default when unset
    pub limit: Option<usize>,
    pub offset: usize,
    pub ranking: Ranking,
    pub ignore_pantry: bool,
    pub dish_type: Option<String>,
}

impl Default for IngredientQuery {
    fn default() -> Self {
        Self {
            ingredients: Vec::new(),
            limit: None,
            offset: 0,
            ranking: Ranking::default(),
            ignore_pantry: true,
            dish_type: None,
        }
    }
}

impl IngredientQuery {
    pub fn new<S: Into<String>>(ingredients: impl IntoIterator<Item = S>) -> Self {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Check the query and resolve the page size to use.
    pub fn validate(&self, search: &SearchConfig) -> Result<usize> {
        if self.ingredients.is_empty() {
            return Err(RecipeError::Validation(
                "at least one ingredient is required".to_string(),
            ));
        }
        if let Some(long) = self
            .ingredients
            .iter()
            .find(|i| i.chars().count() > MAX_INGREDIENT_LEN)
        {
            return Err(RecipeError::Validation(format!(
                "ingredient is longer than {MAX_INGREDIENT_LEN} characters: {long:.20}..."
            )));
        }
        search.page_limit(self.limit)
    }

    /// Comma-joined ingredient list as Spoonacular expects it
    pub fn ingredient_param(&self) -> String {
        self.ingredients.join(",")
    }
}

/// Inclusive nutrient ranges for a nutrient search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutrientBounds {
    pub min_calories: f64,
    pub max_calories: f64,
    pub min_protein: f64,
    pub max_protein: f64,
    pub min_fat: f64,
    pub max_fat: f64,
    pub min_carbs: f64,
    pub max_carbs: f64,
}

impl Default for NutrientBounds {
    fn default() -> Self {
        Self {
            min_calories: 0.0,
            max_calories: 10_000.0,
            min_protein: 0.0,
            max_protein: 1_000.0,
            min_fat: 0.0,
            max_fat: 1_000.0,
            min_carbs: 0.0,
            max_carbs: 1_000.0,
        }
    }
}

impl NutrientBounds {
    /// Upstream parameter names paired with their values
    pub fn params(&self) -> [(&'static str, f64); 8] {
        [
            ("minCalories", self.min_calories),
            ("maxCalories", self.max_calories),
            ("minProtein", self.min_protein),
            ("maxProtein", self.max_protein),
            ("minFat", self.min_fat),
            ("maxFat", self.max_fat),
            ("minCarbs", self.min_carbs),
            ("maxCarbs", self.max_carbs),
        ]
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Find recipes within nutrient ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NutrientQuery {
    #[serde(flatten)]
    pub bounds: NutrientBounds,
    pub limit: Option<usize>,
    pub offset: usize,
    pub dish_type: Option<String>,
}

impl Default for NutrientQuery {
    fn default() -> Self {
        Self {
            bounds: NutrientBounds::default(),
            limit: None,
            offset: 0,
            dish_type: None,
        }
    }
}

impl NutrientQuery {
    /// Check the query and resolve the page size to use.
    pub fn validate(&self, search: &SearchConfig) -> Result<usize> {
        for (name, value) in self.bounds.params() {
            if !value.is_finite() || value < 0.0 {
                return Err(RecipeError::Validation(format!(
                    "{name} must be a number >= 0"
                )));
            }
        }
        let limit = search.page_limit(self.limit)?;
        if self.bounds.is_unconstrained() {
            return Err(RecipeError::Validation(
                "At least one nutrient constraint must be provided".to_string(),
            ));
        }
        Ok(limit)
    }
}

/// Find recipes by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameQuery {
    pub query: String,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl Default for NameQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: None,
            offset: 0,
        }
    }
}

impl NameQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self, search: &SearchConfig) -> Result<usize> {
        if self.query.is_empty() {
            return Err(RecipeError::Validation("query is required".to_string()));
        }
        search.page_limit(self.limit)
    }
}

/// Slice `[offset, offset + limit)` out of `items`, clamped to its length.
pub fn paginate<T>(mut items: Vec<T>, offset: usize, limit: usize) -> Vec<T> {
    let start = offset.min(items.len());
    let end = start.saturating_add(limit).min(items.len());
    items.truncate(end);
    items.drain(..start);
    items
}

pub fn ingredient_recipe(hit: IngredientSearchHit, placeholder_image: &str) -> IngredientRecipe {
    IngredientRecipe {
        id: hit.id,
        title: hit.title,
        image: hit.image.unwrap_or_else(|| placeholder_image.to_string()),
        used_ingredient_count: hit.used_ingredient_count.unwrap_or(0),
        missing_ingredient_count: hit.missed_ingredient_count.unwrap_or(0),
        used_ingredients: hit.used_ingredients,
        missed_ingredients: hit.missed_ingredients,
        unused_ingredients: hit.unused_ingredients,
    }
}

/// Nutrient search results list calories, protein, fat and carbs first, in that order.
pub fn nutrient_recipe_positional(
    hit: ComplexSearchHit,
    placeholder_image: &str,
) -> NutrientRecipe {
    let amount_at = |i: usize| hit.nutrients().get(i).map(|n| n.amount).unwrap_or(0.0);
    NutrientRecipe {
        id: hit.id,
        calories: amount_at(0),
        protein: amount_at(1),
        fat: amount_at(2),
        carbs: amount_at(3),
        title: hit.title,
        image: hit.image.unwrap_or_else(|| placeholder_image.to_string()),
    }
}

/// Name search results carry the full nutrient list, so pick macros by name.
pub fn nutrient_recipe_by_name(hit: ComplexSearchHit, placeholder_image: &str) -> NutrientRecipe {
    let amount_of = |name: &str| find_nutrient(hit.nutrients(), name).map(|n| n.amount);
    NutrientRecipe {
        id: hit.id,
        calories: amount_of("calories").unwrap_or(0.0),
        protein: amount_of("protein").unwrap_or(0.0),
        fat: amount_of("fat").unwrap_or(0.0),
        carbs: amount_of("carbohydrates").unwrap_or(0.0),
        title: hit.title,
        image: hit.image.unwrap_or_else(|| placeholder_image.to_string()),
    }
}

pub fn nutrition_summary(
    id: u64,
    nutrients: &[Nutrient],
    title: Option<String>,
    image: Option<String>,
    placeholder_image: &str,
) -> NutritionSummary {
    let grams = |name: &str| find_nutrient(nutrients, name).map(|n| format!("{}g", n.amount));
    NutritionSummary {
        id,
        title: title.unwrap_or_else(|| "Unknown Recipe".to_string()),
        image: image.unwrap_or_else(|| placeholder_image.to_string()),
        protein: grams("protein"),
        carbs: grams("carbohydrates"),
        fat: grams("fat"),
    }
}

// Last entry wins when a name repeats.
fn find_nutrient<'a>(nutrients: &'a [Nutrient], name: &str) -> Option<&'a Nutrient> {
    nutrients
        .iter()
        .rev()
        .find(|n| n.name.eq_ignore_ascii_case(name))
}
