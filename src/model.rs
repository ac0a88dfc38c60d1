use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An ingredient as listed by a recipe, reduced to its metric measure.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default)]
    pub metric_amount: f64,
    #[serde(default)]
    pub metric_unit: String,
}

impl RecipeIngredient {
    pub fn new(
        name: impl Into<String>,
        metric_amount: f64,
        metric_unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            metric_amount,
            metric_unit: metric_unit.into(),
        }
    }
}

/// One recipe ingredient annotated with whether the user has it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientMatch {
    pub ingredient: String,
    pub matched: bool,
    pub metric_amount: f64,
    pub metric_unit: String,
}

/// Recipe found through an ingredient search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRecipe {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub used_ingredient_count: u32,
    pub missing_ingredient_count: u32,
    pub used_ingredients: Vec<Value>,
    pub missed_ingredients: Vec<Value>,
    pub unused_ingredients: Vec<Value>,
}

/// Recipe found through a nutrient or name search, with its macros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientRecipe {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Macro-nutrient summary of a single recipe, amounts formatted as grams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    pub id: u64,
    pub title: String,
    pub image: String,
    pub protein: Option<String>,
    pub carbs: Option<String>,
    pub fat: Option<String>,
}

/// Everything a recipe page needs: the upstream record plus derived views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    /// Raw recipe record as returned by Spoonacular
    pub recipe: Value,
    pub user_ingredients: Vec<String>,
    pub matching_ingredients: Vec<IngredientMatch>,
    pub formatted_instructions: String,
}
