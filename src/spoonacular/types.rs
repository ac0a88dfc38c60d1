use crate::instructions::InstructionText;
use crate::model::RecipeIngredient;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Upstream sends `null` for fields it has no value for; treat it like a
/// missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of `/recipes/findByIngredients`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSearchHit {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub image: Option<String>,
    pub used_ingredient_count: Option<u32>,
    pub missed_ingredient_count: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used_ingredients: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missed_ingredients: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unused_ingredients: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ComplexSearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ComplexSearchHit>,
}

/// One entry of `/recipes/complexSearch` with recipe nutrition attached.
#[derive(Debug, Clone, Deserialize)]
pub struct ComplexSearchHit {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    pub image: Option<String>,
    pub nutrition: Option<Nutrition>,
}

impl ComplexSearchHit {
    pub fn nutrients(&self) -> &[Nutrient] {
        self.nutrition
            .as_ref()
            .map(|n| n.nutrients.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Nutrition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub nutrients: Vec<Nutrient>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Nutrient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    pub unit: Option<String>,
}

/// `/recipes/nutritionWidget.json`
pub type NutritionWidget = Nutrition;

/// The parts of `/recipes/{id}/information` this crate reads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInformation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dish_types: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub extended_ingredients: Vec<ExtendedIngredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: InstructionText,
}

impl RecipeInformation {
    pub fn has_dish_type(&self, dish_type: &str) -> bool {
        let wanted = dish_type.to_lowercase();
        self.dish_types.iter().any(|t| t.to_lowercase() == wanted)
    }

    pub fn ingredients(&self) -> Vec<RecipeIngredient> {
        self.extended_ingredients
            .iter()
            .map(RecipeIngredient::from)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtendedIngredient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub measures: Option<Measures>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Measures {
    pub metric: Option<Measure>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub amount: Option<f64>,
    pub unit_short: Option<String>,
}

impl From<&ExtendedIngredient> for RecipeIngredient {
    fn from(ingredient: &ExtendedIngredient) -> Self {
        let metric = ingredient.measures.as_ref().and_then(|m| m.metric.as_ref());
        RecipeIngredient {
            name: ingredient.name.clone(),
            metric_amount: metric.and_then(|m| m.amount).unwrap_or(0.0),
            metric_unit: metric
                .and_then(|m| m.unit_short.clone())
                .unwrap_or_default(),
        }
    }
}
