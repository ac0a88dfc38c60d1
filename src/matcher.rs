use crate::model::{IngredientMatch, RecipeIngredient};

/// Annotate each recipe ingredient with whether any user ingredient names it.
///
/// A recipe ingredient matches when some user ingredient, lower-cased, is a
/// substring of the lower-cased recipe ingredient name. This is deliberately
/// loose: "egg" matches "Eggplant". Output order follows `recipe_ingredients`.
pub fn match_ingredients<S: AsRef<str>>(
    user_ingredients: &[S],
    recipe_ingredients: &[RecipeIngredient],
) -> Vec<IngredientMatch> {
    let needles: Vec<String> = user_ingredients
        .iter()
        .map(|i| i.as_ref().to_lowercase())
        .collect();

    recipe_ingredients
        .iter()
        .map(|ingredient| {
            let name = ingredient.name.to_lowercase();
            IngredientMatch {
                ingredient: ingredient.name.clone(),
                matched: needles.iter().any(|needle| name.contains(needle.as_str())),
                metric_amount: ingredient.metric_amount,
                metric_unit: ingredient.metric_unit.clone(),
            }
        })
        .collect()
}

/// Split a comma-separated `ingredients` query value.
///
/// Pieces are kept verbatim, so an empty value yields `[""]`, which matches
/// every ingredient.
pub fn parse_ingredient_list(raw: &str) -> Vec<String> {
    raw.split(',').map(String::from).collect()
}
