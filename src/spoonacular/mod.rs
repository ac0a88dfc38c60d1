pub mod types;

use crate::config::SpoonacularConfig;
use crate::error::{RecipeError, Result};
use crate::search::{IngredientQuery, NutrientBounds};
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use self::types::{ComplexSearchHit, ComplexSearchResponse, IngredientSearchHit, NutritionWidget};

const USER_AGENT: &str = "Mozilla/5.0 (compatible; RecipeFinder/0.1)";

/// What a `complexSearch` request filters on.
#[derive(Debug, Clone, Default)]
pub struct ComplexSearch {
    pub query: Option<String>,
    pub bounds: Option<NutrientBounds>,
    pub dish_type: Option<String>,
}

/// Thin async client for the Spoonacular recipe API.
///
/// The API key is only required once a request is made, so a client can be
/// built before configuration is complete.
pub struct SpoonacularClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    batch_size: u32,
}

impl SpoonacularClient {
    /// Create a new client from configuration
    pub fn new(config: &SpoonacularConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            api_key: config.resolve_api_key(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            batch_size: config.batch_size,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: Some(api_key.into()),
            base_url: base_url.into(),
            batch_size: 20,
        }
    }

    /// `GET /recipes/findByIngredients`, one batch from offset 0.
    pub async fn find_by_ingredients(
        &self,
        query: &IngredientQuery,
    ) -> Result<Vec<IngredientSearchHit>> {
        let params = vec![
            ("ingredients", query.ingredient_param()),
            ("number", self.batch_size.to_string()),
            ("offset", "0".to_string()),
            ("ranking", query.ranking.as_param().to_string()),
            ("ignorePantry", query.ignore_pantry.to_string()),
        ];
        let response = self.get("/recipes/findByIngredients", &params).await?;
        search_body(response).await
    }

    /// `GET /recipes/complexSearch` with recipe information and nutrition attached.
    pub async fn complex_search(&self, search: &ComplexSearch) -> Result<Vec<ComplexSearchHit>> {
        let mut params = vec![
            ("number", self.batch_size.to_string()),
            ("offset", "0".to_string()),
            ("addRecipeInformation", "true".to_string()),
            ("addRecipeNutrition", "true".to_string()),
        ];
        if let Some(query) = &search.query {
            params.push(("query", query.clone()));
        }
        if let Some(bounds) = &search.bounds {
            params.extend(bounds.params().map(|(name, value)| (name, value.to_string())));
        }
        if let Some(dish_type) = &search.dish_type {
            params.push(("type", dish_type.clone()));
        }

        let response = self.get("/recipes/complexSearch", &params).await?;
        let body: ComplexSearchResponse = search_body(response).await?;
        Ok(body.results)
    }

    /// `GET /recipes/{id}/information` as the raw JSON record.
    pub async fn information(&self, id: u64, include_nutrition: bool) -> Result<Value> {
        let params = vec![("includeNutrition", include_nutrition.to_string())];
        let response = self
            .get(&format!("/recipes/{id}/information"), &params)
            .await?;
        lookup_body(id, response).await
    }

    /// `GET /recipes/{id}/nutritionWidget.json`
    pub async fn nutrition_widget(&self, id: u64) -> Result<NutritionWidget> {
        let response = self
            .get(&format!("/recipes/{id}/nutritionWidget.json"), &[])
            .await?;
        lookup_body(id, response).await
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Response> {
        let api_key = self.api_key.as_deref().ok_or(RecipeError::MissingApiKey)?;
        debug!("GET {}{} {:?}", self.base_url, path, params);

        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&[("apiKey", api_key)])
            .query(params)
            .send()
            .await?;
        Ok(response)
    }
}

/// Search endpoints report failures as upstream errors.
async fn search_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RecipeError::Upstream {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

/// Lookups by id report any failure as the recipe not being found.
async fn lookup_body<T: DeserializeOwned>(id: u64, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        debug!("lookup of recipe {} failed with {}", id, status);
        return Err(RecipeError::NotFound {
            id,
            status: status.as_u16(),
        });
    }
    Ok(response.json().await?)
}
