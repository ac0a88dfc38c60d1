use std::time::Duration;

use crate::config::AppConfig;
use crate::error::{RecipeError, Result};
use crate::service::RecipeService;
use crate::spoonacular::SpoonacularClient;

/// Builder for configuring a [`RecipeService`]
#[derive(Debug, Default)]
pub struct RecipeFinderBuilder {
    config: AppConfig,
}

impl RecipeFinderBuilder {
    /// Start from an already loaded configuration
    ///
    /// # Example
    /// ```
    /// use recipe_finder::{AppConfig, RecipeFinder};
    ///
    /// let builder = RecipeFinder::builder().config(AppConfig::default());
    /// ```
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the Spoonacular API key
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let builder = RecipeFinder::builder().api_key("your-api-key");
    /// ```
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.spoonacular.api_key = Some(key.into());
        self
    }

    /// Point the client at a different Spoonacular endpoint (proxy, mock server)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.spoonacular.base_url = url.into();
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeFinder::builder().timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.config.spoonacular.timeout = duration.as_secs().max(1);
        self
    }

    /// Number of recipes fetched upstream per search; results are paginated within it
    pub fn batch_size(mut self, size: u32) -> Self {
        self.config.spoonacular.batch_size = size;
        self
    }

    /// Page size for searches that do not ask for one
    pub fn default_limit(mut self, limit: usize) -> Self {
        self.config.search.default_limit = limit;
        self
    }

    /// Largest page size a search may ask for
    pub fn max_limit(mut self, limit: usize) -> Self {
        self.config.search.max_limit = limit;
        self
    }

    /// Image URL used for recipes that have none
    pub fn placeholder_image(mut self, url: impl Into<String>) -> Self {
        self.config.search.placeholder_image = url.into();
        self
    }

    /// Build the service
    ///
    /// # Errors
    /// Returns `RecipeError` if:
    /// - The batch size or page limit is zero
    /// - The default page size is zero or above the page limit
    /// - The HTTP client cannot be created
    ///
    /// A missing API key is only reported when a request is made.
    pub fn build(self) -> Result<RecipeService> {
        if self.config.spoonacular.batch_size == 0 {
            return Err(RecipeError::Validation(
                "batch size must be at least 1".to_string(),
            ));
        }
        if self.config.search.max_limit == 0 {
            return Err(RecipeError::Validation(
                "max limit must be at least 1".to_string(),
            ));
        }
        self.config.search.page_limit(None)?;

        let client = SpoonacularClient::new(&self.config.spoonacular)?;
        Ok(RecipeService::new(client, self.config.search))
    }
}

/// Main entry point for the builder API
pub struct RecipeFinder;

impl RecipeFinder {
    /// Creates a new builder for a recipe service
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeFinder;
    ///
    /// let service = RecipeFinder::builder().api_key("key").build();
    /// assert!(service.is_ok());
    /// ```
    pub fn builder() -> RecipeFinderBuilder {
        RecipeFinderBuilder::default()
    }
}
