use crate::error::RecipeError;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Upstream recipe API settings
    #[serde(default)]
    pub spoonacular: SpoonacularConfig,
    /// Search defaults and limits
    #[serde(default)]
    pub search: SearchConfig,
    /// Favorites storage
    #[serde(default)]
    pub favorites: FavoritesConfig,
}

/// Configuration for the Spoonacular API
#[derive(Debug, Deserialize, Clone)]
pub struct SpoonacularConfig {
    /// API key (can also be set via SPOONACULAR_API_KEY)
    pub api_key: Option<String>,
    /// Base URL, overridable for proxies and tests
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Number of results requested upstream per search; pagination slices these
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

impl Default for SpoonacularConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout: default_timeout(),
            batch_size: default_batch_size(),
        }
    }
}

impl SpoonacularConfig {
    /// API key from config, falling back to the SPOONACULAR_API_KEY environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("SPOONACULAR_API_KEY").ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Configuration for search pagination and result shaping
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Page size used when a query does not ask for one
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
    /// Image used when a recipe has none
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            placeholder_image: default_placeholder_image(),
        }
    }
}

impl SearchConfig {
    /// Page size for a query: the requested one or `default_limit`, which
    /// must lie in `1..=max_limit`
    pub fn page_limit(&self, requested: Option<usize>) -> Result<usize, RecipeError> {
        let limit = requested.unwrap_or(self.default_limit);
        if limit == 0 || limit > self.max_limit {
            return Err(RecipeError::Validation(format!(
                "limit must be between 1 and {}",
                self.max_limit
            )));
        }
        Ok(limit)
    }
}

/// Configuration for favorites storage
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FavoritesConfig {
    /// JSON file backing the favorites list; in-memory when unset
    pub path: Option<PathBuf>,
}

// Default value functions
fn default_base_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_batch_size() -> u32 {
    20
}

fn default_limit() -> usize {
    10
}

fn default_max_limit() -> usize {
    50
}

fn default_placeholder_image() -> String {
    "https://via.placeholder.com/312x231".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__SPOONACULAR__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPES__SPOONACULAR__API_KEY
        .add_source(
            Environment::with_prefix("RECIPES")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
