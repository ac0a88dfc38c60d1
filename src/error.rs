use thiserror::Error;

/// Errors that can occur while searching recipes or managing favorites
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Transport-level failure talking to Spoonacular
    #[error("Failed to reach Spoonacular: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Spoonacular answered a search with a non-success status
    #[error("Failed to fetch recipes from Spoonacular (status: {status}, body: {body})")]
    Upstream { status: u16, body: String },

    /// Spoonacular has no recipe (or nutrition data) under this id
    #[error("Recipe not found (Spoonacular API returned status {status})")]
    NotFound { id: u64, status: u16 },

    /// Request parameters failed validation
    #[error("Invalid request: {0}")]
    Validation(String),

    /// No API key in config or environment
    #[error("Spoonacular API key is not configured")]
    MissingApiKey,

    /// Favorite to remove does not exist for this user
    #[error("Favorite not found: {0}")]
    FavoriteNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Favorites file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Favorites file or upstream payload was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RecipeError {
    /// HTTP status a web front end should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RecipeError::Validation(_) => 400,
            RecipeError::NotFound { .. } | RecipeError::FavoriteNotFound(_) => 404,
            RecipeError::Fetch(_) | RecipeError::Upstream { .. } => 502,
            RecipeError::MissingApiKey
            | RecipeError::Config(_)
            | RecipeError::Io(_)
            | RecipeError::Json(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecipeError>;
