// Error types for the caravan-settings crate.
// Covers settings API failures, cache storage failures, and configuration problems.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings API error: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("authentication failed: invalid or expired API token")]
    Unauthorized,

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("settings rejected by the API: {message}")]
    Validation { message: String },

    #[error("missing CARAVAN_API_URL environment variable")]
    MissingApiUrl,

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SettingsError>;
