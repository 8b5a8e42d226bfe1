use thiserror::Error;

/// Errors that abort a chat request before any generation is attempted
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Listings unavailable: {0}")]
    DataUnavailable(String),
}

impl From<sqlx::Error> for ChatError {
    fn from(err: sqlx::Error) -> Self {
        ChatError::DataUnavailable(err.to_string())
    }
}

/// Startup-time configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}
