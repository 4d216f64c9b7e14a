//! Error types for generation requests

use thiserror::Error;

/// Errors that can occur while talking to the generation backend
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GenerationError {
    /// Whether the failed attempt may be retried
    pub fn is_timeout(&self) -> bool {
        matches!(self, GenerationError::Timeout(_))
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GenerationError::Timeout(err.to_string())
        } else {
            GenerationError::Network(err.to_string())
        }
    }
}
