// CLI error types

use thiserror::Error;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get a user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            CliError::InvalidArgument { message } => {
                format!(
                    "Invalid argument: {}\n\nRun 'ghostline --help' for usage information.",
                    message
                )
            }
            CliError::Io(e) => format!("File operation failed: {}", e),
            CliError::Config(msg) => {
                format!(
                    "Configuration error: {}\n\nRun 'ghostline config show' to check your configuration.",
                    msg
                )
            }
            CliError::Backend(msg) => {
                format!(
                    "{}\n\nMake sure Ollama is running ('ollama serve') and the configured base URL is correct.",
                    msg
                )
            }
            CliError::Protocol(e) => format!("Malformed message: {}", e),
            CliError::Internal(msg) => {
                format!("Internal error: {}\n\nPlease report this issue.", msg)
            }
            CliError::Other(e) => format!("{:#}", e),
        }
    }
}

impl From<ghostline_config::ConfigError> for CliError {
    fn from(err: ghostline_config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<ghostline_local_models::GenerationError> for CliError {
    fn from(err: ghostline_local_models::GenerationError) -> Self {
        CliError::Backend(err.to_string())
    }
}

pub type CliResult<T> = Result<T, CliError>;
