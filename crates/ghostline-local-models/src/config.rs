//! Generation client settings

use std::time::Duration;

/// Model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "codellama:7b-code";

/// Address of a locally running Ollama server
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default per-attempt generation timeout (4 seconds)
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 4000;

/// Default liveness probe timeout (2 seconds)
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2000;

const DEFAULT_MAX_ATTEMPTS: u32 = 4;

const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Connection and sampling settings for [`OllamaClient`](crate::OllamaClient)
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    /// Ollama server URL (e.g., "http://localhost:11434")
    pub base_url: String,
    /// Timeout applied to each generation attempt
    pub request_timeout: Duration,
    /// Timeout for the liveness probe
    pub probe_timeout: Duration,
    /// Attempts made before giving up on timeouts or blank output
    pub max_attempts: u32,
    /// Sampling temperature sent with every request
    pub temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl GenerationConfig {
    /// Defaults pointed at a different server
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
