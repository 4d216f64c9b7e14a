//! Generation client
//!
//! [`GenerationClient`] is the seam the completion engine depends on;
//! [`OllamaClient`] is the production implementation backed by an Ollama
//! server's `/api/generate` endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ghostline_common::{StatusSink, STATUS_OK, STATUS_UNREACHABLE};
use parking_lot::RwLock;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::{
    config::{GenerationConfig, DEFAULT_MODEL},
    error::GenerationError,
    models::{GenerateRequest, GenerateResponse},
    prompt::{build_fim_prompt, post_process},
    Result,
};

/// Default pool idle timeout (90 seconds)
const DEFAULT_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

/// Default TCP keep-alive interval (60 seconds)
const DEFAULT_TCP_KEEPALIVE_SECS: u64 = 60;

/// Produces completion text for the code around a caret
///
/// Implementations never fail a request: every problem is reported through
/// logging or the status sink and surfaces as `None`.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Whether the backend answers its liveness probe
    async fn is_reachable(&self) -> bool;

    /// Generate the text that belongs between `prefix` and `suffix`
    async fn call(&self, prefix: &str, suffix: &str) -> Option<String>;

    /// Switch the model used for subsequent calls
    fn set_model(&self, model: &str);

    /// Currently selected model
    fn model(&self) -> String;
}

/// Ollama-backed generation client
pub struct OllamaClient {
    client: Client,
    config: GenerationConfig,
    model: RwLock<String>,
    sink: Arc<dyn StatusSink>,
}

impl OllamaClient {
    /// Create a client for the given server and model
    ///
    /// # Errors
    /// Returns `Config` if the base URL is empty or the HTTP client cannot be built
    pub fn new(
        config: GenerationConfig,
        model: impl Into<String>,
        sink: Arc<dyn StatusSink>,
    ) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(GenerationError::Config(
                "Ollama base URL is required".to_string(),
            ));
        }

        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT_SECS))
            .tcp_keepalive(Duration::from_secs(DEFAULT_TCP_KEEPALIVE_SECS))
            .build()
            .map_err(|e| GenerationError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: GenerationConfig { base_url, ..config },
            model: RwLock::new(model.into()),
            sink,
        })
    }

    /// Create a client for a local Ollama server with the default model
    pub fn with_default_endpoint(sink: Arc<dyn StatusSink>) -> Result<Self> {
        Self::new(GenerationConfig::default(), DEFAULT_MODEL, sink)
    }

    /// Server URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Run one generation attempt and return the raw model output
    async fn generate_once(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest::new(model, prompt, self.config.temperature);

        let response = self
            .client
            .post(&url)
            .timeout(self.config.request_timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        Ok(parsed.response)
    }
}

#[async_trait]
impl GenerationClient for OllamaClient {
    async fn is_reachable(&self) -> bool {
        let url = format!("{}/", self.config.base_url);

        match self
            .client
            .get(&url)
            .timeout(self.config.probe_timeout)
            .send()
            .await
        {
            Ok(response) => {
                let healthy = response.status().is_success();
                if !healthy {
                    warn!("Ollama server health check failed: HTTP {}", response.status());
                }
                healthy
            }
            Err(e) => {
                debug!("Ollama server health check failed: {}", e);
                false
            }
        }
    }

    async fn call(&self, prefix: &str, suffix: &str) -> Option<String> {
        if !self.is_reachable().await {
            self.sink.update_status(STATUS_UNREACHABLE);
            return None;
        }
        self.sink.update_status(STATUS_OK);

        let model = self.model();
        let prompt = build_fim_prompt(prefix, suffix);

        for attempt in 1..=self.config.max_attempts {
            match self.generate_once(&model, &prompt).await {
                Ok(raw) => {
                    let suggestion = post_process(&raw);
                    if !suggestion.is_empty() {
                        debug!(attempt, "Generated {} chars with {}", suggestion.len(), model);
                        return Some(suggestion);
                    }
                    debug!(attempt, "Model returned a blank completion");
                }
                Err(e) if e.is_timeout() => {
                    debug!(attempt, "Generation attempt timed out: {}", e);
                }
                Err(e) => {
                    warn!("Generation failed: {}", e);
                    return None;
                }
            }
        }

        debug!(
            "No completion after {} attempts",
            self.config.max_attempts
        );
        None
    }

    fn set_model(&self, model: &str) {
        info!("Switching generation model to {}", model);
        *self.model.write() = model.to_string();
    }

    fn model(&self) -> String {
        self.model.read().clone()
    }
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("base_url", &self.config.base_url)
            .field("model", &*self.model.read())
            .finish()
    }
}
