//! Core configuration types

use std::time::Duration;

use ghostline_cache::CacheConfig;
use ghostline_local_models::{GenerationConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Backend model identifier
    pub model: String,
    /// Ollama connection settings
    pub ollama: OllamaSettings,
    /// Suggestion cache settings
    pub cache: CacheSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Ollama connection and sampling settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OllamaSettings {
    /// Server URL
    pub base_url: String,
    /// Per-attempt generation timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Liveness probe timeout in milliseconds
    pub probe_timeout_ms: u64,
    /// Generation attempts per request
    pub max_attempts: u32,
    /// Sampling temperature
    pub temperature: f64,
}

/// Suggestion cache settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum number of cached suggestions
    pub max_entries: usize,
    /// Seconds an untouched suggestion stays cached
    pub idle_timeout_secs: u64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// One of trace, debug, info, warn, error
    pub level: String,
    /// Decorate events with target, thread, file and line
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            ollama: OllamaSettings::default(),
            cache: CacheSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 4000,
            probe_timeout_ms: 2000,
            max_attempts: 4,
            temperature: 0.4,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            idle_timeout_secs: 600,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            debug: false,
        }
    }
}

impl OllamaSettings {
    /// Settings for the generation client
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            base_url: self.base_url.clone(),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
            max_attempts: self.max_attempts,
            temperature: self.temperature as f32,
        }
    }
}

impl CacheSettings {
    /// Settings for the suggestion cache
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            max_entries: self.max_entries,
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
        }
    }
}

/// Configuration manager trait
pub trait ConfigManager {
    /// Load configuration from every layer
    fn load_config(&self) -> Result<AppConfig, crate::error::ConfigError>;
    /// Save configuration to the config file
    fn save_config(&self, config: &AppConfig) -> Result<(), crate::error::ConfigError>;
    /// Validate configuration
    fn validate_config(&self, config: &AppConfig) -> Result<(), crate::error::ConfigError>;
}
