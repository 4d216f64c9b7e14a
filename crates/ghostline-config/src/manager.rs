//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::{debug, info};

use crate::{
    error::{ConfigError, Result},
    types::{AppConfig, ConfigManager as ConfigManagerTrait},
};

/// Prefix of environment variable overrides, e.g. `GHOSTLINE_OLLAMA__BASE_URL`
pub const ENV_PREFIX: &str = "GHOSTLINE";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration manager
#[derive(Debug, Clone)]
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    /// Create with custom config path
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: path,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Use a different environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get default config path
    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ghostline")
            .join("config.toml")
    }

    /// Persist a new model identifier
    ///
    /// Only the config file is rewritten; environment overrides are not baked
    /// into it.
    pub fn set_model(&self, model: &str) -> Result<AppConfig> {
        let mut config = self.load_file_config()?;
        config.model = model.trim().to_string();
        self.validate_config(&config)?;
        self.save_config(&config)?;
        info!("Model set to {}", config.model);
        Ok(config)
    }

    fn file_source(&self) -> File<config::FileSourceFile, config::FileFormat> {
        File::from(self.config_path.clone())
            .format(config::FileFormat::Toml)
            .required(false)
    }

    fn load_file_config(&self) -> Result<AppConfig> {
        let config = Config::builder().add_source(self.file_source()).build()?;
        Ok(config.try_deserialize()?)
    }
}

impl ConfigManagerTrait for ConfigManager {
    fn load_config(&self) -> Result<AppConfig> {
        debug!("Loading configuration from {}", self.config_path.display());

        let builder = Config::builder().add_source(self.file_source()).add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        self.validate_config(&app_config)?;
        Ok(app_config)
    }

    fn save_config(&self, config: &AppConfig) -> Result<()> {
        let toml = toml::to_string_pretty(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        debug!("Saved configuration to {}", self.config_path.display());
        Ok(())
    }

    fn validate_config(&self, config: &AppConfig) -> Result<()> {
        if config.model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Model must not be empty".to_string(),
            ));
        }
        if config.ollama.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Ollama base URL must not be empty".to_string(),
            ));
        }
        if config.ollama.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "Max attempts must be greater than 0".to_string(),
            ));
        }
        if config.ollama.request_timeout_ms == 0 || config.ollama.probe_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Timeouts must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&config.ollama.temperature) {
            return Err(ConfigError::Validation(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                config.ollama.temperature
            )));
        }
        if config.cache.max_entries == 0 {
            return Err(ConfigError::Validation(
                "Cache size must be greater than 0".to_string(),
            ));
        }
        if config.cache.idle_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Cache idle timeout must be greater than 0".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "Unknown log level: {}",
                config.logging.level
            )));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
