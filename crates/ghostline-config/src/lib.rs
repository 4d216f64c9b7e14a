//! Ghostline Configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file in the
//! user's config directory, then `GHOSTLINE_*` environment variables.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::{ConfigManager, ENV_PREFIX};
pub use types::{
    AppConfig, CacheSettings, ConfigManager as ConfigManagerTrait, LoggingSettings,
    OllamaSettings,
};
