// Configuration management

use async_trait::async_trait;
use ghostline_config::{ConfigError, ConfigManager, ConfigManagerTrait};

use super::Command;
use crate::error::CliResult;

/// Manage configuration
pub struct ConfigCommand {
    manager: ConfigManager,
    action: ConfigAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Show,
    SetModel(String),
}

impl ConfigCommand {
    pub fn new(manager: ConfigManager, action: ConfigAction) -> Self {
        Self { manager, action }
    }

    /// Effective configuration rendered as TOML
    pub fn render(&self) -> CliResult<String> {
        let config = self.manager.load_config()?;
        let rendered = toml::to_string_pretty(&config).map_err(ConfigError::from)?;
        Ok(rendered)
    }

    fn show(&self) -> CliResult<()> {
        println!("# {}", self.manager.config_path().display());
        println!("{}", self.render()?);
        Ok(())
    }

    fn set_model(&self, model: &str) -> CliResult<()> {
        let config = self.manager.set_model(model)?;
        println!("Model set to {}", config.model);
        println!("Saved to {}", self.manager.config_path().display());
        Ok(())
    }
}

#[async_trait]
impl Command for ConfigCommand {
    async fn execute(&self) -> CliResult<()> {
        match &self.action {
            ConfigAction::Show => self.show(),
            ConfigAction::SetModel(model) => self.set_model(model),
        }
    }
}
