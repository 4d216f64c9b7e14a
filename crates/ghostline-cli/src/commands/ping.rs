//! Ping command - check that the Ollama server is reachable

use std::sync::Arc;

use async_trait::async_trait;
use ghostline_common::NoopStatusSink;
use ghostline_config::AppConfig;
use ghostline_local_models::{GenerationClient, OllamaClient};

use crate::commands::Command;
use crate::error::{CliError, CliResult};

/// Ping command handler
pub struct PingCommand {
    config: AppConfig,
}

impl PingCommand {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Probe the configured server, returning its URL when it answers
    pub async fn probe(&self) -> CliResult<String> {
        let client = OllamaClient::new(
            self.config.ollama.generation_config(),
            self.config.model.clone(),
            Arc::new(NoopStatusSink),
        )?;

        if client.is_reachable().await {
            Ok(client.base_url().to_string())
        } else {
            Err(CliError::Backend(format!(
                "Ollama server is not reachable at {}",
                client.base_url()
            )))
        }
    }
}

#[async_trait]
impl Command for PingCommand {
    async fn execute(&self) -> CliResult<()> {
        let url = self.probe().await?;
        println!("Ollama server at {} is reachable (model: {})", url, self.config.model);
        Ok(())
    }
}
