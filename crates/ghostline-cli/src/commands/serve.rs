//! Serve command - run the editor bridge over stdio

use std::sync::Arc;

use async_trait::async_trait;
use ghostline_common::{StatusBoard, StatusSink};
use ghostline_config::{AppConfig, ConfigManager};
use tokio::io::BufReader;
use tracing::info;

use crate::bridge::EditorBridge;
use crate::commands::Command;
use crate::error::CliResult;
use crate::pipeline::build_orchestrator;

/// Serve command handler
pub struct ServeCommand {
    config: AppConfig,
    manager: ConfigManager,
}

impl ServeCommand {
    /// `manager` persists model switches requested by the editor
    pub fn new(config: AppConfig, manager: ConfigManager) -> Self {
        Self { config, manager }
    }
}

#[async_trait]
impl Command for ServeCommand {
    async fn execute(&self) -> CliResult<()> {
        let board = Arc::new(StatusBoard::new());
        let sink: Arc<dyn StatusSink> = board.clone();
        let orchestrator = build_orchestrator(&self.config, sink)?;

        info!(
            "Serving completions with {} via {}",
            self.config.model, self.config.ollama.base_url
        );

        let bridge =
            EditorBridge::new(orchestrator, board).with_config_manager(self.manager.clone());
        bridge
            .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await?;

        info!("Editor bridge stopped");
        Ok(())
    }
}
