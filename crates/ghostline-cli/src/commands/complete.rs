//! Complete command - one suggestion for a caret position in a file

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use ghostline_common::TracingStatusSink;
use ghostline_completion::CompletionEvent;
use ghostline_config::AppConfig;

use crate::commands::Command;
use crate::error::{CliError, CliResult};
use crate::pipeline::build_orchestrator;

/// Complete command handler
pub struct CompleteCommand {
    config: AppConfig,
    file: PathBuf,
    offset: usize,
}

impl CompleteCommand {
    pub fn new(config: AppConfig, file: PathBuf, offset: usize) -> Self {
        Self {
            config,
            file,
            offset,
        }
    }

    /// Suggestion for the caret, or an empty string when there is none
    pub async fn suggest(&self) -> CliResult<String> {
        let text = std::fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read {}", self.file.display()))?;

        let length = text.chars().count();
        if self.offset >= length {
            return Err(CliError::InvalidArgument {
                message: format!(
                    "offset {} is past the end of {} ({} characters)",
                    self.offset,
                    self.file.display(),
                    length
                ),
            });
        }

        let orchestrator = build_orchestrator(&self.config, Arc::new(TracingStatusSink))?;
        let event = CompletionEvent::DirectCall {
            text,
            offset: self.offset,
        };
        match orchestrator.handle_event(&event) {
            Some(handle) => Ok(handle.await),
            None => Ok(String::new()),
        }
    }
}

#[async_trait]
impl Command for CompleteCommand {
    async fn execute(&self) -> CliResult<()> {
        let suggestion = self.suggest().await?;
        if !suggestion.is_empty() {
            println!("{}", suggestion);
        }
        Ok(())
    }
}
