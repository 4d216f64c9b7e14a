// Command handlers for the ghostline CLI

pub mod complete;
pub mod config;
pub mod ping;
pub mod serve;

pub use complete::CompleteCommand;
pub use config::{ConfigAction, ConfigCommand};
pub use ping::PingCommand;
pub use serve::ServeCommand;

use crate::error::CliResult;

/// Trait for command handlers
#[async_trait::async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self) -> CliResult<()>;
}
