// Command routing and dispatch

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ghostline_common::init_logging;
use ghostline_config::{AppConfig, ConfigManager, ConfigManagerTrait};
use tracing::debug;

use crate::commands::*;
use crate::error::{CliError, CliResult};

/// Ghostline - inline code completion backed by a local Ollama server
#[derive(Parser, Debug)]
#[command(name = "ghostline")]
#[command(bin_name = "ghostline")]
#[command(about = "Inline code completion backed by a local Ollama server")]
#[command(
    long_about = "Ghostline: inline code completion backed by a local Ollama server.\n\nEditors talk to 'ghostline serve' over stdio using newline-delimited JSON.\nThe other commands are handy for scripting and troubleshooting."
)]
#[command(version)]
#[command(author = "Ghostline Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (default: <config dir>/ghostline/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the editor bridge on stdin/stdout
    #[command(about = "Serve completion requests from an editor over stdio")]
    Serve,

    /// Print a suggestion for a caret position in a file
    #[command(about = "Print one suggestion for a caret position in a file")]
    Complete {
        /// File to complete in
        #[arg(long, value_name = "FILE")]
        file: PathBuf,

        /// Caret offset in characters
        #[arg(long)]
        offset: usize,
    },

    /// Check that the Ollama server is reachable
    #[command(about = "Check that the Ollama server is reachable")]
    Ping,

    /// Manage configuration settings
    #[command(about = "View and manage ghostline configuration")]
    Config {
        #[command(subcommand)]
        action: ConfigSubcommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigSubcommand {
    /// Print the effective configuration
    Show,
    /// Persist the model used for completions
    SetModel {
        /// Model name, e.g. codellama:7b-code
        #[arg(value_name = "MODEL")]
        model: String,
    },
}

/// Command router
pub struct CommandRouter;

impl CommandRouter {
    /// Parse CLI arguments and execute the command
    pub async fn route() -> CliResult<()> {
        let cli = Cli::parse();
        Self::execute(cli).await
    }

    /// Execute a parsed command line
    pub async fn execute(cli: Cli) -> CliResult<()> {
        let manager = match &cli.config {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new(),
        };

        // Editing the configuration must work even when the current file is invalid
        if let Commands::Config {
            action: ConfigSubcommand::SetModel { model },
        } = &cli.command
        {
            return ConfigCommand::new(manager, ConfigAction::SetModel(model.clone()))
                .execute()
                .await;
        }

        let config = manager.load_config()?;
        Self::init_logging(&config, cli.verbose)?;
        debug!("Loaded configuration from {}", manager.config_path().display());

        let command: Box<dyn Command> = match cli.command {
            Commands::Serve => Box::new(ServeCommand::new(config, manager)),
            Commands::Complete { file, offset } => {
                Box::new(CompleteCommand::new(config, file, offset))
            }
            Commands::Ping => Box::new(PingCommand::new(config)),
            Commands::Config { action } => {
                let action = match action {
                    ConfigSubcommand::Show => ConfigAction::Show,
                    ConfigSubcommand::SetModel { model } => ConfigAction::SetModel(model),
                };
                Box::new(ConfigCommand::new(manager, action))
            }
        };

        command.execute().await
    }

    fn init_logging(config: &AppConfig, verbose: bool) -> CliResult<()> {
        let level = if verbose {
            "debug"
        } else {
            config.logging.level.as_str()
        };
        init_logging(level, config.logging.debug || verbose)
            .map_err(|e| CliError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["ghostline", "serve"]).unwrap();
        assert_eq!(cli.command, Commands::Serve);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_complete() {
        let cli =
            Cli::try_parse_from(["ghostline", "complete", "--file", "main.rs", "--offset", "42"])
                .unwrap();
        assert_eq!(
            cli.command,
            Commands::Complete {
                file: PathBuf::from("main.rs"),
                offset: 42
            }
        );
    }

    #[test]
    fn test_parse_config_set_model_with_global_flag() {
        let cli = Cli::try_parse_from([
            "ghostline",
            "config",
            "set-model",
            "starcoder2:3b",
            "--config",
            "/tmp/ghostline.toml",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::Config {
                action: ConfigSubcommand::SetModel {
                    model: "starcoder2:3b".to_string()
                }
            }
        );
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ghostline.toml")));
    }

    #[test]
    fn test_negative_offset_rejected() {
        assert!(Cli::try_parse_from(["ghostline", "complete", "--file", "a", "--offset", "-1"]).is_err());
    }

    #[test]
    fn test_command_required() {
        assert!(Cli::try_parse_from(["ghostline"]).is_err());
    }
}
