//! Logging initialization
//!
//! Library crates only emit `tracing` events. Binaries call [`init_logging`]
//! once at startup. Output always goes to stderr so stdout stays free for the
//! editor bridge protocol.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the global subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Parse a log level name, falling back to INFO for unknown names
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` takes precedence over `level` when it is set. With `debug`
/// enabled every event also carries its target, thread id, file and line.
pub fn init_logging(level: &str, debug: bool) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_level(level).as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_thread_ids(debug)
        .with_file(debug)
        .with_line_number(debug)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))
}
