//! Ghostline command-line interface
//!
//! Hosts the completion pipeline for editors: `ghostline serve` speaks a
//! newline-delimited JSON protocol over stdio, and the remaining commands
//! offer one-shot access for scripting and troubleshooting.

pub mod bridge;
pub mod commands;
pub mod error;
pub mod pipeline;
pub mod router;

pub use error::{CliError, CliResult};
