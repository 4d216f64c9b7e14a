//! Local generation backend for Ghostline
//!
//! This crate talks to an Ollama server: it probes liveness, builds
//! fill-in-the-middle prompts, retries timed-out generations and cleans up
//! the raw model output.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;

pub use client::{GenerationClient, OllamaClient};
pub use config::{GenerationConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::GenerationError;
pub use models::{GenerateOptions, GenerateRequest, GenerateResponse};
pub use prompt::{build_fim_prompt, post_process};

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;
