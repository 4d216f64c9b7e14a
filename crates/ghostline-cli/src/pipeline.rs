//! Wiring of the completion pipeline from configuration

use std::sync::Arc;

use ghostline_cache::SuggestionCache;
use ghostline_common::StatusSink;
use ghostline_completion::CompletionOrchestrator;
use ghostline_config::AppConfig;
use ghostline_local_models::OllamaClient;
use ghostline_stats::UsageStatistics;
use tracing::debug;

use crate::error::CliResult;

/// Build an orchestrator with a fresh cache and fresh statistics
pub fn build_orchestrator(
    config: &AppConfig,
    sink: Arc<dyn StatusSink>,
) -> CliResult<CompletionOrchestrator> {
    let client = OllamaClient::new(
        config.ollama.generation_config(),
        config.model.clone(),
        sink.clone(),
    )?;
    debug!(
        "Using model {} at {}",
        config.model,
        client.base_url()
    );

    Ok(CompletionOrchestrator::new(
        Arc::new(SuggestionCache::with_config(config.cache.cache_config())),
        Arc::new(UsageStatistics::new()),
        Arc::new(client),
        sink,
    ))
}
