//! Shared fixtures for the cross-crate test suites in `tests/`

use std::sync::Arc;

use ghostline_cache::SuggestionCache;
use ghostline_common::{StatusBoard, StatusSink};
use ghostline_completion::CompletionOrchestrator;
use ghostline_config::AppConfig;
use ghostline_local_models::{GenerationError, OllamaClient};
use ghostline_stats::UsageStatistics;

/// A fully wired pipeline talking to a real HTTP endpoint
pub struct TestPipeline {
    pub orchestrator: CompletionOrchestrator,
    pub board: Arc<StatusBoard>,
    pub cache: Arc<SuggestionCache>,
    pub stats: Arc<UsageStatistics>,
}

/// Configuration pointed at `base_url` with timeouts short enough for tests
pub fn test_config(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.ollama.base_url = base_url.to_string();
    config.ollama.request_timeout_ms = 100;
    config.ollama.probe_timeout_ms = 500;
    config
}

/// Build the production pipeline from `config`, reporting into a status board
pub fn pipeline(config: &AppConfig) -> Result<TestPipeline, GenerationError> {
    let board = Arc::new(StatusBoard::new());
    let sink: Arc<dyn StatusSink> = board.clone();
    let client = OllamaClient::new(
        config.ollama.generation_config(),
        config.model.clone(),
        sink.clone(),
    )?;
    let cache = Arc::new(SuggestionCache::with_config(config.cache.cache_config()));
    let stats = Arc::new(UsageStatistics::new());
    let orchestrator =
        CompletionOrchestrator::new(cache.clone(), stats.clone(), Arc::new(client), sink);

    Ok(TestPipeline {
        orchestrator,
        board,
        cache,
        stats,
    })
}

/// Poll `condition` every few milliseconds, panicking after about two seconds
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..400 {
        if condition() {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!("condition not met in time");
}
