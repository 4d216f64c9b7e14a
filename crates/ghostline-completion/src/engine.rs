//! Completion orchestrator
//!
//! This module ties the suggestion pipeline together: position gating, cache
//! lookup, generation on a miss, statistics, adaptive formatting and the
//! background prefetch of the suggestion that would follow acceptance.
//!
//! # Request lifecycle
//!
//! ```text
//! START -> CACHE_LOOKUP -> HIT  -> FORMAT -> EMIT
//!                       -> MISS -> GENERATE -> EMPTY -> EMIT
//!                                           -> VALUE -> CACHE_STORE -> FORMAT -> EMIT
//! EMIT -> PREFETCH (detached) -> DONE
//! ```
//!
//! Each request runs on its own tokio task and reports through a
//! [`SuggestionHandle`]. Dropping the handle abandons the result but not the
//! work: the cache is still populated and the completion is still counted.
//!
//! # Example
//!
//! ```ignore
//! let handle = orchestrator.get_suggestion(text, caret_offset);
//! let suggestion = handle.await;
//! if user_accepted {
//!     orchestrator.on_accepted();
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use ghostline_cache::{SuggestionCache, EMPTY};
use ghostline_common::StatusSink;
use ghostline_local_models::GenerationClient;
use ghostline_stats::{AdaptiveFormatter, StatsReport, UsageStatistics};
use tokio::sync::{oneshot, RwLock};
use tracing::{debug, info, trace};

use crate::context::RequestContext;
use crate::events::CompletionEvent;
use crate::gate::should_skip;

/// Pending suggestion for a single request
///
/// Resolves to the suggestion text; an empty string means there is nothing
/// to offer. Dropping the handle cancels nothing on the producing side.
#[derive(Debug)]
pub struct SuggestionHandle {
    receiver: oneshot::Receiver<String>,
}

impl SuggestionHandle {
    fn channel() -> (oneshot::Sender<String>, Self) {
        let (sender, receiver) = oneshot::channel();
        (sender, Self { receiver })
    }
}

impl Future for SuggestionHandle {
    type Output = String;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // A sender dropped without sending reads as "no suggestion"
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.unwrap_or_default())
    }
}

/// State shared between the orchestrator, its request tasks and prefetches
struct Pipeline {
    cache: Arc<SuggestionCache>,
    stats: Arc<UsageStatistics>,
    formatter: AdaptiveFormatter,
    client: Arc<dyn GenerationClient>,
    sink: Arc<dyn StatusSink>,
    /// Held for reading while a request touches the cache or the client, and
    /// for writing while the model is switched.
    model_lock: RwLock<()>,
}

/// Coordinates everything needed to answer a suggestion request
///
/// Cloning is cheap; clones share the cache, statistics and client.
///
/// All request methods spawn tokio tasks and must be called from within a
/// tokio runtime.
#[derive(Clone)]
pub struct CompletionOrchestrator {
    pipeline: Arc<Pipeline>,
}

impl CompletionOrchestrator {
    /// Create an orchestrator over shared components
    ///
    /// # Arguments
    ///
    /// * `cache` - Suggestion cache, cleared whenever the model changes
    /// * `stats` - Usage statistics, also driving the adaptive formatter
    /// * `client` - Generation backend used on cache misses and for prefetch
    /// * `sink` - Receives cache hit and miss counts
    pub fn new(
        cache: Arc<SuggestionCache>,
        stats: Arc<UsageStatistics>,
        client: Arc<dyn GenerationClient>,
        sink: Arc<dyn StatusSink>,
    ) -> Self {
        let formatter = AdaptiveFormatter::new(stats.clone());
        Self {
            pipeline: Arc::new(Pipeline {
                cache,
                stats,
                formatter,
                client,
                sink,
                model_lock: RwLock::new(()),
            }),
        }
    }

    /// Whether `event` should produce a suggestion
    ///
    /// Document edits pass through the position gate, explicit requests are
    /// always served and every other event is ignored.
    pub fn is_enabled(&self, event: &CompletionEvent) -> bool {
        match event {
            CompletionEvent::DocumentChange { text, offset } => !should_skip(text, *offset),
            CompletionEvent::DirectCall { .. } => true,
            CompletionEvent::LookupChange | CompletionEvent::CaretMove { .. } => false,
        }
    }

    /// Start a request for an editor event, or return `None` if the event
    /// should not produce a suggestion
    pub fn handle_event(&self, event: &CompletionEvent) -> Option<SuggestionHandle> {
        if !self.is_enabled(event) {
            trace!("Ignoring {:?}", event);
            return None;
        }
        event
            .request()
            .map(|(text, offset)| self.get_suggestion(text, offset))
    }

    /// Start a suggestion request for the caret at `offset` in `text`
    pub fn get_suggestion(&self, text: &str, offset: usize) -> SuggestionHandle {
        let started = Instant::now();
        let context = RequestContext::new(text, offset);
        let (sender, handle) = SuggestionHandle::channel();
        let pipeline = Arc::clone(&self.pipeline);

        tokio::spawn(async move {
            let suggestion = pipeline.resolve(&context).await;

            if !suggestion.trim().is_empty() {
                let next_prefix = format!("{}{}", context.prefix(), suggestion);
                pipeline.spawn_prefetch(next_prefix, context.suffix().to_string());
            }

            if sender.send(suggestion).is_err() {
                trace!("Suggestion receiver dropped before delivery");
            }
            pipeline
                .stats
                .record_completion(started.elapsed().as_millis() as u64);
        });

        handle
    }

    /// Record that the user accepted the last suggestion
    pub fn on_accepted(&self) {
        self.pipeline.stats.record_success();
    }

    /// Switch the generation model and drop every cached suggestion
    ///
    /// Waits for in-flight requests to finish with the old model, so nothing
    /// generated by the old model lands in the cleared cache.
    pub async fn set_model(&self, model: &str) {
        let _guard = self.pipeline.model_lock.write().await;
        self.pipeline.client.set_model(model);
        self.pipeline.cache.clear();
        info!("Model switched to {}; suggestion cache cleared", model);
    }

    /// Currently selected model
    pub fn model(&self) -> String {
        self.pipeline.client.model()
    }

    pub fn cache(&self) -> &Arc<SuggestionCache> {
        &self.pipeline.cache
    }

    pub fn statistics(&self) -> &Arc<UsageStatistics> {
        &self.pipeline.stats
    }

    /// Summary of the current statistics
    pub fn report(&self) -> StatsReport {
        StatsReport::from(self.pipeline.stats.snapshot())
    }

    /// Whether the generation backend is reachable
    pub async fn is_backend_reachable(&self) -> bool {
        self.pipeline.client.is_reachable().await
    }
}

impl std::fmt::Debug for CompletionOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionOrchestrator")
            .field("cache", &self.pipeline.cache)
            .field("stats", &self.pipeline.stats.snapshot())
            .finish()
    }
}

impl Pipeline {
    /// Produce the formatted suggestion for one request
    async fn resolve(&self, context: &RequestContext) -> String {
        let _guard = self.model_lock.read().await;

        if let Some(cached) = self.lookup(context) {
            return self.formatter.format_if_needed(&cached);
        }

        let misses = self.stats.record_cache_miss();
        self.sink.update_cache_misses(misses);

        match self.client.call(context.prefix(), context.suffix()).await {
            Some(generated) => {
                for key in context.lookup_keys() {
                    if !key.trim().is_empty() {
                        self.cache.put(key, generated.as_str());
                    }
                }
                self.formatter.format_if_needed(&generated)
            }
            None => {
                debug!("No suggestion generated");
                String::new()
            }
        }
    }

    /// Cached value for the first lookup key present in the cache
    fn lookup(&self, context: &RequestContext) -> Option<String> {
        let key = context
            .lookup_keys()
            .into_iter()
            .find(|key| self.cache.contains(key))?;

        let hits = self.stats.record_cache_hit();
        self.sink.update_cache_hits(hits);
        trace!("Cache hit");

        let value = self.cache.get(key);
        if value == EMPTY {
            Some(String::new())
        } else {
            Some(value)
        }
    }

    /// Generate and cache the suggestion that follows `prefix` in the background
    fn spawn_prefetch(self: &Arc<Self>, prefix: String, suffix: String) {
        let pipeline = Arc::clone(self);
        tokio::spawn(async move {
            let _guard = pipeline.model_lock.read().await;
            if pipeline.cache.contains(&prefix) {
                return;
            }
            match pipeline.client.call(&prefix, &suffix).await {
                Some(next) if !next.trim().is_empty() => {
                    trace!("Prefetched follow-up suggestion");
                    pipeline.cache.put(&prefix, next);
                }
                _ => trace!("Nothing to prefetch"),
            }
        });
    }
}
