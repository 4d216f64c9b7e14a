//! # Ghostline Completion
//!
//! The suggestion pipeline behind inline (ghost text) completions.
//!
//! ## Flow
//!
//! 1. The [position gate](gate::should_skip) rejects caret positions where a
//!    suggestion would only get in the way
//! 2. The text is split around the caret into a [`RequestContext`]
//! 3. The suggestion cache is consulted with the full prefix, then with the
//!    prefix's last line
//! 4. On a miss the generation client is called and its answer cached
//! 5. The answer is shaped by the adaptive formatter and delivered through a
//!    [`SuggestionHandle`]
//! 6. The suggestion that would follow acceptance is prefetched in the
//!    background
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ghostline_cache::SuggestionCache;
//! use ghostline_common::TracingStatusSink;
//! use ghostline_completion::CompletionOrchestrator;
//! use ghostline_local_models::OllamaClient;
//! use ghostline_stats::UsageStatistics;
//!
//! let sink = Arc::new(TracingStatusSink);
//! let client = Arc::new(OllamaClient::with_default_endpoint(sink.clone())?);
//! let orchestrator = CompletionOrchestrator::new(
//!     Arc::new(SuggestionCache::new()),
//!     Arc::new(UsageStatistics::new()),
//!     client,
//!     sink,
//! );
//!
//! let suggestion = orchestrator.get_suggestion("let total = items.", 17).await;
//! ```

pub mod context;
pub mod engine;
pub mod events;
pub mod gate;

pub use context::RequestContext;
pub use engine::{CompletionOrchestrator, SuggestionHandle};
pub use events::CompletionEvent;
pub use gate::should_skip;
