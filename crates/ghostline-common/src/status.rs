//! Status reporting for the completion pipeline
//!
//! The pipeline never talks to a UI directly. It pushes backend status strings
//! and cache counters into a [`StatusSink`], and the host decides what to do
//! with them: log them, render a status bar, or drop them.

use parking_lot::RwLock;
use tracing::{debug, info};

/// Status reported when the generation backend answered its liveness probe
pub const STATUS_OK: &str = "OK";

/// Status reported when the generation backend could not be reached
pub const STATUS_UNREACHABLE: &str = "Ollama server is not reachable";

/// Status shown before the first request has been made
pub const STATUS_WAITING: &str = "waiting...";

/// Push interface for status and counter updates
///
/// Implementations must be cheap and must not block: they are called from
/// request tasks and background prefetch tasks alike.
pub trait StatusSink: Send + Sync {
    /// Publish the current backend status
    fn update_status(&self, status: &str);

    /// Publish the running number of cache hits
    fn update_cache_hits(&self, hits: u64);

    /// Publish the running number of cache misses
    fn update_cache_misses(&self, misses: u64);
}

/// Sink that discards every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStatusSink;

impl StatusSink for NoopStatusSink {
    fn update_status(&self, _status: &str) {}

    fn update_cache_hits(&self, _hits: u64) {}

    fn update_cache_misses(&self, _misses: u64) {}
}

/// Sink that forwards updates to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatusSink;

impl StatusSink for TracingStatusSink {
    fn update_status(&self, status: &str) {
        info!(status, "Backend status changed");
    }

    fn update_cache_hits(&self, hits: u64) {
        debug!(hits, "Cache hit");
    }

    fn update_cache_misses(&self, misses: u64) {
        debug!(misses, "Cache miss");
    }
}

#[derive(Debug, Clone)]
struct BoardState {
    status: String,
    cache_hits: u64,
    cache_misses: u64,
}

/// In-memory status widget state
///
/// Keeps the latest status and counters so a host can render them on demand,
/// e.g. in a status bar:
///
/// ```
/// use ghostline_common::{StatusBoard, StatusSink};
///
/// let board = StatusBoard::new();
/// board.update_status("OK");
/// board.update_cache_hits(3);
/// assert_eq!(
///     board.text(),
///     "| Ghostline Status: OK | Cache Miss: 0 | Cache Hit: 3 |"
/// );
/// ```
#[derive(Debug)]
pub struct StatusBoard {
    state: RwLock<BoardState>,
}

impl StatusBoard {
    /// Create a board showing the waiting status and zero counters
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BoardState {
                status: STATUS_WAITING.to_string(),
                cache_hits: 0,
                cache_misses: 0,
            }),
        }
    }

    /// Latest reported status
    pub fn status(&self) -> String {
        self.state.read().status.clone()
    }

    /// Latest reported cache hit count
    pub fn cache_hits(&self) -> u64 {
        self.state.read().cache_hits
    }

    /// Latest reported cache miss count
    pub fn cache_misses(&self) -> u64 {
        self.state.read().cache_misses
    }

    /// Render the board as a single status-bar line
    pub fn text(&self) -> String {
        let state = self.state.read();
        render(&state.status, state.cache_misses, state.cache_hits)
    }

    /// Render the latest status with counts taken from elsewhere
    ///
    /// Hosts that own the authoritative counters should prefer this over
    /// [`text`](Self::text): pushed counts may still arrive from requests that
    /// started before a reset.
    pub fn text_with_counts(&self, cache_misses: u64, cache_hits: u64) -> String {
        render(&self.state.read().status, cache_misses, cache_hits)
    }

    /// Zero both counters, keeping the status
    ///
    /// Call this together with a statistics reset; counters only ever grow
    /// otherwise.
    pub fn reset_counters(&self) {
        let mut state = self.state.write();
        state.cache_hits = 0;
        state.cache_misses = 0;
    }
}

fn render(status: &str, cache_misses: u64, cache_hits: u64) -> String {
    format!(
        "| Ghostline Status: {} | Cache Miss: {} | Cache Hit: {} |",
        status, cache_misses, cache_hits
    )
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for StatusBoard {
    fn update_status(&self, status: &str) {
        let mut state = self.state.write();
        if state.status != status {
            debug!("Status board: {} -> {}", state.status, status);
            state.status = status.to_string();
        }
    }

    // Counters arrive from concurrent tasks, so an older value may land after
    // a newer one. Keep the maximum.
    fn update_cache_hits(&self, hits: u64) {
        let mut state = self.state.write();
        state.cache_hits = state.cache_hits.max(hits);
    }

    fn update_cache_misses(&self, misses: u64) {
        let mut state = self.state.write();
        state.cache_misses = state.cache_misses.max(misses);
    }
}
