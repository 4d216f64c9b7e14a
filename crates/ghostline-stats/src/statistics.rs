//! Usage statistics for the completion pipeline

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Point-in-time copy of the usage counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    /// Suggestions produced, accepted or not
    pub total_completions: u64,
    /// Suggestions the user accepted
    pub successful_completions: u64,
    /// Requests answered from the cache
    pub cache_hits: u64,
    /// Requests that had to go to the generation backend
    pub cache_misses: u64,
    /// Sum of completion latencies in milliseconds
    pub total_completion_time_ms: u64,
}

impl StatisticsSnapshot {
    /// Accepted suggestions as a whole percentage of all suggestions
    pub fn user_engagement_percent(&self) -> u32 {
        if self.total_completions == 0 {
            return 0;
        }
        let ratio = self.successful_completions as f64 / self.total_completions as f64;
        (ratio * 100.0).round() as u32
    }

    /// Mean completion latency in seconds
    pub fn average_completion_seconds(&self) -> f64 {
        if self.total_completions == 0 {
            return 0.0;
        }
        (self.total_completion_time_ms as f64 / self.total_completions as f64) / 1000.0
    }
}

/// Thread-safe usage counters
///
/// Each counter is an independent atomic and increments never lock; a reader
/// may see `total` move ahead of `successful`. A reset zeroes all counters
/// under the write side of `reset_lock` and snapshots take the read side, so
/// no snapshot observes a half-finished reset.
#[derive(Debug, Default)]
pub struct UsageStatistics {
    total_completions: AtomicU64,
    successful_completions: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    total_completion_time_ms: AtomicU64,
    reset_lock: RwLock<()>,
}

impl UsageStatistics {
    /// Create zeroed statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a produced suggestion and how long it took
    pub fn record_completion(&self, duration_ms: u64) {
        self.total_completions.fetch_add(1, Ordering::Relaxed);
        self.total_completion_time_ms
            .fetch_add(duration_ms, Ordering::Relaxed);
    }

    /// Record that the user accepted a suggestion
    pub fn record_success(&self) {
        self.successful_completions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a cache hit, returning the new hit count
    pub fn record_cache_hit(&self) -> u64 {
        self.cache_hits.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Record a cache miss, returning the new miss count
    pub fn record_cache_miss(&self) -> u64 {
        self.cache_misses.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Zero every counter
    pub fn reset(&self) {
        let _guard = self.reset_lock.write();
        self.total_completions.store(0, Ordering::Relaxed);
        self.successful_completions.store(0, Ordering::Relaxed);
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.total_completion_time_ms.store(0, Ordering::Relaxed);
        debug!("Usage statistics reset");
    }

    pub fn total_completions(&self) -> u64 {
        self.total_completions.load(Ordering::Relaxed)
    }

    pub fn successful_completions(&self) -> u64 {
        self.successful_completions.load(Ordering::Relaxed)
    }

    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    /// See [`StatisticsSnapshot::user_engagement_percent`]
    pub fn user_engagement_percent(&self) -> u32 {
        self.snapshot().user_engagement_percent()
    }

    /// See [`StatisticsSnapshot::average_completion_seconds`]
    pub fn average_completion_seconds(&self) -> f64 {
        self.snapshot().average_completion_seconds()
    }

    /// Copy the current counter values
    pub fn snapshot(&self) -> StatisticsSnapshot {
        let _guard = self.reset_lock.read();
        StatisticsSnapshot {
            total_completions: self.total_completions(),
            successful_completions: self.successful_completions(),
            cache_hits: self.cache_hits(),
            cache_misses: self.cache_misses(),
            total_completion_time_ms: self.total_completion_time_ms.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
impl UsageStatistics {
    fn restore(&self, snapshot: StatisticsSnapshot) {
        let _guard = self.reset_lock.write();
        self.total_completions
            .store(snapshot.total_completions, Ordering::Relaxed);
        self.successful_completions
            .store(snapshot.successful_completions, Ordering::Relaxed);
        self.cache_hits.store(snapshot.cache_hits, Ordering::Relaxed);
        self.cache_misses.store(snapshot.cache_misses, Ordering::Relaxed);
        self.total_completion_time_ms
            .store(snapshot.total_completion_time_ms, Ordering::Relaxed);
    }
}
