//! Suggestion cache with LRU and idle-time eviction

use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::key::CacheKey;

/// Value returned by [`SuggestionCache::get`] for keys that are not cached
pub const EMPTY: &str = "EMPTY";

/// Suggestion cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of live entries
    pub max_entries: usize,
    /// Entries not read or written for this long are evicted
    pub idle_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            idle_timeout: Duration::from_secs(10 * 60),
        }
    }
}

#[derive(Debug)]
struct Entry {
    value: String,
    last_access: Instant,
}

/// Thread-safe store for completion suggestions
///
/// Keys are normalized with [`CacheKey`] before use, so callers pass raw
/// excerpts. Reading or writing an entry refreshes both its LRU position and
/// its idle timer; [`contains`](Self::contains) refreshes neither.
pub struct SuggestionCache {
    entries: Mutex<LruCache<CacheKey, Entry>>,
    idle_timeout: Duration,
}

impl SuggestionCache {
    /// Create a cache with the default capacity (1000) and idle window (10 min)
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create a cache with custom limits
    ///
    /// A capacity of zero is raised to one.
    pub fn with_config(config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
        debug!(
            "Creating suggestion cache: capacity={}, idle_timeout={:?}",
            capacity, config.idle_timeout
        );
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            idle_timeout: config.idle_timeout,
        }
    }

    /// Maximum number of live entries
    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    /// Look up the suggestion stored for `key`
    ///
    /// Returns [`EMPTY`] when nothing is cached. Use
    /// [`contains`](Self::contains) to tell an absent key from a cached value
    /// that happens to equal the sentinel.
    pub fn get(&self, key: &str) -> String {
        let key = CacheKey::new(key);
        let now = Instant::now();
        let mut entries = self.entries.lock();
        self.evict_idle(&mut entries, now);

        match entries.get_mut(&key) {
            Some(entry) => {
                entry.last_access = now;
                trace!("Cache read hit: {}", key);
                entry.value.clone()
            }
            None => EMPTY.to_string(),
        }
    }

    /// Store `value` under `key`, evicting the least recently used entry when
    /// the cache is full
    pub fn put(&self, key: &str, value: impl Into<String>) {
        let key = CacheKey::new(key);
        let now = Instant::now();
        let mut entries = self.entries.lock();
        self.evict_idle(&mut entries, now);

        let entry = Entry {
            value: value.into(),
            last_access: now,
        };
        if let Some((evicted, _)) = entries.push(key.clone(), entry) {
            if evicted != key {
                trace!("Evicted least recently used entry: {}", evicted);
            }
        }
    }

    /// Check whether a live entry exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        let key = CacheKey::new(key);
        let mut entries = self.entries.lock();
        self.evict_idle(&mut entries, Instant::now());
        entries.contains(&key)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let mut entries = self.entries.lock();
        self.evict_idle(&mut entries, Instant::now());
        entries.len()
    }

    /// Check if the cache holds no live entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry
    pub fn clear(&self) {
        let mut entries = self.entries.lock();
        let removed = entries.len();
        entries.clear();
        debug!("Cleared suggestion cache ({} entries)", removed);
    }

    // LRU order is access order and access times only grow, so idle entries
    // are always at the cold end.
    fn evict_idle(&self, entries: &mut LruCache<CacheKey, Entry>, now: Instant) {
        while let Some((_, entry)) = entries.peek_lru() {
            if now.duration_since(entry.last_access) < self.idle_timeout {
                break;
            }
            if let Some((key, _)) = entries.pop_lru() {
                trace!("Evicted idle entry: {}", key);
            }
        }
    }
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SuggestionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.lock();
        f.debug_struct("SuggestionCache")
            .field("len", &entries.len())
            .field("capacity", &entries.cap())
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}
