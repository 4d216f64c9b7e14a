//! # Ghostline Cache
//!
//! In-memory store for completion suggestions.
//!
//! ## Features
//!
//! - **Normalized keys**: excerpts that differ only in line breaks or runs of
//!   whitespace share one entry ([`CacheKey`])
//! - **Bounded size**: least-recently-used eviction once the capacity is reached
//! - **Idle expiration**: entries untouched for the idle window are dropped
//! - **Thread safety**: every operation takes `&self`; no external locking needed

pub mod cache;
pub mod key;

pub use cache::{CacheConfig, SuggestionCache, EMPTY};
pub use key::{CacheKey, MAX_KEY_CHARS};
