//! # Ghostline Stats
//!
//! Tracks how the completion pipeline is used and feeds that back into how
//! suggestions are presented.
//!
//! - [`UsageStatistics`]: lock-free counters for completions, acceptances and
//!   cache hits/misses, plus derived engagement and latency figures
//! - [`AdaptiveFormatter`]: trims multi-line suggestions to a single statement
//!   when users rarely accept what they are shown
//! - [`StatsReport`]: human-readable summary of a [`StatisticsSnapshot`]

pub mod formatter;
pub mod report;
pub mod statistics;

pub use formatter::{AdaptiveFormatter, TOTAL_COMPLETIONS_THRESHOLD, USER_ENGAGEMENT_THRESHOLD};
pub use report::StatsReport;
pub use statistics::{StatisticsSnapshot, UsageStatistics};
