//! Statistics-driven suggestion formatting
//!
//! When users have seen enough suggestions and accept few of them, a long
//! multi-line block is more noise than help. In that case only the first
//! statement is offered.

use std::sync::Arc;

use tracing::trace;

use crate::statistics::UsageStatistics;

/// Completions that must have been produced before the formatter kicks in
pub const TOTAL_COMPLETIONS_THRESHOLD: u64 = 20;

/// Engagement percentage below which suggestions are trimmed
pub const USER_ENGAGEMENT_THRESHOLD: u32 = 30;

/// Trims suggestions based on live usage statistics
#[derive(Debug, Clone)]
pub struct AdaptiveFormatter {
    stats: Arc<UsageStatistics>,
}

impl AdaptiveFormatter {
    pub fn new(stats: Arc<UsageStatistics>) -> Self {
        Self { stats }
    }

    /// Reduce a multi-line suggestion to its first line when engagement is low
    ///
    /// The first line is only used on its own when it ends with `;`, i.e. when
    /// it is a complete statement. Anything else is returned unchanged.
    pub fn format_if_needed(&self, suggestion: &str) -> String {
        let snapshot = self.stats.snapshot();
        if snapshot.total_completions > TOTAL_COMPLETIONS_THRESHOLD
            && snapshot.user_engagement_percent() < USER_ENGAGEMENT_THRESHOLD
        {
            if let Some((first_line, _)) = suggestion.split_once('\n') {
                if first_line.ends_with(';') {
                    trace!("Trimming suggestion to its first line");
                    return first_line.to_string();
                }
            }
        }
        suggestion.to_string()
    }
}
