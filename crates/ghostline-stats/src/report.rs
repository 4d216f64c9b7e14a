//! Human-readable statistics summary

use std::fmt;

use crate::statistics::StatisticsSnapshot;

/// Summary of completion usage, ready to show in a dialog or terminal
///
/// ```
/// use ghostline_stats::{StatsReport, UsageStatistics};
///
/// let stats = UsageStatistics::new();
/// stats.record_completion(1500);
/// stats.record_success();
///
/// let report = StatsReport::from(stats.snapshot());
/// assert_eq!(
///     report.to_string(),
///     "Total completions: 1\n\
///      Successful completions: 1\n\
///      User engagement: 100%\n\
///      Average completion time: 1.50 s"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsReport {
    snapshot: StatisticsSnapshot,
}

impl StatsReport {
    pub fn new(snapshot: StatisticsSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &StatisticsSnapshot {
        &self.snapshot
    }
}

impl From<StatisticsSnapshot> for StatsReport {
    fn from(snapshot: StatisticsSnapshot) -> Self {
        Self::new(snapshot)
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total completions: {}", self.snapshot.total_completions)?;
        writeln!(
            f,
            "Successful completions: {}",
            self.snapshot.successful_completions
        )?;
        writeln!(
            f,
            "User engagement: {}%",
            self.snapshot.user_engagement_percent()
        )?;
        write!(
            f,
            "Average completion time: {:.2} s",
            self.snapshot.average_completion_seconds()
        )
    }
}
