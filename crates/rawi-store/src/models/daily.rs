use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One usage snapshot per calendar day (UTC), uniquely keyed by `date`.
/// Recomputing a day's snapshot replaces the previous one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    /// Midnight UTC of the day this snapshot covers
    pub date: DateTime<Utc>,
    pub total_users: i64,
    pub active_users: i64,
    pub total_messages: i64,
    /// When the snapshot was captured
    pub timestamp: DateTime<Utc>,
}
