use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel reported as `peak_activity_day` when there is not enough history
/// to pick one ("unavailable" in Arabic, matching the rest of the product
/// surface).
pub const UNAVAILABLE_DAY: &str = "غير متوفر";

/// Point-in-time usage snapshot returned by the aggregator. Always
/// well-formed: on failure the counts are zeroed and `error` carries the
/// cause, callers never see an `Err`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageStatistics {
    pub total_users: i64,
    pub active_today: i64,
    pub active_week: i64,
    pub active_month: i64,
    pub total_messages: i64,
    pub avg_messages_per_user: f64,
    pub last_updated: DateTime<Utc>,
    pub growth_stats: GrowthStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UsageStatistics {
    /// Zeroed snapshot carrying the error that prevented a real one
    pub fn zeroed(error: impl Into<String>) -> Self {
        Self {
            total_users: 0,
            active_today: 0,
            active_week: 0,
            active_month: 0,
            total_messages: 0,
            avg_messages_per_user: 0.0,
            last_updated: Utc::now(),
            growth_stats: GrowthStats::default(),
            error: Some(error.into()),
        }
    }
}

/// Trailing-window growth figures derived from the daily snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthStats {
    /// Relative change in total users across the window, in percent
    pub weekly_growth_rate: f64,
    pub daily_average_new_users: f64,
    /// `%Y-%m-%d` of the day with the most active users, or [`UNAVAILABLE_DAY`]
    pub peak_activity_day: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for GrowthStats {
    fn default() -> Self {
        Self {
            weekly_growth_rate: 0.0,
            daily_average_new_users: 0.0,
            peak_activity_day: UNAVAILABLE_DAY.to_string(),
            error: None,
        }
    }
}
