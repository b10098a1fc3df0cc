//! Pure window and growth arithmetic over daily snapshots.

use chrono::{DateTime, NaiveTime, Utc};
use rawi_store::DailyStats;

use crate::types::GrowthStats;

/// Length of the trailing growth window, in days
pub const GROWTH_WINDOW_DAYS: i64 = 7;

/// Truncate a timestamp to midnight UTC of its calendar day
pub fn day_start(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Growth figures over daily snapshots sorted by date ascending.
///
/// Needs at least two points; with fewer, every field reports its
/// zero/unavailable default. The rate divides by `max(first.total_users, 1)`
/// so a window that starts from zero users still yields a finite percentage.
pub fn compute_growth(records: &[DailyStats]) -> GrowthStats {
    let (Some(first), Some(last)) = (records.first(), records.last()) else {
        return GrowthStats::default();
    };
    if records.len() < 2 {
        return GrowthStats::default();
    }

    let delta = (last.total_users - first.total_users) as f64;
    let base = first.total_users.max(1) as f64;

    let peak_activity_day = records
        .iter()
        .max_by_key(|r| r.active_users)
        .map(|r| r.date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| crate::types::UNAVAILABLE_DAY.to_string());

    GrowthStats {
        weekly_growth_rate: round1(delta / base * 100.0),
        daily_average_new_users: round1(delta / GROWTH_WINDOW_DAYS as f64),
        peak_activity_day,
        error: None,
    }
}

/// Messages per user rounded to one decimal, 0 when there are no users
pub fn average_per_user(total_messages: i64, total_users: i64) -> f64 {
    if total_users > 0 {
        round1(total_messages as f64 / total_users as f64)
    } else {
        0.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
