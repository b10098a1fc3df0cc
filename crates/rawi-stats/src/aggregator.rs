use chrono::{Duration, Utc};
use rawi_store::{DailyStats, DailyStatsRepository, Session, SessionRepository};
use serde_json::Value;

use crate::growth::{average_per_user, compute_growth, day_start, GROWTH_WINDOW_DAYS};
use crate::types::{GrowthStats, UsageStatistics};

/// Usage counters and growth figures over the session collections.
///
/// Every public operation absorbs storage failures: callers always get a
/// result object back, with the failure noted in its `error` field and the
/// numeric fields zeroed. Statistics must never take the chat flow down.
pub struct StatsAggregator {
    sessions: SessionRepository,
    daily_stats: DailyStatsRepository,
}

struct Counts {
    total_users: i64,
    active_today: i64,
    active_week: i64,
    active_month: i64,
    total_messages: i64,
}

impl StatsAggregator {
    pub fn new(sessions: SessionRepository, daily_stats: DailyStatsRepository) -> Self {
        Self {
            sessions,
            daily_stats,
        }
    }

    /// Register a session for statistics. Creation is first-write-wins, so
    /// calling this again for a known id changes nothing. Either way today's
    /// snapshot is refreshed and the session record handed back.
    pub async fn track_session(&self, session_id: &str, user_info: Value) -> Session {
        let session = Session::new(session_id, user_info);
        if let Err(e) = self.sessions.insert_if_absent(&session).await {
            tracing::error!("Failed to track session {}: {}", session_id, e);
        }
        self.refresh_daily_stats().await;
        session
    }

    /// Refresh `last_activity` and message count for a known session. A miss
    /// or a storage failure is logged and swallowed.
    pub async fn update_activity(&self, session_id: &str) {
        match self.sessions.bump_activity(session_id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!("Activity update for unknown session {}", session_id);
            }
            Err(e) => {
                tracing::error!(
                    "Failed to update activity for session {}: {}",
                    session_id,
                    e
                );
            }
        }
    }

    /// Current usage statistics. On storage failure the counters come back
    /// zeroed with the failure recorded in `error`.
    pub async fn get_statistics(&self) -> UsageStatistics {
        let counts = match self.snapshot_counts().await {
            Ok(counts) => counts,
            Err(e) => {
                tracing::error!("Failed to compute usage statistics: {}", e);
                return UsageStatistics::zeroed(e.to_string());
            }
        };

        UsageStatistics {
            total_users: counts.total_users,
            active_today: counts.active_today,
            active_week: counts.active_week,
            active_month: counts.active_month,
            total_messages: counts.total_messages,
            avg_messages_per_user: average_per_user(counts.total_messages, counts.total_users),
            last_updated: Utc::now(),
            growth_stats: self.growth_stats().await,
            error: None,
        }
    }

    /// Recompute and store today's snapshot. Failures are logged, never raised.
    pub async fn refresh_daily_stats(&self) {
        if let Err(e) = self.try_refresh_daily_stats().await {
            tracing::error!("Failed to refresh daily statistics: {}", e);
        }
    }

    async fn try_refresh_daily_stats(&self) -> rawi_store::Result<()> {
        let counts = self.snapshot_counts().await?;
        let now = Utc::now();
        let record = DailyStats {
            date: day_start(now),
            total_users: counts.total_users,
            active_users: counts.active_today,
            total_messages: counts.total_messages,
            timestamp: now,
        };
        self.daily_stats.upsert_for_day(&record).await
    }

    async fn growth_stats(&self) -> GrowthStats {
        let since = Utc::now() - Duration::days(GROWTH_WINDOW_DAYS);
        match self
            .daily_stats
            .recent(since, GROWTH_WINDOW_DAYS as usize)
            .await
        {
            Ok(records) => compute_growth(&records),
            Err(e) => {
                tracing::error!("Failed to load daily snapshots for growth: {}", e);
                GrowthStats {
                    error: Some(e.to_string()),
                    ..GrowthStats::default()
                }
            }
        }
    }

    /// The activity windows all start at a UTC midnight: today's, and the
    /// midnights 7 and 30 days before it.
    async fn snapshot_counts(&self) -> rawi_store::Result<Counts> {
        let today_start = day_start(Utc::now());
        let week_start = today_start - Duration::days(7);
        let month_start = today_start - Duration::days(30);

        Ok(Counts {
            total_users: self.sessions.count_all().await? as i64,
            active_today: self.sessions.count_active_since(today_start).await? as i64,
            active_week: self.sessions.count_active_since(week_start).await? as i64,
            active_month: self.sessions.count_active_since(month_start).await? as i64,
            total_messages: self.sessions.total_messages().await?,
        })
    }
}
