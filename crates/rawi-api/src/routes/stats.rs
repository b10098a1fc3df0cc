use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use rawi_stats::{average_per_user, GrowthStats, UsageStatistics};

use crate::state::AppState;

/// Aggregated usage statistics
#[utoipa::path(
    get,
    path = "/api/stats/users",
    responses(
        (status = 200, description = "Usage counters, averages and growth figures")
    ),
    tag = "stats"
)]
pub async fn user_statistics(State(state): State<Arc<AppState>>) -> Json<UsageStatistics> {
    let statistics = match &state.stats {
        Some(aggregator) => aggregator.get_statistics().await,
        None => fallback_statistics(&state).await,
    };

    Json(statistics)
}

/// Without MongoDB there are no per-session activity timestamps or daily
/// snapshots, so every activity window reports the total session count and
/// growth stays at its defaults.
async fn fallback_statistics(state: &AppState) -> UsageStatistics {
    let totals = match state.store.get_stats().await {
        Ok(totals) => totals,
        Err(e) => {
            tracing::error!("Failed to read store totals: {}", e);
            return UsageStatistics::zeroed(e.to_string());
        }
    };

    let total_users = totals.total_sessions as i64;
    let total_messages = totals.total_messages as i64;

    UsageStatistics {
        total_users,
        active_today: total_users,
        active_week: total_users,
        active_month: total_users,
        total_messages,
        avg_messages_per_user: average_per_user(total_messages, total_users),
        last_updated: Utc::now(),
        growth_stats: GrowthStats::default(),
        error: None,
    }
}
