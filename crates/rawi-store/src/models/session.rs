use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A conversation session, created on first contact and updated on every
/// message. Sessions are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub start_time: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub messages_count: i64,
    /// Arbitrary client attributes captured at creation (user agent, locale)
    pub user_info: serde_json::Value,
    pub status: SessionStatus,
}

impl Session {
    pub fn new(session_id: impl Into<String>, user_info: serde_json::Value) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            start_time: now,
            last_activity: now,
            messages_count: 0,
            user_info,
            status: SessionStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Inactive,
}

/// Store-wide totals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreStats {
    pub total_sessions: u64,
    pub total_messages: u64,
}
