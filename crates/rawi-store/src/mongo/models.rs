use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{ChatMessage, DailyStats, Sender, Session, SessionStatus};

/// Stored form of [`Session`]. Datetimes are kept as BSON dates so that
/// `$gte` range filters on `last_activity` compare correctly; the domain
/// model serializes them as RFC 3339 strings for the HTTP surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDocument {
    pub session_id: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub last_activity: DateTime<Utc>,
    pub messages_count: i64,
    pub user_info: serde_json::Value,
    pub status: SessionStatus,
}

/// Stored form of [`ChatMessage`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDocument {
    pub id: String,
    pub session_id: String,
    pub sender: Sender,
    pub text: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

/// Stored form of [`DailyStats`], uniquely keyed by `date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStatsDocument {
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub total_users: i64,
    pub active_users: i64,
    pub total_messages: i64,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub timestamp: DateTime<Utc>,
}

// Conversions between domain and stored models

impl From<Session> for SessionDocument {
    fn from(session: Session) -> Self {
        Self {
            session_id: session.session_id,
            start_time: session.start_time,
            last_activity: session.last_activity,
            messages_count: session.messages_count,
            user_info: session.user_info,
            status: session.status,
        }
    }
}

impl From<SessionDocument> for Session {
    fn from(document: SessionDocument) -> Self {
        Self {
            session_id: document.session_id,
            start_time: document.start_time,
            last_activity: document.last_activity,
            messages_count: document.messages_count,
            user_info: document.user_info,
            status: document.status,
        }
    }
}

impl From<ChatMessage> for MessageDocument {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            session_id: message.session_id,
            sender: message.sender,
            text: message.text,
            timestamp: message.timestamp,
        }
    }
}

impl From<MessageDocument> for ChatMessage {
    fn from(document: MessageDocument) -> Self {
        Self {
            id: document.id,
            session_id: document.session_id,
            sender: document.sender,
            text: document.text,
            timestamp: document.timestamp,
        }
    }
}

impl From<DailyStats> for DailyStatsDocument {
    fn from(record: DailyStats) -> Self {
        Self {
            date: record.date,
            total_users: record.total_users,
            active_users: record.active_users,
            total_messages: record.total_messages,
            timestamp: record.timestamp,
        }
    }
}

impl From<DailyStatsDocument> for DailyStats {
    fn from(document: DailyStatsDocument) -> Self {
        Self {
            date: document.date,
            total_users: document.total_users,
            active_users: document.active_users,
            total_messages: document.total_messages,
            timestamp: document.timestamp,
        }
    }
}
