use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ChatMessage, Sender, Session, StoreStats};
use crate::store::SessionStore;

#[derive(Debug, Default)]
struct Inner {
    sessions: HashMap<String, Session>,
    messages: HashMap<String, Vec<ChatMessage>>,
}

/// Volatile store for deployments without MongoDB. Both maps live behind a
/// single lock, so a racing create/save pair converges on one session.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create_session(&self) -> Result<String> {
        let session_id = Uuid::new_v4().to_string();
        let session = Session::new(&session_id, serde_json::json!({}));

        let mut inner = self.inner.write().await;
        inner.sessions.insert(session_id.clone(), session);
        Ok(session_id)
    }

    async fn save_message(
        &self,
        session_id: &str,
        text: &str,
        sender: Sender,
    ) -> Result<ChatMessage> {
        let message = ChatMessage::new(session_id, sender, text);

        let mut inner = self.inner.write().await;
        let session = inner
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id, serde_json::json!({})));
        session.messages_count += 1;
        session.last_activity = Utc::now();

        inner
            .messages
            .entry(session_id.to_string())
            .or_default()
            .push(message.clone());

        Ok(message)
    }

    async fn get_history(&self, session_id: &str, limit: usize) -> Result<Vec<ChatMessage>> {
        let inner = self.inner.read().await;
        let history = match inner.messages.get(session_id) {
            Some(messages) => {
                let start = messages.len().saturating_sub(limit);
                messages[start..].to_vec()
            }
            None => Vec::new(),
        };
        Ok(history)
    }

    async fn get_stats(&self) -> Result<StoreStats> {
        let inner = self.inner.read().await;
        let total_messages = inner
            .sessions
            .values()
            .map(|s| s.messages_count.max(0) as u64)
            .sum();
        Ok(StoreStats {
            total_sessions: inner.sessions.len() as u64,
            total_messages,
        })
    }
}
