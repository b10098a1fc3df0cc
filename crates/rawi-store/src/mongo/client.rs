use async_trait::async_trait;
use mongodb::Client;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::{ChatMessage, Sender, Session, StoreStats};
use crate::mongo::repositories::{DailyStatsRepository, MessageRepository, SessionRepository};
use crate::store::SessionStore;

/// MongoDB-backed session store. Session mutations ride on the store's native
/// upsert/increment primitives, so a message written against a fresh id both
/// provisions the session and counts the message in one document update.
pub struct MongoSessionStore {
    sessions: SessionRepository,
    messages: MessageRepository,
    daily_stats: DailyStatsRepository,
}

impl MongoSessionStore {
    /// Connect to MongoDB and build the repositories
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        tracing::info!("Connected to MongoDB database {}", database);
        Ok(Self::with_client(&client, database))
    }

    pub fn with_client(client: &Client, database: &str) -> Self {
        Self {
            sessions: SessionRepository::new(client, database),
            messages: MessageRepository::new(client, database),
            daily_stats: DailyStatsRepository::new(client, database),
        }
    }

    /// Session repository handle, for wiring the statistics aggregator
    pub fn sessions(&self) -> SessionRepository {
        self.sessions.clone()
    }

    /// Daily-stats repository handle, for wiring the statistics aggregator
    pub fn daily_stats(&self) -> DailyStatsRepository {
        self.daily_stats.clone()
    }
}

#[async_trait]
impl SessionStore for MongoSessionStore {
    async fn create_session(&self) -> Result<String> {
        let session = Session::new(Uuid::new_v4().to_string(), serde_json::json!({}));
        self.sessions.insert_if_absent(&session).await?;
        Ok(session.session_id)
    }

    async fn save_message(
        &self,
        session_id: &str,
        text: &str,
        sender: Sender,
    ) -> Result<ChatMessage> {
        let message = ChatMessage::new(session_id, sender, text);
        self.messages.insert(&message).await?;
        self.sessions.record_message(session_id).await?;
        Ok(message)
    }

    async fn get_history(&self, session_id: &str, limit: usize) -> Result<Vec<ChatMessage>> {
        self.messages.recent(session_id, limit).await
    }

    async fn get_stats(&self) -> Result<StoreStats> {
        let total_sessions = self.sessions.count_all().await?;
        let total_messages = self.sessions.total_messages().await?;
        Ok(StoreStats {
            total_sessions,
            total_messages: total_messages.max(0) as u64,
        })
    }
}
