use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ChatMessage, Sender, StoreStats};

/// Capability set shared by the volatile and persistent session stores
///
/// Implementations must tolerate unknown session ids on writes: a message
/// saved against a session that was never explicitly created provisions the
/// session under that id instead of failing.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new session and return its id
    async fn create_session(&self) -> Result<String>;

    /// Append a message, bumping the owning session's activity timestamp
    /// and message count
    async fn save_message(
        &self,
        session_id: &str,
        text: &str,
        sender: Sender,
    ) -> Result<ChatMessage>;

    /// Last `limit` messages in insertion order (most recent last).
    /// Unknown sessions yield an empty list, not an error.
    async fn get_history(&self, session_id: &str, limit: usize) -> Result<Vec<ChatMessage>>;

    /// Store-wide totals
    async fn get_stats(&self) -> Result<StoreStats>;
}
