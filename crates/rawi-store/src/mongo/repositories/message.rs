use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::ChatMessage;
use crate::mongo::models::MessageDocument;

const COLLECTION: &str = "chat_messages";

/// Repository over the `chat_messages` collection. Messages are append-only;
/// there are no update or delete operations.
#[derive(Clone)]
pub struct MessageRepository {
    collection: Collection<MessageDocument>,
}

impl MessageRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection(COLLECTION);
        Self { collection }
    }

    /// Append a single message
    pub async fn insert(&self, message: &ChatMessage) -> Result<()> {
        let document = MessageDocument::from(message.clone());
        self.collection.insert_one(&document).await?;
        Ok(())
    }

    /// Last `limit` messages of a session in chronological order. Unknown
    /// sessions simply match nothing and yield an empty vec.
    pub async fn recent(&self, session_id: &str, limit: usize) -> Result<Vec<ChatMessage>> {
        let mut documents: Vec<MessageDocument> = self
            .collection
            .find(doc! { "session_id": session_id })
            .sort(doc! { "timestamp": -1 })
            .limit(limit as i64)
            .await?
            .try_collect()
            .await?;
        documents.reverse(); // most recent last
        Ok(documents.into_iter().map(ChatMessage::from).collect())
    }
}
