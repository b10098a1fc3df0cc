use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::Session;
use crate::mongo::models::SessionDocument;

const COLLECTION: &str = "user_sessions";

/// Repository over the `user_sessions` collection. One document per session,
/// uniquely keyed by `session_id`; all mutations are single-document atomic
/// updates, no cross-document transactions.
#[derive(Clone)]
pub struct SessionRepository {
    collection: Collection<SessionDocument>,
}

impl SessionRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection(COLLECTION);
        Self { collection }
    }

    /// Message-driven upsert: provisions the session on first contact and, in
    /// the same atomic update, refreshes `last_activity` and increments
    /// `messages_count`. Writes against unknown session ids therefore never
    /// fail, they create the session.
    pub async fn record_message(&self, session_id: &str) -> Result<()> {
        let now = bson::DateTime::now();
        let update = doc! {
            "$setOnInsert": {
                "session_id": session_id,
                "start_time": now,
                "user_info": {},
                "status": "active",
            },
            "$set": { "last_activity": now },
            "$inc": { "messages_count": 1_i64 },
        };

        self.collection
            .update_one(doc! { "session_id": session_id }, update)
            .upsert(true)
            .await?;
        Ok(())
    }

    /// First-write-wins creation: inserts the session record unless one with
    /// the same id already exists, in which case nothing changes.
    pub async fn insert_if_absent(&self, session: &Session) -> Result<()> {
        let document = SessionDocument::from(session.clone());
        let on_insert = bson::to_document(&document)?;

        self.collection
            .update_one(
                doc! { "session_id": &session.session_id },
                doc! { "$setOnInsert": on_insert },
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    /// Refresh `last_activity` and bump `messages_count` by one. No upsert:
    /// returns whether a session document matched.
    pub async fn bump_activity(&self, session_id: &str) -> Result<bool> {
        let update = doc! {
            "$set": { "last_activity": bson::DateTime::now() },
            "$inc": { "messages_count": 1_i64 },
        };

        let result = self
            .collection
            .update_one(doc! { "session_id": session_id }, update)
            .await?;
        Ok(result.matched_count > 0)
    }

    pub async fn count_all(&self) -> Result<u64> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    /// Count sessions whose last activity falls at or after `cutoff`.
    pub async fn count_active_since(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let filter = doc! {
            "last_activity": { "$gte": bson::DateTime::from_millis(cutoff.timestamp_millis()) }
        };
        Ok(self.collection.count_documents(filter).await?)
    }

    /// Sum of `messages_count` across all sessions.
    pub async fn total_messages(&self) -> Result<i64> {
        let pipeline = vec![doc! {
            "$group": { "_id": null, "total_messages": { "$sum": "$messages_count" } }
        }];

        let mut cursor = self.collection.aggregate(pipeline).await?;
        let total = match cursor.try_next().await? {
            Some(row) => row
                .get_i64("total_messages")
                .or_else(|_| row.get_i32("total_messages").map(i64::from))
                .unwrap_or(0),
            None => 0,
        };
        Ok(total)
    }

    pub async fn get(&self, session_id: &str) -> Result<Option<Session>> {
        let document = self
            .collection
            .find_one(doc! { "session_id": session_id })
            .await?;
        Ok(document.map(Session::from))
    }
}
