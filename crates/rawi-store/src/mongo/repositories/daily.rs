use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::DailyStats;
use crate::mongo::models::DailyStatsDocument;

const COLLECTION: &str = "daily_stats";

/// Repository over the `daily_stats` collection: one snapshot per calendar
/// day, keyed by `date`. Recomputation replaces the day's document, it never
/// duplicates it.
#[derive(Clone)]
pub struct DailyStatsRepository {
    collection: Collection<DailyStatsDocument>,
}

impl DailyStatsRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection(COLLECTION);
        Self { collection }
    }

    /// Replace the snapshot for `record.date` (upsert keyed by date)
    pub async fn upsert_for_day(&self, record: &DailyStats) -> Result<()> {
        let document = DailyStatsDocument::from(record.clone());
        let set = bson::to_document(&document)?;

        self.collection
            .update_one(
                doc! { "date": bson::DateTime::from_millis(record.date.timestamp_millis()) },
                doc! { "$set": set },
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    /// Snapshots with `date >= since` in ascending date order, capped at
    /// `limit` records.
    pub async fn recent(&self, since: DateTime<Utc>, limit: usize) -> Result<Vec<DailyStats>> {
        let documents: Vec<DailyStatsDocument> = self
            .collection
            .find(doc! {
                "date": { "$gte": bson::DateTime::from_millis(since.timestamp_millis()) }
            })
            .sort(doc! { "date": 1 })
            .limit(limit as i64)
            .await?
            .try_collect()
            .await?;
        Ok(documents.into_iter().map(DailyStats::from).collect())
    }
}
