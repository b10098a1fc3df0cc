mod client;
pub mod models;
mod repositories;

pub use client::MongoSessionStore;
pub use repositories::{DailyStatsRepository, MessageRepository, SessionRepository};
