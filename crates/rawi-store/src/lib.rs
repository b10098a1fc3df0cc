pub mod error;
pub mod memory;
pub mod models;
pub mod mongo;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::MemorySessionStore;
pub use models::{ChatMessage, DailyStats, Sender, Session, SessionStatus, StoreStats};
pub use mongo::{DailyStatsRepository, MessageRepository, MongoSessionStore, SessionRepository};
pub use store::SessionStore;
