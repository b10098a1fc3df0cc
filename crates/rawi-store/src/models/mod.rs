mod daily;
mod message;
mod session;

pub use daily::DailyStats;
pub use message::{ChatMessage, Sender};
pub use session::{Session, SessionStatus, StoreStats};
