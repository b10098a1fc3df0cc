mod daily;
mod message;
mod session;

pub use daily::DailyStatsRepository;
pub use message::MessageRepository;
pub use session::SessionRepository;
