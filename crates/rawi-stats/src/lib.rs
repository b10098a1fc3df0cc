pub mod aggregator;
pub mod growth;
pub mod types;

pub use aggregator::StatsAggregator;
pub use growth::{average_per_user, compute_growth, day_start, GROWTH_WINDOW_DAYS};
pub use types::{GrowthStats, UsageStatistics, UNAVAILABLE_DAY};
