use std::sync::Arc;

use rawi_chat::ResponseGenerator;
use rawi_stats::StatsAggregator;
use rawi_store::SessionStore;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// All resources are wrapped in Arc for efficient sharing across async tasks.
/// `stats` is only present when MongoDB is configured; without it the stats
/// route synthesizes its reply from the store totals.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn SessionStore>,
    pub stats: Option<Arc<StatsAggregator>>,
    pub generator: Arc<ResponseGenerator>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn SessionStore>,
        stats: Option<Arc<StatsAggregator>>,
        generator: Arc<ResponseGenerator>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            stats,
            generator,
        }
    }
}
