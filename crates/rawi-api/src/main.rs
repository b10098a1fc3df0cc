use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rawi_api::{config::Config, router::build_router, state::AppState};
use rawi_chat::ResponseGenerator;
use rawi_llm::{ClientFactory, OpenAIConfig, ProviderConfig, ProviderDetails};
use rawi_stats::StatsAggregator;
use rawi_store::{MemorySessionStore, MongoSessionStore, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config =
        Config::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting Rawi API server");
    tracing::info!("Config loaded: {}:{}", config.server.host, config.server.port);

    // Default provider client. The credential is mandatory and already
    // checked at config load; the base URL override is for gateways.
    let mut openai_config = OpenAIConfig::new(config.openai_api_key.clone());
    if let Some(base_url) = config.openai_base_url.clone() {
        openai_config = openai_config.with_base_url(base_url);
    }
    let default_client = ClientFactory::create_chat_client(ProviderConfig {
        details: ProviderDetails::OpenAI(openai_config),
    })?;

    // Advanced provider client is optional; without it advanced-routed
    // requests fall back to the default model.
    let advanced_client = match config.anthropic_api_key.clone() {
        Some(key) => Some(ClientFactory::create_chat_client(
            ProviderConfig::anthropic(key),
        )?),
        None => {
            tracing::warn!(
                "ANTHROPIC_API_KEY not set; advanced requests will use the default model"
            );
            None
        }
    };

    let generator = Arc::new(ResponseGenerator::new(
        default_client,
        advanced_client,
        config.llm.clone().into(),
    ));

    // Store selection: MongoDB when a URI is configured, volatile otherwise
    let (store, stats): (Arc<dyn SessionStore>, Option<Arc<StatsAggregator>>) =
        match config.mongodb_uri.clone() {
            Some(uri) => {
                tracing::info!("Connecting to MongoDB");
                let mongo = MongoSessionStore::connect(&uri, &config.mongodb.database).await?;
                let stats = StatsAggregator::new(mongo.sessions(), mongo.daily_stats());
                tracing::info!("MongoDB connected");
                (Arc::new(mongo), Some(Arc::new(stats)))
            }
            None => {
                tracing::warn!("MONGODB_URI not set; sessions are volatile and lost on restart");
                (Arc::new(MemorySessionStore::new()), None)
            }
        };

    // Create application state
    let state = Arc::new(AppState::new(config.clone(), store, stats, generator));

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("API docs: http://{}/api/docs", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
