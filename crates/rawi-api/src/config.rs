use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub mongodb: MongoDbConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secrets (from ENV only, never from TOML)
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub openai_base_url: Option<String>,
    #[serde(default)]
    pub anthropic_api_key: Option<String>,
    /// Absent means no MongoDB: sessions go to the in-memory store
    #[serde(default)]
    pub mongodb_uri: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_origins")]
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origins: default_origins(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    #[serde(default = "default_database")]
    pub database: String,
}

impl Default for MongoDbConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
        }
    }
}

fn default_database() -> String {
    "rawi".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_advanced_model")]
    pub advanced_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Kill switch for reply generation; off by default
    #[serde(default)]
    pub generation_enabled: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            advanced_model: default_advanced_model(),
            max_tokens: default_max_tokens(),
            generation_enabled: false,
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_advanced_model() -> String {
    "claude-3-5-sonnet-latest".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

impl From<LlmConfig> for rawi_chat::GeneratorConfig {
    fn from(config: LlmConfig) -> Self {
        Self {
            default_model: config.default_model,
            advanced_model: config.advanced_model,
            max_tokens: config.max_tokens,
            generation_enabled: config.generation_enabled,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// "json" or "pretty"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (RAWI__ prefix, e.g. RAWI__SERVER__PORT)
    ///
    /// Secrets come from plain environment variables afterwards. A missing
    /// OPENAI_API_KEY is fatal; the other secrets are optional.
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("RAWI")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        cfg.openai_api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ConfigError::Message("OPENAI_API_KEY environment variable is required".to_string())
        })?;
        cfg.openai_base_url = std::env::var("OPENAI_BASE_URL").ok();
        cfg.anthropic_api_key = std::env::var("ANTHROPIC_API_KEY").ok();
        cfg.mongodb_uri = std::env::var("MONGODB_URI").ok();

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [cors]
            enabled = true
            origins = ["http://localhost:3000"]

            [mongodb]
            database = "rawi_test"

            [llm]
            default_model = "gpt-4o"
            advanced_model = "claude-3-5-sonnet-latest"
            max_tokens = 2048
            generation_enabled = true

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.mongodb.database, "rawi_test");
        assert!(config.llm.generation_enabled);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[server]\nport = 9000\n").unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.cors.enabled);
        assert_eq!(config.cors.origins, vec!["*"]);
        assert_eq!(config.llm.default_model, "gpt-4o-mini");
        assert!(!config.llm.generation_enabled);
        assert!(config.mongodb_uri.is_none());
    }

    #[test]
    fn test_llm_config_converts_to_generator_config() {
        let llm = LlmConfig {
            generation_enabled: true,
            max_tokens: 512,
            ..LlmConfig::default()
        };

        let generator: rawi_chat::GeneratorConfig = llm.into();
        assert!(generator.generation_enabled);
        assert_eq!(generator.max_tokens, 512);
        assert_eq!(generator.default_model, "gpt-4o-mini");
    }
}
