pub mod anthropic;
pub mod config;
pub mod openai;
pub mod traits;

pub use traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse, TokenUsage};

pub use anthropic::AnthropicClient;
pub use config::{
    AnthropicConfig, ClientFactory, OpenAIConfig, ProviderConfig, ProviderDetails, ProviderType,
};
pub use openai::OpenAIClient;
