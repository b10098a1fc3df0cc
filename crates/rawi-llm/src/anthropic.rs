// Anthropic-specific client implementation

use crate::traits::{ChatClient, ChatRequest, ChatResponse, TokenUsage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

// The Messages API rejects requests without max_tokens
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Anthropic client (HTTP direct, no SDK)
pub struct AnthropicClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl AnthropicClient {
    /// Create new client with API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&api_key).context("Invalid API key format")?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: ANTHROPIC_API_BASE.to_string(),
        })
    }

    /// Override the API base URL (proxies, regional gateways)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build messages request payload
    fn build_messages_request(&self, request: &ChatRequest) -> Value {
        let mut payload = serde_json::json!({
            "model": request.model,
            "max_tokens": request.options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "messages": [{
                "role": "user",
                "content": request.prompt,
            }],
        });

        let obj = payload.as_object_mut().unwrap();
        if let Some(system) = &request.system {
            obj.insert("system".to_string(), serde_json::json!(system));
        }
        if let Some(temp) = request.options.temperature {
            obj.insert("temperature".to_string(), serde_json::json!(temp));
        }

        payload
    }
}

#[async_trait]
impl ChatClient for AnthropicClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let payload = self.build_messages_request(&request);

        tracing::debug!(model = %request.model, "Sending messages request to Anthropic");

        let response = self
            .http_client
            .post(format!("{}/v1/messages", self.base_url))
            .json(&payload)
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Anthropic API error ({}): {}", status, error_text);
        }

        let raw: AnthropicMessagesResponse = response
            .json()
            .await
            .context("Failed to parse response")?;

        // Convert to provider-agnostic response
        let text: String = raw
            .content
            .iter()
            .map(|ContentBlock::Text { text }| text.as_str())
            .collect();
        Ok(ChatResponse {
            text,
            model: raw.model,
            usage: Some(TokenUsage {
                input_tokens: raw.usage.input_tokens,
                output_tokens: raw.usage.output_tokens,
                total_tokens: raw.usage.input_tokens + raw.usage.output_tokens,
            }),
        })
    }
}

// ============================================================================
// ANTHROPIC-SPECIFIC RESPONSE TYPES (for Messages)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnthropicMessagesResponse {
    pub id: String,
    pub model: String,
    pub content: Vec<ContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: AnthropicUsage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock {
    Text { text: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnthropicUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}
