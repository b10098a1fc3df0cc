use std::sync::Arc;

use anyhow::Result;
use rawi_llm::{ChatClient, ChatOptions, ChatRequest, ChatResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::persona::{DISABLED_REPLY, FAILURE_REPLY, PERSONA, PLACEHOLDER_MODEL};
use crate::prompt::{build_prompt, SearchResult};
use crate::routing::should_use_advanced_model;

/// Everything `generate` needs for one reply
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub message: String,
    pub search_results: Vec<SearchResult>,
    /// Reused when supplied and non-empty; a fresh id is minted otherwise
    pub session_id: Option<String>,
    /// Force the advanced model regardless of keyword routing
    pub prefer_advanced: bool,
    pub conversation_context: Option<String>,
}

/// Wire shape of a generated reply. `error` is present only on placeholder
/// responses and carries the cause (kill switch or provider failure).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedResponse {
    pub text: String,
    pub session_id: String,
    /// Model that produced the text, or the placeholder marker
    pub model_used: String,
    pub has_search_results: bool,
    pub search_results_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub default_model: String,
    pub advanced_model: String,
    pub max_tokens: u32,
    /// Kill switch: when false every request gets the disabled placeholder
    pub generation_enabled: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_model: "gpt-4o-mini".to_string(),
            advanced_model: "claude-3-5-sonnet-latest".to_string(),
            max_tokens: 1024,
            generation_enabled: false,
        }
    }
}

/// Turns a user message (plus optional search results and prior conversation)
/// into one assistant reply. Routes analysis-heavy messages to the advanced
/// model; everything else goes to the default model.
pub struct ResponseGenerator {
    default_client: Arc<dyn ChatClient>,
    advanced_client: Option<Arc<dyn ChatClient>>,
    config: GeneratorConfig,
}

impl ResponseGenerator {
    pub fn new(
        default_client: Arc<dyn ChatClient>,
        advanced_client: Option<Arc<dyn ChatClient>>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            default_client,
            advanced_client,
            config,
        }
    }

    /// Generate a reply. Never errors: the kill switch and provider failures
    /// both come back as placeholder responses with the cause in `error`.
    pub async fn generate(&self, request: GenerateRequest) -> GeneratedResponse {
        let session_id = match &request.session_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => Uuid::new_v4().to_string(),
        };

        if !self.config.generation_enabled {
            return GeneratedResponse {
                text: DISABLED_REPLY.to_string(),
                session_id,
                model_used: PLACEHOLDER_MODEL.to_string(),
                has_search_results: false,
                search_results_count: 0,
                error: Some("chat generation is disabled".to_string()),
            };
        }

        let has_search_results = !request.search_results.is_empty();
        let search_results_count = request.search_results.len();
        let context = request.conversation_context.as_deref().unwrap_or("");
        let prompt = build_prompt(&request.message, &request.search_results, context);

        let wants_advanced =
            request.prefer_advanced || should_use_advanced_model(&request.message);
        let advanced = if wants_advanced {
            if self.advanced_client.is_none() {
                tracing::warn!(
                    "Advanced model requested but no advanced client is configured, using {}",
                    self.config.default_model
                );
            }
            self.advanced_client.as_ref()
        } else {
            None
        };

        // Advanced attempt first when routed there; its failure falls through
        // to a single retry on the default model.
        if let Some(client) = advanced {
            match self
                .complete(client.as_ref(), &self.config.advanced_model, &prompt)
                .await
            {
                Ok(response) => {
                    return completed(response, session_id, has_search_results, search_results_count)
                }
                Err(e) => {
                    tracing::warn!(
                        "Advanced model {} failed, retrying on {}: {}",
                        self.config.advanced_model,
                        self.config.default_model,
                        e
                    );
                }
            }
        }

        match self
            .complete(
                self.default_client.as_ref(),
                &self.config.default_model,
                &prompt,
            )
            .await
        {
            Ok(response) => {
                completed(response, session_id, has_search_results, search_results_count)
            }
            Err(e) => {
                tracing::error!(
                    "Chat completion failed on {}: {}",
                    self.config.default_model,
                    e
                );
                GeneratedResponse {
                    text: FAILURE_REPLY.to_string(),
                    session_id,
                    model_used: PLACEHOLDER_MODEL.to_string(),
                    has_search_results,
                    search_results_count,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    async fn complete(
        &self,
        client: &dyn ChatClient,
        model: &str,
        prompt: &str,
    ) -> Result<ChatResponse> {
        let request = ChatRequest::new(model, prompt)
            .with_system(PERSONA)
            .with_options(ChatOptions::new().max_tokens(self.config.max_tokens));
        client.chat(request).await
    }
}

fn completed(
    response: ChatResponse,
    session_id: String,
    has_search_results: bool,
    search_results_count: usize,
) -> GeneratedResponse {
    GeneratedResponse {
        text: response.text,
        session_id,
        model_used: response.model,
        has_search_results,
        search_results_count,
        error: None,
    }
}
