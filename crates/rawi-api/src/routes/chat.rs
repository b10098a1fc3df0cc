use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use rawi_chat::{GenerateRequest, GeneratedResponse, SearchResult};
use rawi_store::{ChatMessage, Sender};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Prior messages folded into the prompt as conversation context
const CONTEXT_HISTORY_LIMIT: usize = 20;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequestBody {
    pub message: String,
    /// Reuse an existing session; a fresh one is created when absent
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub search_results: Vec<SearchResult>,
    /// Force the advanced model regardless of keyword routing
    #[serde(default)]
    pub prefer_advanced: bool,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    50
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryResponse {
    pub session_id: String,
    #[schema(value_type = Vec<Object>)]
    pub messages: Vec<ChatMessage>,
}

/// Send a message and receive the assistant's reply
///
/// Flow: load prior history as context when a session id was supplied,
/// generate the reply, record both sides of the exchange, then hand the
/// session to the statistics aggregator in the background. Storage failures
/// along the way are logged and never cost the caller their reply.
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequestBody,
    responses(
        (status = 200, description = "Generated reply"),
        (status = 400, description = "Empty message")
    ),
    tag = "chat"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ChatRequestBody>,
) -> ApiResult<Json<GeneratedResponse>> {
    let message = body.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest(
            "message must not be empty".to_string(),
        ));
    }

    let context = match &body.session_id {
        Some(id) if !id.is_empty() => conversation_context(&state, id).await,
        _ => None,
    };

    let response = state
        .generator
        .generate(GenerateRequest {
            message: message.to_string(),
            search_results: body.search_results,
            session_id: body.session_id,
            prefer_advanced: body.prefer_advanced,
            conversation_context: context,
        })
        .await;

    if let Err(e) = state
        .store
        .save_message(&response.session_id, message, Sender::User)
        .await
    {
        tracing::error!(
            "Failed to save user message for session {}: {}",
            response.session_id,
            e
        );
    }
    if let Err(e) = state
        .store
        .save_message(&response.session_id, &response.text, Sender::Assistant)
        .await
    {
        tracing::error!(
            "Failed to save assistant message for session {}: {}",
            response.session_id,
            e
        );
    }

    // Statistics ride behind the response (fire-and-forget)
    if let Some(stats) = &state.stats {
        let stats = Arc::clone(stats);
        let session_id = response.session_id.clone();
        let user_info = user_info_from_headers(&headers);
        tokio::spawn(async move {
            stats.track_session(&session_id, user_info).await;
        });
    }

    Ok(Json(response))
}

/// Conversation history for a session
#[utoipa::path(
    get,
    path = "/api/chat/{session_id}/history",
    params(
        ("session_id" = String, Path, description = "Session ID"),
        ("limit" = Option<usize>, Query, description = "Maximum number of messages (default: 50)")
    ),
    responses(
        (status = 200, description = "Messages in insertion order, most recent last", body = HistoryResponse)
    ),
    tag = "chat"
)]
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let messages = match state.store.get_history(&session_id, query.limit).await {
        Ok(messages) => messages,
        Err(e) => {
            tracing::error!("Failed to load history for session {}: {}", session_id, e);
            Vec::new()
        }
    };

    Json(HistoryResponse {
        session_id,
        messages,
    })
}

async fn conversation_context(state: &AppState, session_id: &str) -> Option<String> {
    match state
        .store
        .get_history(session_id, CONTEXT_HISTORY_LIMIT)
        .await
    {
        Ok(messages) if !messages.is_empty() => {
            let entries: Vec<(&str, &str)> = messages
                .iter()
                .map(|m| (sender_label(m.sender), m.text.as_str()))
                .collect();
            Some(rawi_chat::history_context(&entries))
        }
        Ok(_) => None,
        Err(e) => {
            tracing::error!(
                "Failed to load context history for session {}: {}",
                session_id,
                e
            );
            None
        }
    }
}

fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "المستخدم",
        Sender::Assistant => "راوي",
    }
}

fn user_info_from_headers(headers: &HeaderMap) -> serde_json::Value {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    serde_json::json!({ "user_agent": user_agent })
}
