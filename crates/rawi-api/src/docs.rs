use axum::Json;
use utoipa::OpenApi;

use crate::routes::{chat, health, sessions, stats};

/// OpenAPI description of the HTTP surface
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        sessions::create_session,
        chat::send_message,
        chat::get_history,
        stats::user_statistics,
    ),
    components(schemas(
        health::HealthResponse,
        sessions::CreateSessionResponse,
        chat::ChatRequestBody,
        chat::HistoryResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "sessions", description = "Conversation sessions"),
        (name = "chat", description = "Message exchange and history"),
        (name = "stats", description = "Usage statistics"),
    ),
    info(
        title = "Rawi API",
        description = "Backend API for the Rawi literary assistant"
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
