use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rawi_api::{config::Config, router::build_router, state::AppState};
use rawi_chat::{GeneratorConfig, ResponseGenerator, DISABLED_REPLY, PLACEHOLDER_MODEL};
use rawi_llm::{ClientFactory, ProviderConfig};
use rawi_store::MemorySessionStore;

/// Router over an in-memory store with generation disabled, the same wiring
/// the binary uses when MONGODB_URI is absent.
fn test_router() -> Router {
    let client = ClientFactory::create_chat_client(ProviderConfig::openai("test-key")).unwrap();
    let generator = ResponseGenerator::new(client, None, GeneratorConfig::default());

    let state = Arc::new(AppState::new(
        Config::default(),
        Arc::new(MemorySessionStore::new()),
        None,
        Arc::new(generator),
    ));

    build_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_service_map() {
    let app = test_router();

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["store"], "connected");
    assert_eq!(body["services"]["generation"], "disabled");
    assert_eq!(body["services"]["statistics"], "in-memory");
}

#[tokio::test]
async fn test_create_session_returns_fresh_id() {
    let app = test_router();

    let response = app
        .oneshot(post_json("/api/sessions", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = json_body(response).await;
    let session_id = body["session_id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(session_id).is_ok());
}

#[tokio::test]
async fn test_chat_returns_disabled_placeholder() {
    let app = test_router();

    let response = app
        .oneshot(post_json("/api/chat", json!({ "message": "مرحبا" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["text"], DISABLED_REPLY);
    assert_eq!(body["model_used"], PLACEHOLDER_MODEL);
    assert!(!body["session_id"].as_str().unwrap().is_empty());
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_chat_echoes_session_and_records_history() {
    let app = test_router();

    let created = json_body(
        app.clone()
            .oneshot(post_json("/api/sessions", json!({})))
            .await
            .unwrap(),
    )
    .await;
    let session_id = created["session_id"].as_str().unwrap().to_string();

    let reply = json_body(
        app.clone()
            .oneshot(post_json(
                "/api/chat",
                json!({ "message": "من هو المتنبي؟", "session_id": session_id }),
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(reply["session_id"], session_id.as_str());

    let response = app
        .oneshot(get(&format!("/api/chat/{session_id}/history")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["session_id"], session_id.as_str());

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["sender"], "user");
    assert_eq!(messages[0]["text"], "من هو المتنبي؟");
    assert_eq!(messages[1]["sender"], "assistant");
    assert_eq!(messages[1]["text"], DISABLED_REPLY);
}

#[tokio::test]
async fn test_blank_message_is_rejected() {
    let app = test_router();

    let response = app
        .oneshot(post_json("/api/chat", json!({ "message": "   " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_history_for_unknown_session_is_empty() {
    let app = test_router();

    let response = app
        .oneshot(get("/api/chat/unknown-session/history"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["messages"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_stats_fall_back_to_store_totals() {
    let app = test_router();

    // One exchange: provisions a session and stores both sides
    app.clone()
        .oneshot(post_json("/api/chat", json!({ "message": "مرحبا" })))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/stats/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["total_users"], 1);
    assert_eq!(body["active_today"], 1);
    assert_eq!(body["active_week"], 1);
    assert_eq!(body["active_month"], 1);
    assert_eq!(body["total_messages"], 2);
    assert_eq!(body["avg_messages_per_user"], 2.0);
    assert_eq!(body["growth_stats"]["peak_activity_day"], "غير متوفر");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_router();

    let response = app.oneshot(get("/api/docs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body.get("openapi").is_some());
    assert_eq!(body["info"]["title"], "Rawi API");
    assert!(body["paths"].get("/api/chat").is_some());
}
