use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Health check endpoint
///
/// Returns the health status of the API and its dependencies
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let mut services = HashMap::new();

    let store = match state.store.get_stats().await {
        Ok(_) => "connected",
        Err(_) => "degraded",
    };
    services.insert("store".to_string(), store.to_string());

    let generation = if state.config.llm.generation_enabled {
        "enabled"
    } else {
        "disabled"
    };
    services.insert("generation".to_string(), generation.to_string());

    let statistics = if state.stats.is_some() {
        "mongodb"
    } else {
        "in-memory"
    };
    services.insert("statistics".to_string(), statistics.to_string());

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    })
}
