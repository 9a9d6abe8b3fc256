//! Model catalog and health endpoints
//!
//! - `GET /api/models` - the supported model identifiers with metadata
//! - `GET /health` - liveness probe

use axum::{response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use mindgraph_assist::ModelCatalog;

use crate::AppState;

/// Health probe response
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
}

async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        message: "MindGraph assist server is running",
        timestamp: Utc::now(),
    })
}

async fn models() -> Json<Value> {
    let mut catalog = serde_json::Map::new();
    for (id, info) in ModelCatalog::all() {
        catalog.insert(
            id.to_string(),
            json!({
                "name": info.name,
                "description": info.description,
                "cost": info.cost,
            }),
        );
    }

    Json(json!({
        "success": true,
        "models": Value::Object(catalog),
        "defaultModel": ModelCatalog::default_model(),
    }))
}

/// Routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/models", get(models))
        .with_state(state)
}
