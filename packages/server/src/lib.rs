//! MindGraph companion HTTP service
//!
//! A small axum service the browser editor talks to:
//!
//! - `POST /api/ai-assistant` - forward graph + intent to the assist engine
//! - `GET /api/models` - supported model catalog
//! - `GET /health` - liveness probe
//!
//! # Architecture
//!
//! Endpoint modules each expose `routes(state)` and are merged into one
//! router. All state is one shared [`AssistEngine`]; the service itself
//! holds no graph state; the editor owns that and ships a snapshot
//! with every request.
//!
//! # Security
//!
//! - CORS restricted to the editor dev origin (overridable)
//! - No authentication: the API key rides in each request body and is
//!   forwarded, never stored

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use mindgraph_assist::AssistEngine;

mod assistant_endpoints;
mod model_endpoints;

// Shared HTTP error handling
mod http_error;

pub use http_error::HttpError;

/// Default editor origin allowed by CORS (Vite dev server)
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Application state shared across all endpoints
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AssistEngine>,
}

impl AppState {
    pub fn new(engine: AssistEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Create the main application router with all endpoint modules
pub fn create_router(state: AppState, allowed_origin: &str) -> Router {
    Router::new()
        .merge(assistant_endpoints::routes(state.clone()))
        .merge(model_endpoints::routes(state))
        .fallback(not_found)
        .layer(cors_layer(allowed_origin))
        .layer(TraceLayer::new_for_http())
}

async fn not_found(uri: axum::http::Uri) -> HttpError {
    HttpError::not_found(format!("Route {} does not exist", uri))
}

fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN));

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
