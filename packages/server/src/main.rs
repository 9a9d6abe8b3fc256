//! MindGraph assist server binary
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin mindgraph-server
//! ```
//!
//! # Environment Variables
//!
//! - `MINDGRAPH_SERVER_PORT`: Server port (default: 3001)
//! - `MINDGRAPH_ALLOWED_ORIGIN`: CORS origin (default: http://localhost:5173)
//! - `OPENAI_BASE_URL`: Chat-completion endpoint override
//! - `RUST_LOG`: Logging level (e.g. "info", "debug", "trace")

use std::env;

use mindgraph_assist::{AssistEngine, OpenAiBackend};
use mindgraph_server::{create_router, AppState, DEFAULT_ALLOWED_ORIGIN};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🚀 MindGraph Assist Server");
    tracing::info!("==================================");

    let port = env::var("MINDGRAPH_SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3001);

    let allowed_origin =
        env::var("MINDGRAPH_ALLOWED_ORIGIN").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string());

    let backend = match env::var("OPENAI_BASE_URL") {
        Ok(base_url) => {
            tracing::info!("🔧 Chat endpoint override: {}", base_url);
            OpenAiBackend::new(base_url)
        }
        Err(_) => OpenAiBackend::default(),
    };

    let state = AppState::new(AssistEngine::new(backend));
    let app = create_router(state, &allowed_origin);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!("📡 Health check: http://localhost:{}/health", port);
    tracing::info!("🤖 AI Assistant: http://localhost:{}/api/ai-assistant", port);
    tracing::info!("🌐 Allowed origin: {}", allowed_origin);

    axum::serve(listener, app).await?;
    Ok(())
}
