//! AI assistant endpoint
//!
//! `POST /api/ai-assistant` forwards the mind-map snapshot plus user
//! intent to the assist engine. Request validation failures are 400s;
//! engine failures (bad credentials, unknown model, upstream errors)
//! come back in-band as `{ success: false, ... }` with HTTP 200 so the
//! editor surfaces them inline.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use mindgraph_assist::{
    AssistError, AssistOutcome, MindMapAnalysis, MindMapState, ModelCatalog, ModelInfo,
    ProposalPayload,
};
use mindgraph_core::{Edge, Node};

use crate::{AppState, HttpError};

/// Request body, with every field optional so validation errors stay
/// under our control rather than serde's
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRequest {
    mind_map_state: Option<RawMindMapState>,
    api_key: Option<String>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMindMapState {
    nodes: Option<Vec<Node>>,
    edges: Option<Vec<Edge>>,
    user_input: Option<String>,
}

/// Success envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantSuccess {
    pub success: bool,
    pub proposals: Vec<ProposalPayload>,
    pub raw_response: String,
    pub analysis: MindMapAnalysis,
    pub model: String,
    pub model_info: ModelInfo,
}

/// In-band failure envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantFailure {
    pub success: bool,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_models: Option<Vec<&'static str>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AssistantResponse {
    Success(AssistantSuccess),
    Failure(AssistantFailure),
}

impl From<AssistOutcome> for AssistantResponse {
    fn from(outcome: AssistOutcome) -> Self {
        Self::Success(AssistantSuccess {
            success: true,
            proposals: outcome.proposals,
            raw_response: outcome.raw_response,
            analysis: outcome.analysis,
            model: outcome.model,
            model_info: outcome.model_info,
        })
    }
}

impl From<AssistError> for AssistantResponse {
    fn from(err: AssistError) -> Self {
        let failure = match err {
            AssistError::InvalidApiKey => AssistantFailure {
                success: false,
                error: "Invalid API key".to_string(),
                message: "APIキーが無効です。正しいAPIキーを入力してください。".to_string(),
                available_models: None,
            },
            AssistError::UnknownModel(model) => AssistantFailure {
                success: false,
                error: "Invalid model".to_string(),
                message: format!("無効なモデルです: {}", model),
                available_models: Some(ModelCatalog::ids()),
            },
            other => AssistantFailure {
                success: false,
                error: "AI processing failed".to_string(),
                message: other.to_string(),
                available_models: None,
            },
        };
        Self::Failure(failure)
    }
}

/// Handle one assistant request
async fn ai_assistant(
    State(state): State<AppState>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, HttpError> {
    let Some(raw_state) = request.mind_map_state else {
        return Err(HttpError::bad_request(
            "Missing required fields",
            "mindMapState and apiKey are required",
        ));
    };
    let Some(api_key) = request.api_key else {
        return Err(HttpError::bad_request(
            "Missing required fields",
            "mindMapState and apiKey are required",
        ));
    };
    let (Some(nodes), Some(edges), Some(user_input)) =
        (raw_state.nodes, raw_state.edges, raw_state.user_input)
    else {
        return Err(HttpError::bad_request(
            "Invalid mindMapState",
            "nodes, edges, and userInput are required",
        ));
    };
    if user_input.trim().is_empty() {
        return Err(HttpError::bad_request(
            "Invalid mindMapState",
            "nodes, edges, and userInput are required",
        ));
    }

    let snapshot = MindMapState {
        nodes,
        edges,
        user_input,
    };

    info!(
        "🤖 Assistant request: {} nodes, {} edges, input_len={}",
        snapshot.nodes.len(),
        snapshot.edges.len(),
        snapshot.user_input.len()
    );

    let response = match state
        .engine
        .process(&snapshot, &api_key, request.model.as_deref())
        .await
    {
        Ok(outcome) => {
            info!("✅ Assistant produced {} proposal(s)", outcome.proposals.len());
            AssistantResponse::from(outcome)
        }
        Err(err) => {
            warn!("❌ Assistant request failed: {}", err);
            AssistantResponse::from(err)
        }
    };

    Ok(Json(response))
}

/// Routes for this module
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/ai-assistant", post(ai_assistant))
        .with_state(state)
}
