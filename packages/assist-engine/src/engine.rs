//! The assist engine
//!
//! Orchestrates one proposal request: validate the model, analyze the
//! graph, try the deterministic planner, otherwise call the chat
//! backend and parse its reply, then materialize the suggestions into
//! concrete provisional nodes/edges the editor can insert as a pending
//! proposal.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

use mindgraph_core::{Edge, Node, Position, ProposalDraft};

use crate::analysis::{analyze, MindMapAnalysis};
use crate::backend::{ChatBackend, ChatRequest};
use crate::catalog::{ModelCatalog, ModelInfo};
use crate::error::{AssistError, Result};
use crate::parser::{parse_response, Suggestion, SuggestionKind};
use crate::planner::{self, LocalPlan};
use crate::prompt;

/// Child placement offsets (vertical layout spacing)
const CHILD_Y_OFFSET: f64 = 100.0;
const SIBLING_X_STAGGER: f64 = 50.0;

/// The graph snapshot plus user intent, as sent by the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapState {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub user_input: String,
}

/// One materialized proposal in the response
///
/// `nodes`/`edges` are fully-formed provisional elements tagged with
/// `id`; the editor applies one payload as one pending proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalPayload {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl ProposalPayload {
    /// Convert into the draft form the store applies
    pub fn to_draft(&self) -> ProposalDraft {
        ProposalDraft {
            id: self.id.clone(),
            description: self.description.clone(),
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    fn from_draft(draft: ProposalDraft, kind: SuggestionKind, priority: Option<String>) -> Self {
        Self {
            id: draft.id,
            kind,
            description: draft.description,
            priority,
            nodes: draft.nodes,
            edges: draft.edges,
        }
    }
}

/// Successful bridge result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistOutcome {
    pub proposals: Vec<ProposalPayload>,
    pub raw_response: String,
    pub analysis: MindMapAnalysis,
    pub model: String,
    pub model_info: ModelInfo,
}

/// The proposal bridge engine
#[derive(Clone)]
pub struct AssistEngine {
    backend: Arc<dyn ChatBackend>,
}

impl AssistEngine {
    pub fn new(backend: impl ChatBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Process one assistant request
    ///
    /// Validates credentials and the model id, plans explicit add-child
    /// requests locally, and otherwise forwards to the chat backend.
    /// A malformed completion is not an error: it degrades to an
    /// error-tagged suggestion in the outcome.
    #[instrument(skip(self, state, api_key))]
    pub async fn process(
        &self,
        state: &MindMapState,
        api_key: &str,
        model: Option<&str>,
    ) -> Result<AssistOutcome> {
        if api_key.trim().is_empty() {
            return Err(AssistError::InvalidApiKey);
        }

        let model = model.unwrap_or_else(|| ModelCatalog::default_model());
        let Some(model_info) = ModelCatalog::get(model) else {
            return Err(AssistError::UnknownModel(model.to_string()));
        };

        let analysis = analyze(&state.nodes, &state.edges);

        // explicit add-child requests never leave the machine
        if let Some(plan) = planner::plan(&state.user_input, &state.nodes, &state.edges) {
            info!(
                "🧭 Local plan: {} child(ren) under {:?}",
                plan.count, plan.parent_id
            );
            let payload = materialize_plan(&plan, &state.nodes);
            return Ok(AssistOutcome {
                raw_response: plan.description.clone(),
                proposals: vec![payload],
                analysis,
                model: model.to_string(),
                model_info: model_info.clone(),
            });
        }

        let request = ChatRequest {
            model: model.to_string(),
            system: prompt::system_prompt(),
            user: prompt::user_prompt(&state.user_input, &analysis),
            api_key: api_key.to_string(),
        };

        info!(
            "🤖 Forwarding to chat backend: model={}, nodes={}, edges={}",
            model, analysis.total_nodes, analysis.total_edges
        );

        let raw = self.backend.complete(request).await?;
        let suggestions = parse_response(&raw);
        let proposals = materialize_suggestions(&suggestions, &state.nodes, &state.edges);

        Ok(AssistOutcome {
            proposals,
            raw_response: raw,
            analysis,
            model: model.to_string(),
            model_info: model_info.clone(),
        })
    }
}

// ---------------------------------------------------------------------
// Materialization
// ---------------------------------------------------------------------

fn child_position(parent: Option<&Node>, index: usize) -> Position {
    match parent {
        Some(parent) => parent
            .position
            .offset(index as f64 * SIBLING_X_STAGGER, CHILD_Y_OFFSET),
        None => Position::new(250.0 + index as f64 * SIBLING_X_STAGGER, 25.0),
    }
}

fn child_label(base: &str, index: usize, count: usize) -> String {
    if count == 1 {
        base.to_string()
    } else {
        format!("{}{}", base, index + 1)
    }
}

/// Materialize a local plan into one proposal payload
fn materialize_plan(plan: &LocalPlan, nodes: &[Node]) -> ProposalPayload {
    let parent = plan
        .parent_id
        .as_deref()
        .and_then(|id| nodes.iter().find(|n| n.id == id));

    let mut draft = ProposalDraft::new(plan.description.clone());
    for index in 0..plan.count {
        let label = child_label("サブアイデア", index, plan.count);
        let node_id = draft
            .push_node(label, child_position(parent, index))
            .id
            .clone();
        if let Some(parent) = parent {
            draft.push_edge(parent.id.clone(), node_id);
        }
    }

    ProposalPayload::from_draft(draft, SuggestionKind::AddNode, None)
}

fn find_node<'a>(nodes: &'a [Node], reference: &str) -> Option<&'a Node> {
    nodes
        .iter()
        .find(|n| n.id == reference)
        .or_else(|| nodes.iter().find(|n| n.label == reference))
}

fn detail_str<'a>(details: &'a serde_json::Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| details.get(key)?.as_str())
}

/// Materialize parsed suggestions into proposal payloads
///
/// `add_node` and `add_connection` suggestions become concrete
/// provisional elements; the rest pass through as element-free payloads
/// so the editor can still display them.
fn materialize_suggestions(
    suggestions: &[Suggestion],
    nodes: &[Node],
    edges: &[Edge],
) -> Vec<ProposalPayload> {
    suggestions
        .iter()
        .map(|suggestion| match suggestion.kind {
            SuggestionKind::AddNode => materialize_add_node(suggestion, nodes, edges),
            SuggestionKind::AddConnection => materialize_add_connection(suggestion, nodes, edges),
            _ => ProposalPayload::from_draft(
                ProposalDraft::new(suggestion.description.clone()),
                suggestion.kind,
                suggestion.priority.clone(),
            ),
        })
        .collect()
}

fn materialize_add_node(
    suggestion: &Suggestion,
    nodes: &[Node],
    edges: &[Edge],
) -> ProposalPayload {
    let details = &suggestion.details;
    let parent = detail_str(details, &["parentId", "parentLabel", "parent", "target"])
        .and_then(|reference| find_node(nodes, reference))
        .or_else(|| {
            // no usable parent reference: attach to a root node
            nodes
                .iter()
                .find(|n| !edges.iter().any(|e| e.target == n.id))
        });

    let count = details
        .get("count")
        .and_then(|v| v.as_u64())
        .map(|c| c.clamp(1, 5) as usize)
        .unwrap_or(1);
    let base_label = detail_str(details, &["label", "title", "text"]).unwrap_or("新しいアイデア");

    let mut draft = ProposalDraft::new(suggestion.description.clone());
    for index in 0..count {
        let label = child_label(base_label, index, count);
        let node_id = draft
            .push_node(label, child_position(parent, index))
            .id
            .clone();
        if let Some(parent) = parent {
            draft.push_edge(parent.id.clone(), node_id);
        }
    }

    ProposalPayload::from_draft(draft, suggestion.kind, suggestion.priority.clone())
}

fn materialize_add_connection(
    suggestion: &Suggestion,
    nodes: &[Node],
    edges: &[Edge],
) -> ProposalPayload {
    let details = &suggestion.details;
    let source = detail_str(details, &["sourceId", "sourceLabel", "source"])
        .and_then(|reference| find_node(nodes, reference));
    let target = detail_str(details, &["targetId", "targetLabel", "target"])
        .and_then(|reference| find_node(nodes, reference));

    let mut draft = ProposalDraft::new(suggestion.description.clone());
    if let (Some(source), Some(target)) = (source, target) {
        let already_connected = edges
            .iter()
            .any(|e| e.source == source.id && e.target == target.id);
        if !already_connected && source.id != target.id {
            draft.push_edge(source.id.clone(), target.id.clone());
        }
    }

    ProposalPayload::from_draft(draft, suggestion.kind, suggestion.priority.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn abc() -> (Vec<Node>, Vec<Edge>) {
        let nodes = vec![
            Node::with_id("a", "A", Position::new(250.0, 25.0)),
            Node::with_id("b", "B", Position::new(100.0, 125.0)),
            Node::with_id("c", "C", Position::new(400.0, 125.0)),
        ];
        let edges = vec![Edge::new("a", "b"), Edge::new("a", "c")];
        (nodes, edges)
    }

    fn suggestion(kind: SuggestionKind, details: serde_json::Value) -> Suggestion {
        let parsed = parse_response(&format!(
            r#"{{"suggestions": [{{"type": "{}", "description": "d", "details": {}}}]}}"#,
            match kind {
                SuggestionKind::AddNode => "add_node",
                SuggestionKind::AddConnection => "add_connection",
                _ => "restructure",
            },
            details
        ));
        parsed.into_iter().next().unwrap()
    }

    #[test]
    fn add_node_suggestion_attaches_to_named_parent() {
        let (nodes, edges) = abc();
        let payload = materialize_add_node(
            &suggestion(SuggestionKind::AddNode, json!({"parentLabel": "B", "label": "B1"})),
            &nodes,
            &edges,
        );
        assert_eq!(payload.nodes.len(), 1);
        assert_eq!(payload.edges.len(), 1);
        assert_eq!(payload.edges[0].source, "b");
        assert_eq!(payload.nodes[0].label, "B1");
        assert!(payload.nodes[0].provisional);
        assert_eq!(payload.nodes[0].proposal_id.as_deref(), Some(payload.id.as_str()));
    }

    #[test]
    fn add_node_without_parent_reference_uses_a_root() {
        let (nodes, edges) = abc();
        let payload = materialize_add_node(
            &suggestion(SuggestionKind::AddNode, json!({})),
            &nodes,
            &edges,
        );
        assert_eq!(payload.edges[0].source, "a");
    }

    #[test]
    fn add_connection_skips_existing_and_self_edges() {
        let (nodes, edges) = abc();
        let existing = materialize_add_connection(
            &suggestion(
                SuggestionKind::AddConnection,
                json!({"sourceId": "a", "targetId": "b"}),
            ),
            &nodes,
            &edges,
        );
        assert!(existing.edges.is_empty());

        let fresh = materialize_add_connection(
            &suggestion(
                SuggestionKind::AddConnection,
                json!({"sourceId": "b", "targetId": "c"}),
            ),
            &nodes,
            &edges,
        );
        assert_eq!(fresh.edges.len(), 1);
        assert!(fresh.edges[0].provisional);
    }
}
