//! Proposal data structures
//!
//! A proposal is one batch of provisional nodes/edges produced by the AI
//! bridge, awaiting a user accept/reject decision. Exactly one proposal
//! may be pending in the editor at a time; the store enforces this.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Edge, Node};

/// A pending or resolved proposal as tracked by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Unique identifier (`proposal-{uuid}` for generated proposals)
    pub id: String,

    /// Human-readable description shown in the accept/reject panel
    pub description: String,

    /// Ids of the provisional nodes this proposal introduced
    pub node_ids: Vec<String>,

    /// Ids of the provisional edges this proposal introduced
    pub edge_ids: Vec<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// The concrete elements of a proposal before the store applies it
///
/// The bridge materializes suggestions into a draft: fully-formed
/// provisional nodes and edges, every one tagged with `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDraft {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl ProposalDraft {
    /// Create an empty draft with a fresh proposal id
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: format!("proposal-{}", Uuid::new_v4()),
            description: description.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Add a provisional node tagged with this draft's id
    pub fn push_node(
        &mut self,
        label: impl Into<String>,
        position: crate::models::Position,
    ) -> &Node {
        let index = self.nodes.len();
        self.nodes
            .push(Node::provisional(label, position, self.id.clone()));
        &self.nodes[index]
    }

    /// Add a provisional edge tagged with this draft's id
    pub fn push_edge(&mut self, source: impl Into<String>, target: impl Into<String>) -> &Edge {
        let index = self.edges.len();
        self.edges
            .push(Edge::provisional(source, target, self.id.clone()));
        &self.edges[index]
    }

    /// True when the draft introduces no elements
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
