//! Edge data structures
//!
//! An edge connects two nodes by id. Lifecycle mirrors [`Node`]: created
//! by connecting nodes, by the add-child operation, or by the proposal
//! bridge; destroyed by explicit delete, by deleting either endpoint, or
//! by proposal rejection.
//!
//! [`Node`]: crate::models::Node

use serde::{Deserialize, Serialize};

/// Stroke rendering style for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStroke {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// A directed edge between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Unique identifier (`edge-{source}-{target}` for generated edges)
    pub id: String,

    /// Source node id
    pub source: String,

    /// Target node id
    pub target: String,

    /// Stroke style
    #[serde(default, skip_serializing_if = "is_solid")]
    pub stroke: EdgeStroke,

    /// True while the edge awaits user confirmation of an AI proposal
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub provisional: bool,

    /// Id of the proposal that introduced this edge (provisional only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal_id: Option<String>,
}

fn is_solid(stroke: &EdgeStroke) -> bool {
    *stroke == EdgeStroke::Solid
}

impl Edge {
    /// Create a confirmed edge with the conventional generated id
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("edge-{}-{}", source, target),
            source,
            target,
            stroke: EdgeStroke::Solid,
            provisional: false,
            proposal_id: None,
        }
    }

    /// Create a provisional edge owned by a proposal
    ///
    /// Provisional edges render with a dashed stroke until the proposal
    /// is accepted.
    pub fn provisional(
        source: impl Into<String>,
        target: impl Into<String>,
        proposal_id: impl Into<String>,
    ) -> Self {
        let mut edge = Self::new(source, target);
        edge.stroke = EdgeStroke::Dashed;
        edge.provisional = true;
        edge.proposal_id = Some(proposal_id.into());
        edge
    }

    /// True when this edge touches the given node id
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }

    /// Strip the provisional state and restyle to the confirmed appearance
    pub fn confirm(&mut self) {
        self.provisional = false;
        self.proposal_id = None;
        self.stroke = EdgeStroke::Solid;
    }
}
