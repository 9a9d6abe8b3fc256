//! Node data structures
//!
//! A node is one idea on the canvas: a label, a 2-D position, optional
//! style overrides, and the provisional flag used by the AI proposal
//! workflow.
//!
//! # Examples
//!
//! ```rust
//! use mindgraph_core::models::{Node, Position};
//!
//! let node = Node::new("Main idea", Position::new(250.0, 25.0));
//! assert!(!node.provisional);
//! assert!(node.proposal_id.is_none());
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 2-D canvas position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset by a delta, used when placing child nodes relative to
    /// their parent.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Canvas layout direction for child placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    #[default]
    Vertical,
    Horizontal,
}

/// Border rendering style for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Optional per-node style overrides
///
/// Fields left as `None` fall back to the theme defaults in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    /// Fill color as a CSS color string (e.g. "#87CEEB")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Border style override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<BorderStyle>,

    /// Font size override in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
}

impl NodeStyle {
    /// True when no override is set (used to skip serialization)
    pub fn is_default(&self) -> bool {
        self.color.is_none() && self.border.is_none() && self.font_size.is_none()
    }
}

/// A single node in the mind map
///
/// # Lifecycle
///
/// Created by direct user action, by the add-child operation, or by the
/// proposal bridge (provisional); destroyed by explicit delete or by
/// proposal rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier (`node-{uuid}` for generated nodes)
    pub id: String,

    /// Display label
    pub label: String,

    /// Canvas position
    pub position: Position,

    /// Optional style overrides
    #[serde(default, skip_serializing_if = "NodeStyle::is_default")]
    pub style: NodeStyle,

    /// True while the node awaits user confirmation of an AI proposal
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub provisional: bool,

    /// Id of the proposal that introduced this node (provisional only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal_id: Option<String>,
}

impl Node {
    /// Create a confirmed node with a generated id
    pub fn new(label: impl Into<String>, position: Position) -> Self {
        Self::with_id(format!("node-{}", Uuid::new_v4()), label, position)
    }

    /// Create a confirmed node with an explicit id
    pub fn with_id(id: impl Into<String>, label: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            position,
            style: NodeStyle::default(),
            provisional: false,
            proposal_id: None,
        }
    }

    /// Create a provisional node owned by a proposal
    ///
    /// Provisional nodes render with a dashed border until the proposal
    /// is accepted.
    pub fn provisional(
        label: impl Into<String>,
        position: Position,
        proposal_id: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("node-{}", Uuid::new_v4()),
            label: label.into(),
            position,
            style: NodeStyle {
                border: Some(BorderStyle::Dashed),
                ..NodeStyle::default()
            },
            provisional: true,
            proposal_id: Some(proposal_id.into()),
        }
    }

    /// Strip the provisional state and restyle to the confirmed appearance
    pub fn confirm(&mut self) {
        self.provisional = false;
        self.proposal_id = None;
        self.style.border = Some(BorderStyle::Solid);
    }
}
