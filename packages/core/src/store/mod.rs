//! Editor state store
//!
//! [`MindMapStore`] is the single logical owner of all graph state: the
//! node/edge collections, the selection, the layout settings, and the
//! proposal lifecycle. Every UI event maps to one method here, so the
//! store needs no locking; events are serialized by the event loop.
//!
//! # Proposal lifecycle
//!
//! - [`MindMapStore::apply_proposal`] inserts a draft's provisional
//!   elements and records the pending proposal (at most one at a time)
//! - [`MindMapStore::accept_proposal`] confirms exactly the elements
//!   tagged with that proposal id and leaves all others untouched
//! - [`MindMapStore::reject_proposal`] deletes exactly the tagged elements
//! - Both are idempotent per proposal id once applied

mod error;

pub use error::StoreError;

use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::models::{
    Edge, EdgeStroke, LayoutStyle, MindMapDocument, Node, Position, Proposal, ProposalDraft,
};

/// Direction for the add-child operation
///
/// `Forward` creates children pointing away from the selected node,
/// `Backward` creates parents pointing into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Result of resolving a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalOutcome {
    /// The proposal was resolved by this call
    Applied,
    /// The proposal id was already resolved; nothing changed
    AlreadyResolved,
}

/// The editor state store
#[derive(Debug, Clone, Default)]
pub struct MindMapStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    selected_nodes: Vec<String>,
    selected_edges: Vec<String>,
    layout_style: LayoutStyle,
    selected_node_color: String,
    pending_proposal: Option<Proposal>,
    resolved_proposals: HashSet<String>,
}

impl MindMapStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            selected_node_color: "#87CEEB".to_string(),
            ..Self::default()
        }
    }

    /// Create a store seeded with the starter map (one main idea with
    /// two sub ideas), matching what a fresh editor shows.
    pub fn starter() -> Self {
        let mut store = Self::new();
        store.nodes = vec![
            Node::with_id("1", "メインアイデア", Position::new(250.0, 25.0)),
            Node::with_id("2", "サブアイデア1", Position::new(100.0, 125.0)),
            Node::with_id("3", "サブアイデア2", Position::new(400.0, 125.0)),
        ];
        store.edges = vec![
            Edge {
                id: "e1-2".to_string(),
                ..Edge::new("1", "2")
            },
            Edge {
                id: "e1-3".to_string(),
                ..Edge::new("1", "3")
            },
        ];
        store
    }

    // =====================================================================
    // Accessors
    // =====================================================================

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn layout_style(&self) -> LayoutStyle {
        self.layout_style
    }

    pub fn selected_node_color(&self) -> &str {
        &self.selected_node_color
    }

    pub fn selected_nodes(&self) -> &[String] {
        &self.selected_nodes
    }

    pub fn selected_edges(&self) -> &[String] {
        &self.selected_edges
    }

    pub fn pending_proposal(&self) -> Option<&Proposal> {
        self.pending_proposal.as_ref()
    }

    /// True once the given proposal id has been accepted or rejected
    pub fn is_resolved(&self, proposal_id: &str) -> bool {
        self.resolved_proposals.contains(proposal_id)
    }

    /// Clone the node and edge collections, the view shipped with each
    /// assistant request
    pub fn snapshot(&self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes.clone(), self.edges.clone())
    }

    // =====================================================================
    // Direct mutations (user actions)
    // =====================================================================

    /// Add a free-standing node
    pub fn add_node(&mut self, label: impl Into<String>, position: Position) -> &Node {
        let node = Node::new(label, position);
        debug!("Added node {}", node.id);
        let index = self.nodes.len();
        self.nodes.push(node);
        &self.nodes[index]
    }

    /// For every selected node, insert a child (or parent, for
    /// [`Direction::Backward`]) plus the connecting edge
    ///
    /// Placement follows the current layout style: vertical layouts step
    /// 100 units on the y axis, horizontal layouts 150 on the x axis,
    /// with a 50-unit stagger per selected node. Returns the new node
    /// ids; a no-op when nothing is selected.
    pub fn add_child_nodes(&mut self, direction: Direction) -> Vec<String> {
        let mut created = Vec::new();
        let parents: Vec<(String, Position)> = self
            .selected_nodes
            .iter()
            .filter_map(|id| self.node(id).map(|n| (n.id.clone(), n.position)))
            .collect();

        for (index, (parent_id, parent_pos)) in parents.into_iter().enumerate() {
            let stagger = index as f64 * 50.0;
            let position = match (self.layout_style, direction) {
                (LayoutStyle::Vertical, Direction::Forward) => parent_pos.offset(stagger, 100.0),
                (LayoutStyle::Vertical, Direction::Backward) => parent_pos.offset(stagger, -100.0),
                (LayoutStyle::Horizontal, Direction::Forward) => parent_pos.offset(150.0, stagger),
                (LayoutStyle::Horizontal, Direction::Backward) => {
                    parent_pos.offset(-150.0, stagger)
                }
            };

            let child = Node::new("サブアイデア", position);
            let child_id = child.id.clone();
            let edge = match direction {
                Direction::Forward => Edge::new(parent_id, child_id.clone()),
                Direction::Backward => Edge::new(child_id.clone(), parent_id),
            };

            self.nodes.push(child);
            self.edges.push(edge);
            created.push(child_id);
        }

        created
    }

    /// Connect two existing nodes with a confirmed edge
    pub fn connect(&mut self, source: &str, target: &str) -> Result<&Edge, StoreError> {
        if self.node(source).is_none() {
            return Err(StoreError::unknown_node(source));
        }
        if self.node(target).is_none() {
            return Err(StoreError::unknown_node(target));
        }

        let edge = Edge::new(source, target);
        if self.edge(&edge.id).is_some() {
            return Err(StoreError::duplicate_edge(edge.id));
        }

        let index = self.edges.len();
        self.edges.push(edge);
        Ok(&self.edges[index])
    }

    /// Replace the selection
    pub fn set_selection(&mut self, nodes: Vec<String>, edges: Vec<String>) {
        self.selected_nodes = nodes;
        self.selected_edges = edges;
    }

    pub fn set_layout_style(&mut self, style: LayoutStyle) {
        self.layout_style = style;
    }

    pub fn set_selected_node_color(&mut self, color: impl Into<String>) {
        self.selected_node_color = color.into();
    }

    /// Apply the current color to every selected node
    pub fn recolor_selected(&mut self) {
        let color = self.selected_node_color.clone();
        for node in &mut self.nodes {
            if self.selected_nodes.contains(&node.id) {
                node.style.color = Some(color.clone());
            }
        }
    }

    /// Apply a stroke style to every selected edge
    pub fn set_selected_edge_stroke(&mut self, stroke: EdgeStroke) {
        for edge in &mut self.edges {
            if self.selected_edges.contains(&edge.id) {
                edge.stroke = stroke;
            }
        }
    }

    /// Delete a node and every incident edge
    ///
    /// Returns false when the id was not present.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges.retain(|e| !e.touches(id));
        self.selected_nodes.retain(|s| s != id);
        true
    }

    /// Delete every selected node (and incident edges) and every
    /// selected edge
    pub fn delete_selected(&mut self) {
        let nodes: Vec<String> = self.selected_nodes.drain(..).collect();
        for id in nodes {
            self.delete_node(&id);
        }
        let edges: Vec<String> = self.selected_edges.drain(..).collect();
        self.edges.retain(|e| !edges.contains(&e.id));
    }

    // =====================================================================
    // Proposal lifecycle
    // =====================================================================

    /// Insert a draft's provisional elements and record the pending
    /// proposal
    ///
    /// Rejected while another proposal is pending; the submit affordance
    /// is disabled in that state, so this is a guard, not a queue.
    pub fn apply_proposal(&mut self, draft: ProposalDraft) -> Result<&Proposal, StoreError> {
        if let Some(pending) = &self.pending_proposal {
            return Err(StoreError::ProposalAlreadyPending {
                pending_id: pending.id.clone(),
            });
        }

        for node in &draft.nodes {
            if !node.provisional || node.proposal_id.as_deref() != Some(draft.id.as_str()) {
                return Err(StoreError::invalid_draft(format!(
                    "node {} is not tagged with proposal {}",
                    node.id, draft.id
                )));
            }
        }
        for edge in &draft.edges {
            if !edge.provisional || edge.proposal_id.as_deref() != Some(draft.id.as_str()) {
                return Err(StoreError::invalid_draft(format!(
                    "edge {} is not tagged with proposal {}",
                    edge.id, draft.id
                )));
            }
        }

        let proposal = Proposal {
            id: draft.id.clone(),
            description: draft.description.clone(),
            node_ids: draft.nodes.iter().map(|n| n.id.clone()).collect(),
            edge_ids: draft.edges.iter().map(|e| e.id.clone()).collect(),
            created_at: Utc::now(),
        };

        info!(
            "💡 Proposal {} pending: {} nodes, {} edges",
            proposal.id,
            draft.nodes.len(),
            draft.edges.len()
        );

        self.nodes.extend(draft.nodes);
        self.edges.extend(draft.edges);
        Ok(self.pending_proposal.insert(proposal))
    }

    /// Accept a proposal: confirm exactly the elements tagged with its id
    ///
    /// Idempotent once resolved; unknown ids are an error.
    pub fn accept_proposal(&mut self, proposal_id: &str) -> Result<ProposalOutcome, StoreError> {
        if self.resolved_proposals.contains(proposal_id) {
            debug!("Proposal {} already resolved, ignoring accept", proposal_id);
            return Ok(ProposalOutcome::AlreadyResolved);
        }
        self.take_pending(proposal_id)?;

        for node in &mut self.nodes {
            if node.proposal_id.as_deref() == Some(proposal_id) {
                node.confirm();
            }
        }
        for edge in &mut self.edges {
            if edge.proposal_id.as_deref() == Some(proposal_id) {
                edge.confirm();
            }
        }

        info!("✅ Proposal {} accepted", proposal_id);
        self.resolved_proposals.insert(proposal_id.to_string());
        Ok(ProposalOutcome::Applied)
    }

    /// Reject a proposal: delete exactly the elements tagged with its id
    ///
    /// Idempotent once resolved; unknown ids are an error.
    pub fn reject_proposal(&mut self, proposal_id: &str) -> Result<ProposalOutcome, StoreError> {
        if self.resolved_proposals.contains(proposal_id) {
            debug!("Proposal {} already resolved, ignoring reject", proposal_id);
            return Ok(ProposalOutcome::AlreadyResolved);
        }
        self.take_pending(proposal_id)?;

        self.nodes
            .retain(|n| n.proposal_id.as_deref() != Some(proposal_id));
        self.edges
            .retain(|e| e.proposal_id.as_deref() != Some(proposal_id));
        let nodes = &self.nodes;
        self.selected_nodes.retain(|id| nodes.iter().any(|n| &n.id == id));
        let edges = &self.edges;
        self.selected_edges.retain(|id| edges.iter().any(|e| &e.id == id));

        info!("❌ Proposal {} rejected", proposal_id);
        self.resolved_proposals.insert(proposal_id.to_string());
        Ok(ProposalOutcome::Applied)
    }

    /// Clear the pending slot if it matches, erroring on unknown ids
    fn take_pending(&mut self, proposal_id: &str) -> Result<(), StoreError> {
        match &self.pending_proposal {
            Some(pending) if pending.id == proposal_id => {
                self.pending_proposal = None;
                Ok(())
            }
            _ => Err(StoreError::unknown_proposal(proposal_id)),
        }
    }

    // =====================================================================
    // Documents
    // =====================================================================

    /// Snapshot the editor state as a savable document
    ///
    /// Provisional elements are excluded: a pending proposal cannot be
    /// resolved after a reload, so only confirmed state is saved.
    pub fn to_document(&self, name: impl Into<String>) -> MindMapDocument {
        MindMapDocument {
            nodes: self
                .nodes
                .iter()
                .filter(|n| !n.provisional)
                .cloned()
                .collect(),
            edges: self
                .edges
                .iter()
                .filter(|e| !e.provisional)
                .cloned()
                .collect(),
            layout_style: self.layout_style,
            selected_node_color: self.selected_node_color.clone(),
            timestamp: None,
            name: name.into(),
        }
    }

    /// Replace the editor state with a loaded document
    ///
    /// Selection and proposal state are reset; a pending proposal does
    /// not survive a load. Provisional elements in the document are
    /// dropped, since no proposal exists to resolve them.
    pub fn load_document(&mut self, doc: MindMapDocument) {
        self.nodes = doc.nodes.into_iter().filter(|n| !n.provisional).collect();
        self.edges = doc.edges.into_iter().filter(|e| !e.provisional).collect();
        self.layout_style = doc.layout_style;
        self.selected_node_color = doc.selected_node_color;
        self.selected_nodes.clear();
        self.selected_edges.clear();
        self.pending_proposal = None;
        self.resolved_proposals.clear();
    }
}
