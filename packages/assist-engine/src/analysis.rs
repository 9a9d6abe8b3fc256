//! Mind-map structure analysis
//!
//! Summarizes the graph before prompting: totals, root/leaf nodes, and
//! a per-label type count. The summary rides along in the success
//! envelope so the editor can display what the assistant saw.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use mindgraph_core::{Edge, Node};

/// Summary of a label used in root/leaf listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSummary {
    pub id: String,
    pub label: String,
}

/// Structural summary of the current mind map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapAnalysis {
    pub total_nodes: usize,
    pub total_edges: usize,
    /// Nodes with no incoming edge
    pub root_nodes: Vec<NodeSummary>,
    /// Nodes with no outgoing edge
    pub leaf_nodes: Vec<NodeSummary>,
    /// Count per node label (duplicate labels collapse)
    pub node_types: BTreeMap<String, usize>,
}

/// Analyze the graph structure
pub fn analyze(nodes: &[Node], edges: &[Edge]) -> MindMapAnalysis {
    let has_incoming: HashSet<&str> = edges.iter().map(|e| e.target.as_str()).collect();
    let has_outgoing: HashSet<&str> = edges.iter().map(|e| e.source.as_str()).collect();

    let summarize = |node: &Node| NodeSummary {
        id: node.id.clone(),
        label: node.label.clone(),
    };

    let mut node_types = BTreeMap::new();
    for node in nodes {
        *node_types.entry(node.label.clone()).or_insert(0) += 1;
    }

    MindMapAnalysis {
        total_nodes: nodes.len(),
        total_edges: edges.len(),
        root_nodes: nodes
            .iter()
            .filter(|n| !has_incoming.contains(n.id.as_str()))
            .map(summarize)
            .collect(),
        leaf_nodes: nodes
            .iter()
            .filter(|n| !has_outgoing.contains(n.id.as_str()))
            .map(summarize)
            .collect(),
        node_types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindgraph_core::Position;

    fn graph() -> (Vec<Node>, Vec<Edge>) {
        let a = Node::with_id("a", "A", Position::default());
        let b = Node::with_id("b", "B", Position::default());
        let c = Node::with_id("c", "C", Position::default());
        let edges = vec![Edge::new("a", "b"), Edge::new("a", "c")];
        (vec![a, b, c], edges)
    }

    #[test]
    fn roots_have_no_incoming_edges() {
        let (nodes, edges) = graph();
        let analysis = analyze(&nodes, &edges);
        assert_eq!(analysis.total_nodes, 3);
        assert_eq!(analysis.total_edges, 2);
        assert_eq!(analysis.root_nodes.len(), 1);
        assert_eq!(analysis.root_nodes[0].id, "a");
    }

    #[test]
    fn leaves_have_no_outgoing_edges() {
        let (nodes, edges) = graph();
        let analysis = analyze(&nodes, &edges);
        let leaves: Vec<&str> = analysis.leaf_nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(leaves, vec!["b", "c"]);
    }

    #[test]
    fn empty_graph_analysis() {
        let analysis = analyze(&[], &[]);
        assert_eq!(analysis.total_nodes, 0);
        assert!(analysis.root_nodes.is_empty());
        assert!(analysis.node_types.is_empty());
    }
}
