//! Integration tests for mind-map document save/load
//!
//! The save format must round-trip node/edge collections, layout style,
//! and the selected color exactly, and loading must validate only the
//! presence of `nodes` and `edges`.

use mindgraph_core::{
    DocumentError, EdgeStroke, LayoutStyle, MindMapDocument, MindMapStore, Position,
};
use tempfile::TempDir;

fn sample_store() -> MindMapStore {
    let mut store = MindMapStore::new();
    store.set_layout_style(LayoutStyle::Horizontal);
    store.set_selected_node_color("#10B981");

    let a = store.add_node("中心テーマ", Position::new(250.0, 25.0)).id.clone();
    let b = store.add_node("枝葉", Position::new(400.0, 75.0)).id.clone();
    store.connect(&a, &b).unwrap();
    store.set_selection(vec![a.clone()], vec![]);
    store.recolor_selected();
    store.set_selection(vec![], vec![format!("edge-{}-{}", a, b)]);
    store.set_selected_edge_stroke(EdgeStroke::Dashed);
    store
}

#[test]
fn save_then_load_round_trips_exactly() {
    let store = sample_store();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("map.json");

    let mut doc = store.to_document("trip");
    doc.save_to_file(&path).unwrap();

    let loaded = MindMapDocument::load_from_file(&path).unwrap();
    assert_eq!(loaded.nodes, store.nodes());
    assert_eq!(loaded.edges, store.edges());
    assert_eq!(loaded.layout_style, LayoutStyle::Horizontal);
    assert_eq!(loaded.selected_node_color, "#10B981");
    assert_eq!(loaded.name, "trip");
    assert!(loaded.timestamp.is_some(), "save stamps the document");
}

#[test]
fn load_replaces_editor_state_and_clears_proposals() {
    let store = sample_store();
    let mut doc = store.to_document("replacement");
    doc.timestamp = None;

    let mut target = MindMapStore::starter();
    target.set_selection(vec!["1".to_string()], vec![]);
    target.load_document(doc);

    assert_eq!(target.nodes(), store.nodes());
    assert_eq!(target.edges(), store.edges());
    assert!(target.selected_nodes().is_empty());
    assert!(target.pending_proposal().is_none());
}

#[test]
fn saving_mid_proposal_keeps_only_confirmed_elements() {
    let mut store = sample_store();
    let parent = store.nodes()[0].id.clone();
    let mut draft = mindgraph_core::ProposalDraft::new("add a child");
    let child_id = draft
        .push_node("仮ノード", Position::new(250.0, 125.0))
        .id
        .clone();
    draft.push_edge(parent, child_id);
    store.apply_proposal(draft).unwrap();

    let doc = store.to_document("partial");
    assert_eq!(doc.nodes.len(), 2, "provisional node excluded");
    assert_eq!(doc.edges.len(), 1, "provisional edge excluded");
    assert!(doc.nodes.iter().all(|n| !n.provisional));

    // loading a document that does carry provisional elements drops
    // them: no proposal exists to resolve them
    let mut tainted = store.to_document("tainted");
    tainted.nodes.push(mindgraph_core::Node::provisional(
        "orphan",
        Position::new(0.0, 0.0),
        "proposal-gone",
    ));
    let mut target = MindMapStore::new();
    target.load_document(tainted);
    assert_eq!(target.nodes().len(), 2);
    assert!(target.nodes().iter().all(|n| !n.provisional));
}

#[test]
fn load_rejects_documents_without_nodes_or_edges() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{"name": "not a map"}"#).unwrap();

    let err = MindMapDocument::load_from_file(&path).unwrap_err();
    assert!(matches!(err, DocumentError::MissingField("nodes")));
}

#[test]
fn wire_format_uses_camel_case_keys() {
    let mut doc = sample_store().to_document("wire");
    doc.timestamp = None;
    let json = doc.to_json().unwrap();
    assert!(json.contains("\"layoutStyle\""));
    assert!(json.contains("\"selectedNodeColor\""));
    assert!(json.contains("\"horizontal\""));
}
