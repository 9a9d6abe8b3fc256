//! Integration tests for the proposal lifecycle in MindMapStore
//!
//! Tests cover:
//! - Applying a draft inserts provisional elements and sets the pending slot
//! - Accept confirms exactly the tagged elements
//! - Reject removes exactly the tagged elements
//! - Idempotency of accept/reject per proposal id
//! - Single-pending-proposal enforcement

use mindgraph_core::{
    BorderStyle, Direction, EdgeStroke, MindMapStore, Position, ProposalDraft, ProposalOutcome,
    StoreError,
};

/// Test helper: a store with nodes A→B and A→C
fn abc_store() -> MindMapStore {
    let mut store = MindMapStore::new();
    let a = store.add_node("A", Position::new(250.0, 25.0)).id.clone();
    let b = store.add_node("B", Position::new(100.0, 125.0)).id.clone();
    let c = store.add_node("C", Position::new(400.0, 125.0)).id.clone();
    store.connect(&a, &b).unwrap();
    store.connect(&a, &c).unwrap();
    store
}

/// Test helper: a draft adding one child under the given parent
fn child_draft(parent_id: &str) -> ProposalDraft {
    let mut draft = ProposalDraft::new("add one child under A");
    let child_id = draft
        .push_node("new idea", Position::new(250.0, 125.0))
        .id
        .clone();
    draft.push_edge(parent_id.to_string(), child_id);
    draft
}

// =========================================================================
// Apply
// =========================================================================

#[test]
fn apply_inserts_provisional_elements() {
    let mut store = abc_store();
    let parent = store.nodes()[0].id.clone();
    let draft = child_draft(&parent);
    let draft_id = draft.id.clone();

    let proposal = store.apply_proposal(draft).unwrap().clone();
    assert_eq!(proposal.id, draft_id);
    assert_eq!(proposal.node_ids.len(), 1);
    assert_eq!(proposal.edge_ids.len(), 1);

    assert_eq!(store.nodes().len(), 4);
    assert_eq!(store.edges().len(), 3);
    let inserted = store.node(&proposal.node_ids[0]).unwrap();
    assert!(inserted.provisional);
    assert_eq!(inserted.proposal_id.as_deref(), Some(draft_id.as_str()));
}

#[test]
fn second_apply_is_rejected_while_pending() {
    let mut store = abc_store();
    let parent = store.nodes()[0].id.clone();
    let first_id = store.apply_proposal(child_draft(&parent)).unwrap().id.clone();

    let err = store.apply_proposal(child_draft(&parent)).unwrap_err();
    assert_eq!(
        err,
        StoreError::ProposalAlreadyPending {
            pending_id: first_id
        }
    );
}

#[test]
fn untagged_draft_elements_are_rejected() {
    let mut store = abc_store();
    let mut draft = ProposalDraft::new("broken draft");
    // node built outside the draft carries no proposal id
    draft
        .nodes
        .push(mindgraph_core::Node::new("stray", Position::default()));
    assert!(matches!(
        store.apply_proposal(draft),
        Err(StoreError::InvalidDraft { .. })
    ));
}

// =========================================================================
// Accept
// =========================================================================

#[test]
fn accept_confirms_exactly_the_tagged_elements() {
    let mut store = abc_store();
    let parent = store.nodes()[0].id.clone();
    let proposal = store.apply_proposal(child_draft(&parent)).unwrap().clone();

    assert_eq!(
        store.accept_proposal(&proposal.id).unwrap(),
        ProposalOutcome::Applied
    );

    // the tagged node is confirmed and restyled
    let confirmed = store.node(&proposal.node_ids[0]).unwrap();
    assert!(!confirmed.provisional);
    assert!(confirmed.proposal_id.is_none());
    assert_eq!(confirmed.style.border, Some(BorderStyle::Solid));

    let confirmed_edge = store.edge(&proposal.edge_ids[0]).unwrap();
    assert!(!confirmed_edge.provisional);
    assert_eq!(confirmed_edge.stroke, EdgeStroke::Solid);

    // all other elements are untouched
    for node in store.nodes().iter().filter(|n| n.id != proposal.node_ids[0]) {
        assert!(node.style.border.is_none(), "pre-existing node was restyled");
    }
    assert!(store.pending_proposal().is_none());
}

#[test]
fn accept_is_idempotent_per_proposal_id() {
    let mut store = abc_store();
    let parent = store.nodes()[0].id.clone();
    let id = store.apply_proposal(child_draft(&parent)).unwrap().id.clone();

    assert_eq!(store.accept_proposal(&id).unwrap(), ProposalOutcome::Applied);
    let nodes_after = store.nodes().len();

    // second accept and a late reject are both no-ops
    assert_eq!(
        store.accept_proposal(&id).unwrap(),
        ProposalOutcome::AlreadyResolved
    );
    assert_eq!(
        store.reject_proposal(&id).unwrap(),
        ProposalOutcome::AlreadyResolved
    );
    assert_eq!(store.nodes().len(), nodes_after);
}

#[test]
fn accept_of_unknown_proposal_is_an_error() {
    let mut store = abc_store();
    assert_eq!(
        store.accept_proposal("proposal-nope").unwrap_err(),
        StoreError::UnknownProposal {
            id: "proposal-nope".to_string()
        }
    );
}

// =========================================================================
// Reject
// =========================================================================

#[test]
fn reject_removes_exactly_the_tagged_elements() {
    let mut store = abc_store();
    let parent = store.nodes()[0].id.clone();
    let proposal = store.apply_proposal(child_draft(&parent)).unwrap().clone();

    assert_eq!(
        store.reject_proposal(&proposal.id).unwrap(),
        ProposalOutcome::Applied
    );

    assert_eq!(store.nodes().len(), 3, "only the provisional node removed");
    assert_eq!(store.edges().len(), 2, "only the provisional edge removed");
    assert!(store.node(&proposal.node_ids[0]).is_none());
    assert!(store.pending_proposal().is_none());
    assert!(store.is_resolved(&proposal.id));
}

#[test]
fn reject_is_idempotent_per_proposal_id() {
    let mut store = abc_store();
    let parent = store.nodes()[0].id.clone();
    let id = store.apply_proposal(child_draft(&parent)).unwrap().id.clone();

    store.reject_proposal(&id).unwrap();
    assert_eq!(
        store.reject_proposal(&id).unwrap(),
        ProposalOutcome::AlreadyResolved
    );
    assert_eq!(
        store.accept_proposal(&id).unwrap(),
        ProposalOutcome::AlreadyResolved
    );
}

// =========================================================================
// Direct mutations
// =========================================================================

#[test]
fn delete_node_cascades_to_incident_edges() {
    let mut store = abc_store();
    let a = store.nodes()[0].id.clone();
    assert!(store.delete_node(&a));
    assert_eq!(store.nodes().len(), 2);
    assert!(store.edges().is_empty());
    assert!(!store.delete_node(&a), "second delete reports absence");
}

#[test]
fn add_child_nodes_connects_to_each_selected_parent() {
    let mut store = abc_store();
    let a = store.nodes()[0].id.clone();
    let b = store.nodes()[1].id.clone();
    store.set_selection(vec![a.clone(), b.clone()], vec![]);

    let created = store.add_child_nodes(Direction::Forward);
    assert_eq!(created.len(), 2);
    for (parent, child) in [(&a, &created[0]), (&b, &created[1])] {
        assert!(store
            .edges()
            .iter()
            .any(|e| &e.source == parent && &e.target == child));
    }
}

#[test]
fn backward_direction_points_the_edge_into_the_parent() {
    let mut store = abc_store();
    let b = store.nodes()[1].id.clone();
    store.set_selection(vec![b.clone()], vec![]);

    let created = store.add_child_nodes(Direction::Backward);
    assert!(store
        .edges()
        .iter()
        .any(|e| e.source == created[0] && e.target == b));
}

#[test]
fn add_child_nodes_without_selection_is_a_no_op() {
    let mut store = abc_store();
    assert!(store.add_child_nodes(Direction::Forward).is_empty());
    assert_eq!(store.nodes().len(), 3);
}

#[test]
fn snapshot_clones_the_current_collections() {
    let mut store = abc_store();
    let (nodes, edges) = store.snapshot();
    assert_eq!(nodes, store.nodes());
    assert_eq!(edges, store.edges());

    // the snapshot is detached from later mutations
    store.add_node("D", Position::new(0.0, 0.0));
    assert_eq!(nodes.len(), 3);
    assert_eq!(store.nodes().len(), 4);
}

#[test]
fn recolor_applies_only_to_selected_nodes() {
    let mut store = abc_store();
    let b = store.nodes()[1].id.clone();
    store.set_selection(vec![b.clone()], vec![]);
    store.set_selected_node_color("#ff6b6b");
    store.recolor_selected();

    assert_eq!(
        store.node(&b).unwrap().style.color.as_deref(),
        Some("#ff6b6b")
    );
    assert!(store.nodes()[0].style.color.is_none());
}
