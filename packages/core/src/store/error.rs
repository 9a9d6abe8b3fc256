//! Store error types

use thiserror::Error;

/// Errors from editor store mutations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// An operation referenced a node id that does not exist
    #[error("Unknown node: {id}")]
    UnknownNode { id: String },

    /// An edge with this id already exists
    #[error("Duplicate edge: {id}")]
    DuplicateEdge { id: String },

    /// A new proposal was applied while another is pending
    #[error("Proposal already pending: {pending_id}")]
    ProposalAlreadyPending { pending_id: String },

    /// Accept/reject referenced a proposal id the store never saw
    #[error("Unknown proposal: {id}")]
    UnknownProposal { id: String },

    /// A draft contained elements not tagged with the draft's id
    #[error("Invalid proposal draft: {context}")]
    InvalidDraft { context: String },
}

impl StoreError {
    pub fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }

    pub fn duplicate_edge(id: impl Into<String>) -> Self {
        Self::DuplicateEdge { id: id.into() }
    }

    pub fn unknown_proposal(id: impl Into<String>) -> Self {
        Self::UnknownProposal { id: id.into() }
    }

    pub fn invalid_draft(context: impl Into<String>) -> Self {
        Self::InvalidDraft {
            context: context.into(),
        }
    }
}
