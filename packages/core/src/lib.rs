//! MindGraph Core Editor Logic
//!
//! This crate provides the data model and state management for the MindGraph
//! mind-map editor: the node/edge graph, the editor store that owns all
//! mutations, the JSON document format for save/load, and the assistant
//! session state machine that gates the AI proposal workflow.
//!
//! # Architecture
//!
//! - **Single owner**: all graph state lives in [`MindMapStore`] and is
//!   mutated only through its methods (UI events are serialized by the
//!   event loop, so no locking is needed)
//! - **Provisional elements**: nodes/edges inserted by the AI bridge carry
//!   a `proposal_id` until the user accepts or rejects the proposal
//! - **Idempotent resolution**: accepting or rejecting an already-resolved
//!   proposal id is a no-op
//!
//! # Modules
//!
//! - [`models`] - Data structures (Node, Edge, Proposal, MindMapDocument)
//! - [`store`] - The editor state store and its mutation operations
//! - [`assistant`] - The submit/pending/resolve session state machine

pub mod assistant;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use assistant::*;
pub use models::*;
pub use store::*;
