//! AI assistant session workflow
//!
//! The session state machine that gates the proposal workflow:
//! `Idle` → `Processing` (on submit) → `ProposalPending` (on successful
//! response) → `Idle` (on accept or reject).

pub mod session;

pub use session::{AssistantSession, AssistantState, Submit};
