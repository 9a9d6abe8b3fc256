//! Assistant session state machine
//!
//! Tracks where the AI proposal workflow stands so the editor can gate
//! the submit affordance. One session per editor; at most one request in
//! flight and at most one proposal pending.
//!
//! # States
//!
//! - `Idle`: ready for a new request
//! - `Processing`: a request is in flight (no cancellation, no timeout;
//!   navigating away simply abandons the request)
//! - `ProposalPending`: a proposal awaits accept/reject
//!
//! A submit with empty input, while processing, or while a proposal is
//! pending is a no-op. A network or parse failure returns to `Idle` and
//! surfaces the error; nothing is retried.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Workflow state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "state")]
pub enum AssistantState {
    #[default]
    Idle,
    Processing,
    ProposalPending {
        #[serde(rename = "proposalId")]
        proposal_id: String,
    },
}

/// Outcome of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
    /// The request may proceed; the session is now `Processing`
    Started,
    /// Empty input or a request/proposal already in progress; no change
    Ignored,
}

/// The assistant session
#[derive(Debug, Clone, Default)]
pub struct AssistantSession {
    state: AssistantState,
    last_error: Option<String>,
}

impl AssistantSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AssistantState {
        &self.state
    }

    /// The error surfaced by the most recent failure, cleared on the
    /// next successful submit
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True when the submit affordance should be enabled
    pub fn can_submit(&self) -> bool {
        self.state == AssistantState::Idle
    }

    /// Attempt to start a request
    ///
    /// Returns [`Submit::Ignored`] without any state change when the
    /// trimmed input is empty or the session is not idle.
    pub fn submit(&mut self, input: &str) -> Submit {
        if input.trim().is_empty() {
            debug!("Ignoring empty assistant input");
            return Submit::Ignored;
        }
        if self.state != AssistantState::Idle {
            debug!("Ignoring submit while {:?}", self.state);
            return Submit::Ignored;
        }

        self.state = AssistantState::Processing;
        self.last_error = None;
        Submit::Started
    }

    /// A response produced a proposal; wait for accept/reject
    ///
    /// Only meaningful while `Processing`; otherwise ignored.
    pub fn complete(&mut self, proposal_id: impl Into<String>) {
        if self.state != AssistantState::Processing {
            warn!("complete() outside Processing, ignoring");
            return;
        }
        self.state = AssistantState::ProposalPending {
            proposal_id: proposal_id.into(),
        };
    }

    /// The request failed; return to idle and surface the error
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("Assistant request failed: {}", message);
        self.state = AssistantState::Idle;
        self.last_error = Some(message);
    }

    /// The pending proposal was accepted or rejected
    pub fn resolve(&mut self) {
        if matches!(self.state, AssistantState::ProposalPending { .. }) {
            self.state = AssistantState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_a_no_op() {
        let mut session = AssistantSession::new();
        assert_eq!(session.submit("   "), Submit::Ignored);
        assert_eq!(session.state(), &AssistantState::Idle);
    }

    #[test]
    fn submit_while_processing_is_a_no_op() {
        let mut session = AssistantSession::new();
        assert_eq!(session.submit("add a node"), Submit::Started);
        assert_eq!(session.submit("another request"), Submit::Ignored);
        assert_eq!(session.state(), &AssistantState::Processing);
    }

    #[test]
    fn submit_while_pending_is_disallowed() {
        let mut session = AssistantSession::new();
        session.submit("add a node");
        session.complete("proposal-1");
        assert!(!session.can_submit());
        assert_eq!(session.submit("more"), Submit::Ignored);
    }

    #[test]
    fn failure_returns_to_idle_with_error() {
        let mut session = AssistantSession::new();
        session.submit("add a node");
        session.fail("connection refused");
        assert_eq!(session.state(), &AssistantState::Idle);
        assert_eq!(session.last_error(), Some("connection refused"));
        // editor stays usable: a fresh submit is allowed
        assert_eq!(session.submit("retry by hand"), Submit::Started);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn resolve_returns_to_idle() {
        let mut session = AssistantSession::new();
        session.submit("add a node");
        session.complete("proposal-1");
        session.resolve();
        assert!(session.can_submit());
    }
}
