//! MindGraph Assist Engine - AI Proposal Bridge
//!
//! This crate forwards the current mind-map state plus free-text user
//! intent to a chat-completion API and turns the response into concrete
//! graph-edit proposals: provisional nodes and edges the editor inserts
//! pending user confirmation.
//!
//! # Features
//!
//! - **Model catalog**: the supported chat models with cost metadata
//! - **Graph analysis**: roots, leaves, and counts summarized for the prompt
//! - **Deterministic planner**: explicit add-child requests are planned
//!   locally without any network call
//! - **Best-effort parsing**: malformed completions degrade to an
//!   error-tagged suggestion instead of a failure
//!
//! # Example
//!
//! ```ignore
//! use mindgraph_assist::{AssistEngine, MindMapState, OpenAiBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = AssistEngine::new(OpenAiBackend::default());
//!     let outcome = engine
//!         .process(state, "sk-...", Some("gpt-4o-nano"))
//!         .await?;
//!     println!("{} proposal(s)", outcome.proposals.len());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod backend;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod parser;
pub mod planner;
pub mod prompt;

// Re-export main types
pub use analysis::{analyze, MindMapAnalysis};
pub use backend::{ChatBackend, ChatRequest, OpenAiBackend};
pub use catalog::{ModelCatalog, ModelInfo, DEFAULT_MODEL};
pub use engine::{AssistEngine, AssistOutcome, MindMapState, ProposalPayload};
pub use error::{AssistError, Result};
pub use parser::{parse_response, Suggestion, SuggestionKind};
