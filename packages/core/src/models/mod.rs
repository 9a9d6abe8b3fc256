//! Data structures for the MindGraph editor
//!
//! All wire-facing structs serialize as camelCase JSON so the browser
//! editor and the companion service share one representation.

pub mod document;
pub mod edge;
pub mod node;
pub mod proposal;

pub use document::{default_maps_dir, DocumentError, MindMapDocument};
pub use edge::{Edge, EdgeStroke};
pub use node::{BorderStyle, LayoutStyle, Node, NodeStyle, Position};
pub use proposal::{Proposal, ProposalDraft};
