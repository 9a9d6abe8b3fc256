//! Mind-map document save/load
//!
//! The saved state is a single JSON document: the node/edge collections
//! plus the layout style and selected color, a save timestamp, and a
//! display name. Loading validates the presence of `nodes` and `edges`
//! only; every other field falls back to its default so documents from
//! older editor versions keep loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::models::{Edge, LayoutStyle, Node};

/// Errors for document save/load operations
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

fn default_node_color() -> String {
    "#87CEEB".to_string()
}

fn default_name() -> String {
    "mindmap".to_string()
}

/// Saved editor state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MindMapDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,

    #[serde(default)]
    pub layout_style: LayoutStyle,

    #[serde(default = "default_node_color")]
    pub selected_node_color: String,

    /// Set when the document was last saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(default = "default_name")]
    pub name: String,
}

impl MindMapDocument {
    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document from JSON
    ///
    /// Only `nodes` and `edges` are required; all other fields default.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("nodes").is_none() {
            return Err(DocumentError::MissingField("nodes"));
        }
        if value.get("edges").is_none() {
            return Err(DocumentError::MissingField("edges"));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Save to a file, stamping the save time
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        self.timestamp = Some(Utc::now());
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path.as_ref(), self.to_json()?)?;
        info!(
            "💾 Saved mind map '{}' ({} nodes, {} edges) to {}",
            self.name,
            self.nodes.len(),
            self.edges.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Load from a file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let doc = Self::from_json(&json)?;
        info!(
            "📂 Loaded mind map '{}' ({} nodes, {} edges) from {}",
            doc.name,
            doc.nodes.len(),
            doc.edges.len(),
            path.as_ref().display()
        );
        Ok(doc)
    }
}

/// Default directory for saved mind maps
///
/// Centralized data directory pattern:
/// - macOS/Linux: `~/.mindgraph/maps/`
/// - Windows: `%USERPROFILE%\.mindgraph\maps\`
pub fn default_maps_dir() -> Result<PathBuf, std::io::Error> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine home directory",
        )
    })?;

    Ok(home_dir.join(".mindgraph").join("maps"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_requires_nodes_and_edges() {
        let err = MindMapDocument::from_json(r#"{"edges": []}"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingField("nodes")));

        let err = MindMapDocument::from_json(r#"{"nodes": []}"#).unwrap_err();
        assert!(matches!(err, DocumentError::MissingField("edges")));
    }

    #[test]
    fn default_maps_dir_is_under_home() {
        let dir = default_maps_dir().unwrap();
        assert!(dir.ends_with(".mindgraph/maps"));
    }

    #[test]
    fn from_json_defaults_optional_fields() {
        let doc = MindMapDocument::from_json(r#"{"nodes": [], "edges": []}"#).unwrap();
        assert_eq!(doc.layout_style, LayoutStyle::Vertical);
        assert_eq!(doc.selected_node_color, "#87CEEB");
        assert_eq!(doc.name, "mindmap");
        assert!(doc.timestamp.is_none());
    }
}
