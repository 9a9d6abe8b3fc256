//! Best-effort parsing of completion text into suggestions
//!
//! The model is instructed to answer in JSON, but the reply is free
//! text. We extract the first `{...}` block and deserialize it; when
//! that fails the raw text is surfaced as a single error-tagged
//! suggestion so the user still sees what came back. Parsing never
//! fails the request.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;
use uuid::Uuid;

/// Kind of structural edit a suggestion describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    AddNode,
    ModifyNode,
    AddConnection,
    Restructure,
    /// Parseable reply without a recognized suggestion list
    Info,
    /// Unparseable reply, surfaced verbatim
    Error,
}

impl SuggestionKind {
    fn from_wire(kind: &str) -> Self {
        match kind {
            "add_node" => Self::AddNode,
            "modify_node" => Self::ModifyNode,
            "add_connection" => Self::AddConnection,
            "restructure" => Self::Restructure,
            _ => Self::Info,
        }
    }
}

/// One parsed suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Generated identifier (`suggestion-{uuid}`)
    pub id: String,

    #[serde(rename = "type")]
    pub kind: SuggestionKind,

    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// Suggestion-specific detail object, passed through verbatim
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,

    /// Raw reply content for info/error suggestions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl Suggestion {
    fn with_id(kind: SuggestionKind, description: impl Into<String>) -> Self {
        Self {
            id: format!("suggestion-{}", Uuid::new_v4()),
            kind,
            description: description.into(),
            priority: None,
            details: Value::Null,
            content: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSuggestion {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    details: Value,
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    suggestions: Option<Vec<RawSuggestion>>,
}

fn json_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Same extraction the editor used: the first brace to the last
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static regex"))
}

/// Parse a completion reply into suggestions
///
/// Always returns at least one suggestion; a reply that cannot be
/// parsed becomes one `Error`-kind suggestion carrying the raw text.
pub fn parse_response(raw: &str) -> Vec<Suggestion> {
    let Some(block) = json_block_regex().find(raw) else {
        warn!("No JSON block in completion reply");
        let mut fallback = Suggestion::with_id(SuggestionKind::Error, "AI応答の解析に失敗しました");
        fallback.content = Some(raw.to_string());
        return vec![fallback];
    };

    let parsed: Value = match serde_json::from_str(block.as_str()) {
        Ok(value) => value,
        Err(e) => {
            warn!("Completion reply JSON parse error: {}", e);
            let mut fallback =
                Suggestion::with_id(SuggestionKind::Error, "AI応答の解析に失敗しました");
            fallback.content = Some(raw.to_string());
            return vec![fallback];
        }
    };

    let envelope: RawEnvelope = match serde_json::from_value(parsed.clone()) {
        Ok(env) => env,
        Err(_) => RawEnvelope { suggestions: None },
    };

    match envelope.suggestions {
        Some(suggestions) if !suggestions.is_empty() => suggestions
            .into_iter()
            .map(|raw| {
                let kind = raw
                    .kind
                    .as_deref()
                    .map(SuggestionKind::from_wire)
                    .unwrap_or(SuggestionKind::Info);
                Suggestion {
                    id: format!("suggestion-{}", Uuid::new_v4()),
                    kind,
                    description: raw.description.unwrap_or_else(|| "AIからの提案".to_string()),
                    priority: raw.priority,
                    details: raw.details,
                    content: None,
                }
            })
            .collect(),
        _ => {
            // valid JSON without a suggestion list: surface it as info
            let mut info = Suggestion::with_id(SuggestionKind::Info, "AIからの提案");
            info.content = Some(parsed.to_string());
            vec![info]
        }
    }
}
