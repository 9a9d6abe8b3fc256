//! Supported chat-completion models
//!
//! Static catalog of the model identifiers the bridge accepts, with the
//! cost/description metadata surfaced by `GET /api/models`.

use serde::Serialize;

/// Default model when the request specifies none
pub const DEFAULT_MODEL: &str = "gpt-4o-nano";

/// Cost and description metadata for one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub cost: &'static str,
}

const MODELS: &[(&str, ModelInfo)] = &[
    (
        "gpt-4o-nano",
        ModelInfo {
            name: "GPT-4o Nano",
            description: "Fastest and cheapest (recommended)",
            cost: "input $0.15/1M tokens, output $0.60/1M tokens",
        },
    ),
    (
        "gpt-4o-mini",
        ModelInfo {
            name: "GPT-4o Mini",
            description: "Balanced performance",
            cost: "input $0.15/1M tokens, output $0.60/1M tokens",
        },
    ),
    (
        "gpt-3.5-turbo",
        ModelInfo {
            name: "GPT-3.5 Turbo",
            description: "Stable performance",
            cost: "input $0.50/1M tokens, output $1.50/1M tokens",
        },
    ),
];

/// The static model catalog
pub struct ModelCatalog;

impl ModelCatalog {
    /// Look up one model's metadata
    pub fn get(model: &str) -> Option<&'static ModelInfo> {
        MODELS.iter().find(|(id, _)| *id == model).map(|(_, m)| m)
    }

    /// True when the identifier is a supported model
    pub fn contains(model: &str) -> bool {
        Self::get(model).is_some()
    }

    /// All supported model identifiers, in catalog order
    pub fn ids() -> Vec<&'static str> {
        MODELS.iter().map(|(id, _)| *id).collect()
    }

    /// All models with metadata, in catalog order
    pub fn all() -> Vec<(&'static str, &'static ModelInfo)> {
        MODELS.iter().map(|(id, m)| (*id, m)).collect()
    }

    /// The default model identifier
    pub fn default_model() -> &'static str {
        DEFAULT_MODEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_is_in_catalog() {
        assert!(ModelCatalog::contains(DEFAULT_MODEL));
    }

    #[test]
    fn unknown_model_is_absent() {
        assert!(!ModelCatalog::contains("gpt-99"));
        assert!(ModelCatalog::get("gpt-99").is_none());
    }

    #[test]
    fn ids_are_stable_and_complete() {
        assert_eq!(
            ModelCatalog::ids(),
            vec!["gpt-4o-nano", "gpt-4o-mini", "gpt-3.5-turbo"]
        );
    }
}
