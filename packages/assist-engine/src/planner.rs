//! Deterministic local planner
//!
//! Explicit add-child requests are planned without any network call:
//! the editor's original assistant matched these patterns client-side
//! before ever reaching the API. The planner recognizes
//! `＜ラベル＞に子ノードを生成してください` and add-keyword requests
//! (「追加」/ "add"), resolves the target node by label, and plans the
//! requested number of children. Free-form input returns `None` and
//! goes to the chat backend instead.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use mindgraph_core::{Edge, Node};

/// Upper bound on children planned from one request
const MAX_PLANNED_CHILDREN: usize = 5;

/// A locally planned add-children edit
#[derive(Debug, Clone, PartialEq)]
pub struct LocalPlan {
    /// Target parent node id, `None` when the graph is empty
    pub parent_id: Option<String>,
    /// Number of children to create
    pub count: usize,
    /// Human-readable description for the proposal panel
    pub description: String,
}

fn generate_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"＜(.+?)＞に子ノードを生成してください").expect("static regex"))
}

fn count_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9０-９]+").expect("static regex"))
}

fn counter_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([0-9０-９]+)\s*[個つ本件]").expect("static regex"))
}

/// True when the input asks to add something
fn is_add_request(input: &str) -> bool {
    let lowered = input.to_lowercase();
    input.contains("追加") || lowered.contains("add ") || lowered.ends_with("add")
}

/// Parse the requested child count (ASCII or full-width digits), capped
///
/// The parent label is stripped first so digits inside labels like
/// `サブアイデア1` never count. A number followed by a counter word
/// (個/つ) wins over a bare number.
fn requested_count(input: &str, parent_label: Option<&str>) -> usize {
    let stripped;
    let haystack = match parent_label {
        Some(label) if !label.is_empty() => {
            stripped = input.replace(label, "");
            stripped.as_str()
        }
        _ => input,
    };

    let digits = counter_pattern()
        .captures(haystack)
        .map(|captures| captures[1].to_string())
        .or_else(|| {
            count_pattern()
                .find(haystack)
                .map(|m| m.as_str().to_string())
        });

    let count = digits
        .and_then(|digits| {
            digits
                .chars()
                .map(|c| c.to_digit(10).or_else(|| full_width_digit(c)))
                .collect::<Option<Vec<u32>>>()
        })
        .map(|digits| digits.iter().fold(0usize, |acc, d| acc * 10 + *d as usize))
        .unwrap_or(1);
    count.clamp(1, MAX_PLANNED_CHILDREN)
}

fn full_width_digit(c: char) -> Option<u32> {
    ('０'..='９')
        .contains(&c)
        .then(|| c as u32 - '０' as u32)
}

/// Find the node whose label appears in the input, preferring the
/// longest label so "メインサブアイデア" beats "サブアイデア"
fn find_mentioned_node<'a>(input: &str, nodes: &'a [Node]) -> Option<&'a Node> {
    nodes
        .iter()
        .filter(|n| !n.label.is_empty() && input.contains(&n.label))
        .max_by_key(|n| n.label.len())
}

/// Fall back to a root node (no incoming edge), then to the first node
fn fallback_parent<'a>(nodes: &'a [Node], edges: &[Edge]) -> Option<&'a Node> {
    nodes
        .iter()
        .find(|n| !edges.iter().any(|e| e.target == n.id))
        .or_else(|| nodes.first())
}

/// Plan an add-children edit, or `None` for free-form input
pub fn plan(input: &str, nodes: &[Node], edges: &[Edge]) -> Option<LocalPlan> {
    // explicit generate-children pattern takes precedence
    if let Some(captures) = generate_pattern().captures(input) {
        let label = &captures[1];
        let parent = nodes.iter().find(|n| n.label == label.trim())?;
        debug!("Planner matched generate pattern for '{}'", label);
        return Some(LocalPlan {
            parent_id: Some(parent.id.clone()),
            count: requested_count(input, Some(&parent.label)),
            description: format!("「{}」に子ノードを生成します", parent.label),
        });
    }

    if !is_add_request(input) {
        return None;
    }

    let parent = find_mentioned_node(input, nodes).or_else(|| fallback_parent(nodes, edges));
    let count = requested_count(input, parent.map(|p| p.label.as_str()));

    let description = match parent {
        Some(parent) => format!("「{}」に{}個のノードを追加します", parent.label, count),
        None => format!("{}個のノードを追加します", count),
    };

    debug!(
        "Planner matched add request: count={}, parent={:?}",
        count,
        parent.map(|p| p.id.as_str())
    );

    Some(LocalPlan {
        parent_id: parent.map(|p| p.id.clone()),
        count,
        description,
    })
}
