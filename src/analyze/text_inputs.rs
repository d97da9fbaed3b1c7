//! Pull prompt text and LoRA references out of a workflow's nodes.
//!
//! Pass 1 maps each node feeding a conditioning input to that input's name.
//! It reads the links directly, so a link whose target node is missing still
//! assigns a role to its source.
//! Pass 2 walks nodes in document order and classifies their first widget.

use std::collections::HashMap;

use serde_json::Value;

use super::types::{TextInputEntry, TextInputKind};
use crate::parse::types::{Link, NodeRecord, WorkflowDocument};

const CONDITIONING_INPUTS: &[&str] = &["positive", "negative", "conditioning_1", "conditioning_2"];

/// Case-sensitive `type` substrings of nodes holding free text.
const TEXT_NODE_MARKERS: &[&str] = &["CLIPTextEncode", "Text", "Prompt", "String"];

const LORA_MARKER: &str = "LoRA";
const UNKNOWN_ROLE: &str = "unknown";
const DEFAULT_LORA_STRENGTH: f64 = 1.0;

pub fn extract_text_inputs(document: &WorkflowDocument) -> Vec<TextInputEntry> {
    let roles = conditioning_roles(&document.links);

    let mut entries = Vec::new();
    for node in &document.nodes {
        let node_type = node.type_name();

        if TEXT_NODE_MARKERS.iter().any(|m| node_type.contains(m)) {
            if let Some(text) = first_text_widget(node) {
                let role = roles
                    .get(&node.id.to_string())
                    .map_or(UNKNOWN_ROLE, String::as_str);
                entries.push(TextInputEntry {
                    node_id: node.id.clone(),
                    node_type: node_type.to_string(),
                    text: text.to_string(),
                    kind: classify(node_type, role),
                    role: Some(role.to_string()),
                    strength: None,
                });
            }
        }

        // Not exclusive with the branch above.
        if node_type.contains(LORA_MARKER) {
            if let Some(name) = first_text_widget(node) {
                let strength = match node.widgets_values.get(1) {
                    None | Some(Value::Null) => Value::from(DEFAULT_LORA_STRENGTH),
                    Some(value) => value.clone(),
                };
                entries.push(TextInputEntry {
                    node_id: node.id.clone(),
                    node_type: node_type.to_string(),
                    text: format!("LoRA: {}", name),
                    kind: TextInputKind::Lora,
                    role: None,
                    strength: Some(strength),
                });
            }
        }
    }

    entries
}

/// `source node id -> conditioning input name`, last link wins.
pub fn conditioning_roles(links: &[Link]) -> HashMap<String, String> {
    let mut roles = HashMap::new();
    for link in links {
        let (Some(source), Some(input)) = (&link.source, link.target_input.as_deref()) else {
            continue;
        };
        if CONDITIONING_INPUTS.contains(&input) {
            roles.insert(source.to_string(), input.to_string());
        }
    }
    roles
}

fn classify(node_type: &str, role: &str) -> TextInputKind {
    match role {
        "positive" | "conditioning_1" => TextInputKind::PositivePrompt,
        "negative" | "conditioning_2" => TextInputKind::NegativePrompt,
        _ if node_type.contains("Regional") => TextInputKind::RegionalPrompt,
        _ if node_type.contains("Style") => TextInputKind::StylePrompt,
        _ => TextInputKind::Other,
    }
}

/// First widget value if it is a string with non-whitespace content. The text
/// is returned untrimmed.
fn first_text_widget(node: &NodeRecord) -> Option<&str> {
    node.widgets_values
        .first()
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
