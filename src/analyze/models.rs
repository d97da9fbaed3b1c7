//! Model/asset inventory: which checkpoints, LoRAs, VAEs, ... a workflow needs.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::types::ModelEntry;
use crate::parse::types::{NodeRecord, WorkflowDocument};

// ---------------------------------------------------------------------------
// Heuristic tables
// ---------------------------------------------------------------------------

/// Lower-cased `type` substrings that mark a node as referencing a model.
const MODEL_KEYWORDS: &[&str] = &[
    "loader",
    "checkpoint",
    "model",
    "lora",
    "vae",
    "clip",
    "controlnet",
];

/// Model type by lower-cased `type` substring, first match wins.
const MODEL_TYPE_RULES: &[(&str, &str)] = &[
    ("vae", "VAE"),
    ("clip", "CLIP"),
    ("lora", "LoRA"),
    ("controlnet", "ControlNet"),
    ("unet", "UNET"),
    ("checkpoint", "Checkpoint"),
];

const FORMAT_SUFFIXES: &[(&str, &str)] = &[
    (".safetensors", "SafeTensors"),
    (".ckpt", "Checkpoint"),
    (".pt", "PyTorch"),
    (".pth", "PyTorch"),
];

const PRECISION_TAGS: &[&str] = &["fp16", "fp32", "bf16", "fp8_e4m3fn"];

const SOURCE_MARKERS: &[(&str, &str)] = &[("sd_", "Stable Diffusion"), ("flux", "Flux")];

pub const UNKNOWN_MODEL: &str = "Unknown Model";

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[vV](\d+(\.\d+)*)").expect("valid regex"));

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

pub fn is_model_node(node_type: &str) -> bool {
    let lowered = node_type.to_lowercase();
    MODEL_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Build the deduplicated model inventory, in first-seen order.
/// Entries are keyed by `type:name`.
pub fn extract_models(document: &WorkflowDocument) -> Vec<ModelEntry> {
    let mut entries: Vec<ModelEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for node in document.nodes.iter().filter(|n| is_model_node(n.type_name())) {
        let entry = model_entry(node);
        let key = format!("{}:{}", entry.model_type, entry.name);

        match index.get(&key) {
            Some(&i) => {
                let existing = &mut entries[i];
                existing.count += 1;
                if !existing.nodes.iter().any(|t| t == node.type_name()) {
                    existing.nodes.push(node.type_name().to_string());
                }
                existing.node_ids.push(node.id.to_string());
            }
            None => {
                index.insert(key, entries.len());
                entries.push(entry);
            }
        }
    }

    entries
}

/// Describe the model a single node references, with `count = 1`.
pub fn model_entry(node: &NodeRecord) -> ModelEntry {
    let name = model_name(&node.widgets_values);

    ModelEntry {
        model_type: model_type_for(node.type_name()),
        path: model_path(node),
        version: model_version(&name),
        format: model_format(&name, node.widgets_values.get(1)),
        source: model_source(&name),
        count: 1,
        nodes: vec![node.type_name().to_string()],
        node_ids: vec![node.id.to_string()],
        name,
    }
}

pub fn model_type_for(node_type: &str) -> String {
    let lowered = node_type.to_lowercase();
    MODEL_TYPE_RULES
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| {
            node_type
                .strip_suffix("Loader")
                .unwrap_or(node_type)
                .to_string()
        })
}

fn model_name(widgets: &[Value]) -> String {
    match widgets.first() {
        None | Some(Value::Null) => UNKNOWN_MODEL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn model_format(name: &str, precision: Option<&Value>) -> Option<String> {
    let base = FORMAT_SUFFIXES
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix))
        .map(|&(_, format)| format);
    let precision = precision
        .and_then(Value::as_str)
        .filter(|p| PRECISION_TAGS.contains(p));

    match (base, precision) {
        (Some(base), Some(p)) => Some(format!("{} ({})", base, p)),
        (None, Some(p)) => Some(format!("({})", p)),
        (base, None) => base.map(str::to_string),
    }
}

fn model_version(name: &str) -> Option<String> {
    VERSION_RE.find(name).map(|m| m.as_str().to_string())
}

fn model_source(name: &str) -> Option<String> {
    SOURCE_MARKERS
        .iter()
        .find(|(marker, _)| name.contains(marker))
        .map(|(_, source)| source.to_string())
}

fn model_path(node: &NodeRecord) -> Option<String> {
    match node.properties.get("path")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
