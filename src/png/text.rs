//! `tEXt` chunk decoding and the prompt/parameter fields stored in them.

use serde_json::Value;
use tracing::warn;

use super::types::ImageMetadata;

const WORKFLOW_KEY: &str = "workflow";
const PROMPT_KEY: &str = "prompt";
const PARAMETERS_KEY: &str = "parameters";

/// Generation settings copied verbatim from a prompt/parameters chunk.
pub const PARAMETER_KEYS: &[&str] = &[
    "seed",
    "steps",
    "cfg",
    "sampler",
    "scheduler",
    "denoise",
    "width",
    "height",
    "model",
    "vae",
    "clip",
];

/// Split a `tEXt` payload at its first NUL into `(key, value)`. Without a NUL
/// the whole payload is the key and the value is empty.
pub fn split_text_chunk(data: &[u8]) -> (String, String) {
    match data.iter().position(|&b| b == 0) {
        Some(nul) => (
            String::from_utf8_lossy(&data[..nul]).into_owned(),
            String::from_utf8_lossy(&data[nul + 1..]).into_owned(),
        ),
        None => (String::from_utf8_lossy(data).into_owned(), String::new()),
    }
}

/// Record a `tEXt` chunk and interpret the keys that carry JSON.
pub(crate) fn apply_text_chunk(metadata: &mut ImageMetadata, data: &[u8]) {
    let (key, value) = split_text_chunk(data);

    match key.as_str() {
        WORKFLOW_KEY => match serde_json::from_str::<Value>(&value) {
            Ok(Value::Null) => {}
            Ok(workflow) => metadata.workflow = Some(workflow),
            Err(e) => warn!(error = %e, "failed to parse embedded workflow JSON"),
        },
        PROMPT_KEY | PARAMETERS_KEY => match serde_json::from_str::<Value>(&value) {
            Ok(data) => apply_prompt_data(metadata, &data),
            Err(e) => warn!(key = %key, error = %e, "failed to parse prompt data"),
        },
        _ => {}
    }

    metadata.chunks.insert(key, value);
}

/// Copy prompt text and allow-listed parameters out of a parsed chunk.
/// Later chunks overwrite what earlier ones set.
pub fn apply_prompt_data(metadata: &mut ImageMetadata, data: &Value) {
    if let Some(prompt) = present_text(data.get("prompt")) {
        metadata.prompt = Some(prompt);
    }

    let negative = present_text(data.get("negative_prompt"))
        .or_else(|| present_text(data.get("negativePrompt")));
    if let Some(negative) = negative {
        metadata.negative_prompt = Some(negative);
    }

    for &key in PARAMETER_KEYS {
        if let Some(value) = data.get(key) {
            metadata.parameters.insert(key.to_string(), value.clone());
        }
    }
}

/// Text form of a value that is present and non-empty. `null`, `false`, `0`
/// and `""` count as absent; structured values are rendered as JSON.
fn present_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
