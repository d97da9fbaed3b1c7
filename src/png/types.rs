use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::analyze::types::{TextInputEntry, WorkflowAnalysis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Width and height from an `IHDR` payload (first 8 bytes, big-endian).
    pub fn from_ihdr(data: &[u8]) -> Option<Self> {
        let width = data.get(0..4)?;
        let height = data.get(4..8)?;
        Some(Dimensions {
            width: u32::from_be_bytes([width[0], width[1], width[2], width[3]]),
            height: u32::from_be_bytes([height[0], height[1], height[2], height[3]]),
        })
    }
}

/// Everything recovered from a PNG's metadata chunks.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub dimensions: Option<Dimensions>,
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
    pub parameters: Map<String, Value>,
    /// The embedded workflow document exactly as stored.
    pub workflow: Option<Value>,
    /// Every `tEXt` key/value pair; a repeated key keeps the last value.
    pub chunks: BTreeMap<String, String>,
    pub all_text_inputs: Vec<TextInputEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<WorkflowAnalysis>,
}
