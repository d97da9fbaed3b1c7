//! Output shapes of the analysis pass. All plain data, serializable without
//! cycles; key names follow the frontend's camelCase convention.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::category::Category;
use crate::parse::types::{PortRecord, Position, RecordId, Size};

// =============================================================================
// TOP-LEVEL RESULT
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowAnalysis {
    pub graph: VisualGraph,
    pub models: Vec<ModelEntry>,
    pub node_info: Vec<NodeDescriptor>,
    pub stats: WorkflowStats,
}

// =============================================================================
// VISUAL GRAPH
// =============================================================================

#[derive(Debug, Clone, Default, Serialize)]
pub struct VisualGraph {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisualNode {
    pub id: String,
    pub position: Position,
    pub data: VisualNodeData,
    /// Renderer component key; always `"custom"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisualNodeData {
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub properties: Map<String, Value>,
    pub widgets: Vec<Value>,
    pub inputs: Vec<PortRecord>,
    pub outputs: Vec<PortRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub animated: bool,
}

// =============================================================================
// MODEL INVENTORY
// =============================================================================

/// One distinct `(type, name)` model reference across the workflow.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub model_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub count: usize,
    /// Distinct node `type` strings that reference this model.
    pub nodes: Vec<String>,
    pub node_ids: Vec<String>,
}

// =============================================================================
// NODE DESCRIPTORS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NodeDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    pub title: String,
    pub category: Category,
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub properties: Map<String, Value>,
    pub widgets: Vec<Value>,
    pub inputs: Vec<InputInfo>,
    pub outputs: Vec<OutputInfo>,
    pub order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub port_type: String,
    pub connected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub port_type: String,
    pub connections: usize,
}

// =============================================================================
// STATS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStats {
    pub total_nodes: usize,
    pub total_links: usize,
    pub node_types: BTreeMap<String, usize>,
    pub node_categories: BTreeMap<Category, usize>,
}

// =============================================================================
// TEXT INPUTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextInputKind {
    #[serde(rename = "Positive Prompt")]
    PositivePrompt,
    #[serde(rename = "Negative Prompt")]
    NegativePrompt,
    #[serde(rename = "Regional Prompt")]
    RegionalPrompt,
    #[serde(rename = "Style Prompt")]
    StylePrompt,
    #[serde(rename = "LoRA")]
    Lora,
    #[serde(rename = "Other Text Input")]
    Other,
}

/// A piece of free text (or a LoRA reference) pulled out of a workflow node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInputEntry {
    pub node_id: RecordId,
    pub node_type: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: TextInputKind,
    /// Conditioning role of the node (`"positive"`, `"negative"`, ...) or
    /// `"unknown"`. LoRA entries carry none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<Value>,
}
