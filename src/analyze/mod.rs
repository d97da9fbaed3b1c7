//! Analysis phase: WorkflowDocument → graph, model inventory, node info, stats.
//!
//! Every step is a pure function of the document and can be called on its own.
//! Analysis never fails; a missing document yields the zero-value result.

pub mod catalog;
pub mod category;
pub mod models;
pub mod nodes;
pub mod stats;
pub mod text_inputs;
pub mod types;
pub mod visual;

pub use category::{Category, category_of};
pub use text_inputs::extract_text_inputs;
pub use types::*;

use serde_json::Value;

use crate::error::InspectError;
use crate::parse::{self, WorkflowDocument};

pub fn analyze(document: &WorkflowDocument) -> WorkflowAnalysis {
    WorkflowAnalysis {
        graph: visual::build_visual_graph(document),
        models: models::extract_models(document),
        node_info: nodes::extract_node_info(document),
        stats: stats::calculate_stats(document),
    }
}

/// Analyze a raw JSON value. Anything that is not a workflow (null, no
/// `nodes` array) gives the zero-value result.
pub fn analyze_value(value: &Value) -> WorkflowAnalysis {
    parse::parse_document(value)
        .map(|document| analyze(&document))
        .unwrap_or_default()
}

/// Analyze workflow JSON text. Fails only when the text is not JSON.
pub fn analyze_json(json: &str) -> Result<WorkflowAnalysis, InspectError> {
    Ok(parse::parse(json)?
        .map(|document| analyze(&document))
        .unwrap_or_default())
}
