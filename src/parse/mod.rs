//! Parse phase: raw workflow JSON → `WorkflowDocument`.

pub mod types;

pub use types::*;

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::InspectError;

/// Deserialize workflow JSON text. `Ok(None)` means the text was valid JSON
/// but not a workflow (null, or no `nodes` array), which analysis treats as
/// the empty document.
pub fn parse(json: &str) -> Result<Option<WorkflowDocument>, InspectError> {
    let value = serde_json::from_str::<Value>(json).map_err(|e| {
        InspectError::parse("P001", format!("Failed to parse workflow JSON: {}", e))
    })?;
    Ok(parse_document(&value))
}

/// Decode an already-parsed JSON value. Never fails on content: undecodable
/// node entries are skipped, unrecognized link entries become empty links.
pub fn parse_document(value: &Value) -> Option<WorkflowDocument> {
    let raw_nodes = value.get("nodes")?.as_array()?;

    let mut nodes = Vec::with_capacity(raw_nodes.len());
    for (index, raw) in raw_nodes.iter().enumerate() {
        match NodeRecord::deserialize(raw) {
            Ok(node) => nodes.push(node),
            Err(e) => warn!(index, error = %e, "skipping undecodable node record"),
        }
    }

    let by_id: HashMap<String, &NodeRecord> =
        nodes.iter().map(|n| (n.id.to_string(), n)).collect();

    let links = value
        .get("links")
        .and_then(Value::as_array)
        .map(|raw_links| {
            raw_links
                .iter()
                .enumerate()
                .map(|(index, raw)| match LinkRecord::deserialize(raw) {
                    Ok(record) => {
                        let target = record
                            .target_ref()
                            .and_then(|id| by_id.get(&id.to_string()).copied());
                        record.canonicalize(target)
                    }
                    Err(e) => {
                        debug!(index, error = %e, "unrecognized link entry");
                        Link::default()
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    Some(WorkflowDocument { nodes, links })
}
