//! Aggregate counts over a workflow.

use super::category::category_of;
use super::types::WorkflowStats;
use crate::parse::types::WorkflowDocument;

/// Single pass over the nodes. Nodes without a `type` count toward
/// `node_categories` (as `Other`) but not toward `node_types`.
pub fn calculate_stats(document: &WorkflowDocument) -> WorkflowStats {
    let mut stats = WorkflowStats {
        total_nodes: document.nodes.len(),
        total_links: document.links.len(),
        ..Default::default()
    };

    for node in &document.nodes {
        if let Some(node_type) = node.node_type.as_deref() {
            *stats.node_types.entry(node_type.to_string()).or_insert(0) += 1;
        }
        *stats
            .node_categories
            .entry(category_of(node.type_name()))
            .or_insert(0) += 1;
    }

    stats
}
