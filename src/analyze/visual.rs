//! Normalize nodes and links into the renderer's node/edge shape.

use tracing::debug;

use super::types::{VisualEdge, VisualGraph, VisualNode, VisualNodeData};
use crate::parse::types::{Link, NodeRecord, WorkflowDocument};

const NODE_KIND: &str = "custom";

pub fn build_visual_graph(document: &WorkflowDocument) -> VisualGraph {
    VisualGraph {
        nodes: document.nodes.iter().map(visual_node).collect(),
        edges: document.links.iter().filter_map(visual_edge).collect(),
    }
}

fn visual_node(node: &NodeRecord) -> VisualNode {
    VisualNode {
        id: node.id.to_string(),
        position: node.pos.map(Into::into).unwrap_or_default(),
        data: VisualNodeData {
            label: node.label().to_string(),
            node_type: node.node_type.clone(),
            properties: node.properties.clone(),
            widgets: node.widgets_values.clone(),
            inputs: node.inputs.clone(),
            outputs: node.outputs.clone(),
        },
        kind: NODE_KIND,
    }
}

/// Edge keyed `e<linkId>`. Links missing an id or an endpoint are dropped.
fn visual_edge(link: &Link) -> Option<VisualEdge> {
    let (Some(id), Some(source), Some(target)) = (&link.id, &link.source, &link.target) else {
        debug!(?link, "link lacks id or endpoints, no visual edge");
        return None;
    };
    Some(VisualEdge {
        id: format!("e{}", id),
        source: source.to_string(),
        target: target.to_string(),
        animated: true,
    })
}
