//! Per-node descriptors with connectivity annotations.

use super::category::category_of;
use super::types::{InputInfo, NodeDescriptor, OutputInfo};
use crate::parse::types::{NodeRecord, WorkflowDocument};

pub fn extract_node_info(document: &WorkflowDocument) -> Vec<NodeDescriptor> {
    document.nodes.iter().map(describe_node).collect()
}

pub fn describe_node(node: &NodeRecord) -> NodeDescriptor {
    let inputs = node
        .inputs
        .iter()
        .map(|input| InputInfo {
            name: input.name.clone(),
            port_type: input.port_type.clone(),
            connected: input.link.is_some(),
        })
        .collect();

    let outputs = node
        .outputs
        .iter()
        .map(|output| OutputInfo {
            name: output.name.clone(),
            port_type: output.port_type.clone(),
            connections: output.links.as_ref().map_or(0, Vec::len),
        })
        .collect();

    NodeDescriptor {
        id: node.id.to_string(),
        node_type: node.node_type.clone(),
        title: node.label().to_string(),
        category: category_of(node.type_name()),
        position: node.pos.map(Into::into),
        size: node.size.map(Into::into),
        properties: node.properties.clone(),
        widgets: node.widgets_values.clone(),
        inputs,
        outputs,
        order: node.order,
    }
}
