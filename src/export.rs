//! Report documents handed to the surrounding application for saving.
//!
//! Only the document shape lives here; writing or downloading the file is the
//! caller's job. Reports borrow from the analysis they describe.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::analyze::types::{
    InputInfo, OutputInfo, TextInputEntry, WorkflowAnalysis, WorkflowStats,
};
use crate::analyze::Category;
use crate::parse::types::Position;
use crate::png::types::{Dimensions, ImageMetadata};

// =============================================================================
// WORKFLOW ANALYSIS REPORT
// =============================================================================

#[derive(Debug, Serialize)]
pub struct WorkflowReport<'a> {
    pub workflow_analysis: WorkflowAnalysisReport<'a>,
}

#[derive(Debug, Serialize)]
pub struct WorkflowAnalysisReport<'a> {
    pub timestamp: DateTime<Utc>,
    pub statistics: &'a WorkflowStats,
    pub required_models: Vec<RequiredModel<'a>>,
    pub nodes: Vec<NodeReport<'a>>,
    pub node_connections: Vec<NodeConnection<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RequiredModel<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub model_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
    pub usage_count: usize,
    pub used_in_nodes: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct NodeReport<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub node_type: Option<&'a str>,
    pub category: Category,
    pub properties: &'a Map<String, Value>,
    pub inputs: &'a [InputInfo],
    pub outputs: &'a [OutputInfo],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct NodeConnection<'a> {
    pub from_node: &'a str,
    pub to_node: &'a str,
}

pub fn workflow_report(analysis: &WorkflowAnalysis, generated_at: DateTime<Utc>) -> WorkflowReport<'_> {
    let required_models = analysis
        .models
        .iter()
        .map(|m| RequiredModel {
            name: &m.name,
            model_type: &m.model_type,
            path: m.path.as_deref(),
            version: m.version.as_deref(),
            format: m.format.as_deref(),
            source: m.source.as_deref(),
            usage_count: m.count,
            used_in_nodes: &m.nodes,
        })
        .collect();

    let nodes = analysis
        .node_info
        .iter()
        .map(|n| NodeReport {
            id: &n.id,
            node_type: n.node_type.as_deref(),
            category: n.category,
            properties: &n.properties,
            inputs: &n.inputs,
            outputs: &n.outputs,
            position: n.position,
            order: n.order,
        })
        .collect();

    let node_connections = analysis
        .graph
        .edges
        .iter()
        .map(|e| NodeConnection {
            from_node: &e.source,
            to_node: &e.target,
        })
        .collect();

    WorkflowReport {
        workflow_analysis: WorkflowAnalysisReport {
            timestamp: generated_at,
            statistics: &analysis.stats,
            required_models,
            nodes,
            node_connections,
        },
    }
}

// =============================================================================
// IMAGE METADATA REPORT
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ImageReport<'a> {
    pub image_metadata: ImageMetadataReport<'a>,
}

#[derive(Debug, Serialize)]
pub struct ImageMetadataReport<'a> {
    pub timestamp: DateTime<Utc>,
    pub prompt: Option<&'a str>,
    pub negative_prompt: Option<&'a str>,
    pub all_text_inputs: &'a [TextInputEntry],
    pub parameters: &'a Map<String, Value>,
    pub dimensions: Option<Dimensions>,
    pub workflow: Option<&'a Value>,
}

pub fn image_report(metadata: &ImageMetadata, generated_at: DateTime<Utc>) -> ImageReport<'_> {
    ImageReport {
        image_metadata: ImageMetadataReport {
            timestamp: generated_at,
            prompt: metadata.prompt.as_deref(),
            negative_prompt: metadata.negative_prompt.as_deref(),
            all_text_inputs: &metadata.all_text_inputs,
            parameters: &metadata.parameters,
            dimensions: metadata.dimensions,
            workflow: metadata.workflow.as_ref(),
        },
    }
}

const DEFAULT_IMAGE_REPORT_STEM: &str = "image-metadata";

/// Suggested file name for a workflow analysis report.
pub fn workflow_report_file_name(stem: &str) -> String {
    format!("{}-analysis.json", stem)
}

/// Suggested file name for an image metadata report, `image-metadata.json`
/// when no stem is given.
pub fn image_report_file_name(stem: Option<&str>) -> String {
    format!("{}.json", stem.unwrap_or(DEFAULT_IMAGE_REPORT_STEM))
}
