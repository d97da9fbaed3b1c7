//! WASM entry points for browser use.
//!
//! Every function returns `{ status: "success", result }` or
//! `{ status: "errors", errors: [...] }` as a plain JS object.

use chrono::{DateTime, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::InspectError;
use crate::{analyze, export, parse, png};

/// Parse + analyze a workflow JSON string.
#[wasm_bindgen]
pub fn analyze_workflow(json: &str) -> JsValue {
    to_js(&InspectResult::from(analyze::analyze_json(json)))
}

/// Extract metadata (and the embedded workflow's analysis) from PNG bytes.
#[wasm_bindgen]
pub fn extract_image_metadata(bytes: &[u8]) -> JsValue {
    let result = png::extract(bytes).map_err(InspectError::from);
    to_js(&InspectResult::from(result))
}

/// Text inputs of a workflow JSON string, in node order.
#[wasm_bindgen]
pub fn extract_text_inputs(json: &str) -> JsValue {
    let result = parse::parse(json).map(|document| {
        document
            .map(|d| analyze::extract_text_inputs(&d))
            .unwrap_or_default()
    });
    to_js(&InspectResult::from(result))
}

/// Analysis report document for a workflow. `timestamp_ms` is `Date.now()`.
#[wasm_bindgen]
pub fn workflow_report_json(json: &str, timestamp_ms: f64) -> JsValue {
    let result = timestamp(timestamp_ms).and_then(|generated_at| {
        let analysis = analyze::analyze_json(json)?;
        serde_json::to_value(export::workflow_report(&analysis, generated_at))
            .map_err(|e| InspectError::parse("P003", format!("Failed to build report: {}", e)))
    });
    to_js(&InspectResult::from(result))
}

/// Metadata report document for a PNG. `timestamp_ms` is `Date.now()`.
#[wasm_bindgen]
pub fn image_report_json(bytes: &[u8], timestamp_ms: f64) -> JsValue {
    let result = timestamp(timestamp_ms).and_then(|generated_at| {
        let metadata = png::extract(bytes)?;
        serde_json::to_value(export::image_report(&metadata, generated_at))
            .map_err(|e| InspectError::parse("P003", format!("Failed to build report: {}", e)))
    });
    to_js(&InspectResult::from(result))
}

fn timestamp(timestamp_ms: f64) -> Result<DateTime<Utc>, InspectError> {
    DateTime::from_timestamp_millis(timestamp_ms as i64).ok_or_else(|| {
        InspectError::parse("P002", format!("Timestamp out of range: {}", timestamp_ms))
    })
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    // Plain objects rather than ES2015 Maps for the JSON maps in the output.
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(tag = "status")]
enum InspectResult<T> {
    #[serde(rename = "success")]
    Success { result: T },
    #[serde(rename = "errors")]
    Errors { errors: Vec<InspectError> },
}

impl<T> From<Result<T, InspectError>> for InspectResult<T> {
    fn from(result: Result<T, InspectError>) -> Self {
        match result {
            Ok(result) => InspectResult::Success { result },
            Err(e) => InspectResult::Errors { errors: vec![e] },
        }
    }
}
