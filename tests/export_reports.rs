//! Export report documents built from analysis and extraction results.

mod helpers;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use inspector::{analyze, export, png};

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
}

#[test]
fn workflow_report_shape() {
    let analysis = analyze::analyze_value(&helpers::txt2img_workflow());
    let report = serde_json::to_value(export::workflow_report(&analysis, generated_at())).unwrap();
    let body = &report["workflow_analysis"];

    assert!(body["timestamp"].as_str().unwrap().starts_with("2026-01-02T03:04:05"));
    assert_eq!(body["statistics"]["totalNodes"], json!(9));
    assert_eq!(body["statistics"]["nodeCategories"]["Loaders"], json!(3));

    let models = body["required_models"].as_array().unwrap();
    assert_eq!(models.len(), 6);
    assert_eq!(
        models[1],
        json!({
            "name": "detail_tweaker_v1.5.safetensors",
            "type": "LoRA",
            "version": "v1.5",
            "format": "SafeTensors",
            "usage_count": 1,
            "used_in_nodes": ["LoraLoader"]
        })
    );

    let nodes = body["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 9);
    assert_eq!(nodes[5]["type"], json!("KSampler"));
    assert_eq!(nodes[5]["category"], json!("Samplers"));
    assert_eq!(nodes[5]["position"], json!({ "x": 1200.0, "y": 200.0 }));
    assert_eq!(nodes[5]["order"], json!(5));
    assert_eq!(
        nodes[5]["inputs"][1],
        json!({ "name": "positive", "type": "CONDITIONING", "connected": true })
    );

    let connections = body["node_connections"].as_array().unwrap();
    assert_eq!(connections.len(), 11);
    assert_eq!(connections[0], json!({ "from_node": "1", "to_node": "2" }));
}

#[test]
fn image_report_shape() {
    let bytes = helpers::png_with_workflow(&helpers::example_workflow());
    let metadata = png::extract(&bytes).unwrap();
    let report = serde_json::to_value(export::image_report(&metadata, generated_at())).unwrap();
    let body = &report["image_metadata"];

    let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "all_text_inputs",
            "dimensions",
            "negative_prompt",
            "parameters",
            "prompt",
            "timestamp",
            "workflow",
        ]
    );
    assert_eq!(body["dimensions"], json!({ "width": 512, "height": 768 }));
    assert_eq!(body["prompt"], json!(null));
    assert_eq!(body["all_text_inputs"], json!([]));
    assert_eq!(body["workflow"], helpers::example_workflow());
}

#[test]
fn report_file_names() {
    assert_eq!(export::workflow_report_file_name("txt2img"), "txt2img-analysis.json");
    assert_eq!(export::image_report_file_name(None), "image-metadata.json");
    assert_eq!(export::image_report_file_name(Some("fox_00012_")), "fox_00012_.json");
}
