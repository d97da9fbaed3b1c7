#![allow(dead_code)]

use serde_json::Value;

use inspector::png::PNG_SIGNATURE;

// =============================================================================
// PNG stream builders
// =============================================================================

/// One chunk with a zeroed CRC; the reader never checks it.
pub fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&[0, 0, 0, 0]);
    out
}

pub fn ihdr(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    // bit depth 8, RGBA, default compression/filter/interlace
    data.extend_from_slice(&[8, 6, 0, 0, 0]);
    chunk(b"IHDR", &data)
}

pub fn text(key: &str, value: &str) -> Vec<u8> {
    let mut data = key.as_bytes().to_vec();
    data.push(0);
    data.extend_from_slice(value.as_bytes());
    chunk(b"tEXt", &data)
}

pub fn iend() -> Vec<u8> {
    chunk(b"IEND", &[])
}

/// Signature followed by the given chunks, in order.
pub fn png_bytes(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = PNG_SIGNATURE.to_vec();
    for c in chunks {
        out.extend_from_slice(c);
    }
    out
}

/// A 512x768 image carrying `workflow` as a `tEXt` chunk.
pub fn png_with_workflow(workflow: &Value) -> Vec<u8> {
    png_bytes(&[
        ihdr(512, 768),
        text("workflow", &workflow.to_string()),
        chunk(b"IDAT", &[0x78, 0x9c, 0x03, 0x00, 0x00, 0x00, 0x00, 0x01]),
        iend(),
    ])
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn txt2img_workflow() -> Value {
    serde_json::from_str(include_str!("../fixtures/txt2img_workflow.json"))
        .expect("fixture is valid JSON")
}

pub fn example_workflow() -> Value {
    serde_json::from_str(include_str!("../fixtures/example_workflow.json"))
        .expect("fixture is valid JSON")
}
