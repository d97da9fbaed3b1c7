//! Extract phase: PNG bytes → `ImageMetadata`.
//!
//! One sequential pass over the chunk stream. Only `IHDR` (dimensions) and
//! `tEXt` are interpreted; every other chunk is skipped by length. When a
//! workflow is embedded it is handed to the analysis phase.

pub mod chunks;
pub mod text;
pub mod types;

pub use chunks::{Chunk, ChunkReader, PNG_SIGNATURE};
pub use types::*;

use tracing::debug;

use crate::analyze::{analyze, extract_text_inputs};
use crate::error::FormatError;
use crate::parse::parse_document;

pub fn extract(bytes: &[u8]) -> Result<ImageMetadata, FormatError> {
    let mut metadata = ImageMetadata::default();

    for chunk in ChunkReader::new(bytes)? {
        let chunk = chunk?;
        debug!(
            kind = chunk.kind_name(),
            offset = chunk.offset,
            length = chunk.data.len(),
            "visiting chunk"
        );

        match chunk.kind {
            chunks::IHDR => metadata.dimensions = Dimensions::from_ihdr(chunk.data),
            chunks::TEXT => text::apply_text_chunk(&mut metadata, chunk.data),
            _ => {}
        }
    }

    if let Some(workflow) = &metadata.workflow {
        let document = parse_document(workflow).unwrap_or_default();
        let text_inputs = extract_text_inputs(&document);

        if metadata.prompt.is_none() {
            metadata.prompt = text_inputs.first().map(|entry| entry.text.clone());
        }
        metadata.all_text_inputs = text_inputs;
        metadata.analysis = Some(analyze(&document));
    }

    Ok(metadata)
}
