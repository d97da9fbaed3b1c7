pub mod analyze;
pub mod error;
pub mod export;
pub mod parse;
pub mod png;
pub mod wasm;
