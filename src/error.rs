//! Error types shared by the parse and extract phases.

use serde::Serialize;

/// Failure while walking a PNG byte stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("Not a valid PNG file: signature mismatch")]
    InvalidSignature,

    #[error("Truncated PNG stream at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Chunk length at offset {offset} overflows the addressable range")]
    LengthOverflow { offset: usize },
}

impl FormatError {
    pub fn code(&self) -> &'static str {
        match self {
            FormatError::InvalidSignature => "F001",
            FormatError::Truncated { .. } => "F002",
            FormatError::LengthOverflow { .. } => "F003",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Phase {
    Parse,
    Extract,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Extract => write!(f, "Extract"),
        }
    }
}

/// Error reported across the public entry points (wasm, CLI).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectError {
    pub code: String,
    pub phase: Phase,
    pub message: String,
}

impl std::fmt::Display for InspectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.phase, self.code, self.message)
    }
}

impl std::error::Error for InspectError {}

impl From<FormatError> for InspectError {
    fn from(e: FormatError) -> Self {
        InspectError {
            code: e.code().to_string(),
            phase: Phase::Extract,
            message: e.to_string(),
        }
    }
}

impl InspectError {
    pub fn parse(code: &str, message: impl Into<String>) -> Self {
        InspectError {
            code: code.into(),
            phase: Phase::Parse,
            message: message.into(),
        }
    }
}
