use std::fmt;
use thiserror::Error;

/// Which response body failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    /// The pointer endpoint's envelope (a JSON object).
    Pointer,
    /// The data endpoint's observation list (a JSON array).
    Observations,
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Pointer => write!(f, "pointer envelope"),
            Document::Observations => write!(f, "observation array"),
        }
    }
}

#[derive(Debug, Error)]
#[error("Failed to decode {document} as JSON")]
pub struct DecodeError {
    pub document: Document,
    #[source]
    pub source: serde_json::Error,
}

impl DecodeError {
    pub(crate) fn new(document: Document, source: serde_json::Error) -> Self {
        Self { document, source }
    }
}

/// A single observation record that cannot be mapped.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Observation has no timestamp")]
    MissingTimestamp,

    #[error("Invalid observation timestamp '{value}', expected YYYY-MM-DDTHH:MM:SS")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Observation has no station identifier")]
    MissingStationId,

    #[error("Observation has a field of the wrong type")]
    Malformed(#[source] serde_json::Error),
}
