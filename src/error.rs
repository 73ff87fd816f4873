use crate::config::ConfigError;
use crate::fetching::error::RequestError;
use crate::transform::error::{DecodeError, ParseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImporterError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    // Only returned under RecordErrorPolicy::Abort
    #[error("Failed to map observation from station '{station}'")]
    Record {
        station: String,
        #[source]
        source: ParseError,
    },

    #[error("Invalid importer configuration")]
    Config(#[from] ConfigError),

    #[error("Import run was cancelled")]
    Cancelled,
}
