// src/error.rs

use std::{io, path::PathBuf};
use thiserror::Error;

/// Result type for synthbase operations
pub type Result<T> = std::result::Result<T, SynthError>;

/// Errors raised while validating input or persisting artifacts
#[derive(Debug, Error)]
pub enum SynthError {
    /// Input shape or column set does not match what is expected
    #[error("schema error: {0}")]
    Schema(String),

    /// Filesystem failure at `path`
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Model state could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A writer ran before epsilon was set
    #[error("epsilon must be set before writing artifacts")]
    MissingEpsilon,

    #[error("invalid epsilon {0}: must be finite and positive")]
    InvalidEpsilon(f64),

    /// Artifact name or algorithm tag cannot be used in a filename
    #[error("invalid name {0:?}: {1}")]
    InvalidName(String, &'static str),

    /// Malformed delimited text
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl SynthError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        SynthError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn schema(msg: impl Into<String>) -> Self {
        SynthError::Schema(msg.into())
    }
}
