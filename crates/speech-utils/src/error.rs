//! Utility Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from path, persistence, logging and model helpers
#[derive(Debug, Error)]
pub enum UtilsError {
    /// Filesystem operation failed
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Name is neither a directory nor a known pretrained model
    #[error("Not a valid pretrained model: {0}")]
    UnknownPretrained(String),

    /// Required file missing from a model directory
    #[error("The {kind} file is required in {}", .dir.display())]
    MissingFile { kind: &'static str, dir: PathBuf },

    /// Encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Logger could not be installed
    #[error("Logger setup failed: {0}")]
    Logger(String),

    /// Error reported by a model collaborator
    #[error("Model error: {0}")]
    Model(String),
}

impl UtilsError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| UtilsError::Io { path, source }
    }
}

impl From<postcard::Error> for UtilsError {
    fn from(err: postcard::Error) -> Self {
        UtilsError::Serialization(err.to_string())
    }
}
