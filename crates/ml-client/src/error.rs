//! Error types for loading model artifacts.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a serialized rating model
#[derive(Error, Debug)]
pub enum ModelArtifactError {
    /// The artifact file could not be read
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The artifact is not valid JSON for a linear text model
    #[error("Failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),

    /// The artifact parsed but describes an unusable model
    #[error("Invalid model artifact: {0}")]
    Invalid(String),
}

/// Convenience type alias for artifact loading results
pub type Result<T> = std::result::Result<T, ModelArtifactError>;
