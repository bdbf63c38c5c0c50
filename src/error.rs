//! Error types for runreg

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Runreg error types
#[derive(Error, Debug)]
pub enum Error {
    /// A run already exists at the target path and overwrite was not requested
    #[error("a run already exists at {path}\nPass overwrite=true to replace it")]
    RunExists {
        /// Path of the existing run
        path: String,
    },

    /// No runs stored for the requested experiment/variant
    #[error("no runs found under {uri} for experiment '{experiment_id}', variant '{variant_id}'")]
    NoRuns {
        /// Registry URI that was searched
        uri: String,
        /// Experiment id
        experiment_id: String,
        /// Variant id
        variant_id: String,
    },

    /// Two artifacts in one run persist to the same filename
    #[error("artifacts '{first_id}' and '{second_id}' both persist to '{filename}'\nGive one of them a distinct filename")]
    DuplicateArtifactFilename {
        /// Id of the first artifact using the filename
        first_id: String,
        /// Id of the second artifact using the filename
        second_id: String,
        /// The shared filename
        filename: String,
    },

    /// Object missing from the store
    #[error("object not found: {0}")]
    NotFound(String),

    /// URI scheme with no built-in backend
    #[error("unsupported URI scheme '{scheme}' in {uri}\nBuilt-in schemes: file, memory. Use the *_with functions with your own ObjectStore for cloud backends.")]
    UnsupportedScheme {
        /// The unrecognized scheme
        scheme: String,
        /// The full URI
        uri: String,
    },

    /// URI containing more than one `://` separator
    #[error("cannot parse URI that contains more than one instance of '://' - {0}")]
    MalformedUri(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Run metadata (de)serialization error
    #[error("metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
