//! Error types for dataset access

use bnl_core::ValidationError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for dataset operations
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while listing or loading tracks
#[derive(Debug, Error)]
pub enum DataError {
    /// Reading a file or directory failed
    #[error("IO error for path '{}': {source}", path.display())]
    Io {
        /// Path being read
        path: PathBuf,
        /// Underlying IO failure
        #[source]
        source: io::Error,
    },

    /// A track document is not valid JSON for the expected schema
    #[error("Failed to parse JSON from '{}': {source}", path.display())]
    JsonParse {
        /// Document path
        path: PathBuf,
        /// Parser failure
        #[source]
        source: serde_json::Error,
    },

    /// No annotation exists for the requested id
    #[error("Track '{id}' not found at '{}'", expected_path.display())]
    TrackNotFound {
        /// Requested track id
        id: String,
        /// Where the annotation was looked for
        expected_path: PathBuf,
    },

    /// The annotation exists but does not form a valid segmentation
    #[error("Invalid annotation for track '{id}': {source}")]
    InvalidAnnotation {
        /// Track id
        id: String,
        /// First violated invariant
        #[source]
        source: ValidationError,
    },

    /// A layer index past the end of the annotation was requested
    #[error("Track '{id}' has {available} layers, layer {requested} requested")]
    MissingLayer {
        /// Track id
        id: String,
        /// Requested layer index
        requested: usize,
        /// Number of layers the annotation has
        available: usize,
    },
}
