//! Error types for digest runs

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a digest run
#[derive(Debug, Error)]
pub enum DigestError {
    /// The root directory does not exist
    #[error("Root directory not found: {0:?}")]
    RootNotFound(PathBuf),

    /// The root path exists but is not a directory
    #[error("Root path is not a directory: {0:?}")]
    RootNotDirectory(PathBuf),

    /// Directory traversal failed
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A source file could not be read as UTF-8 text
    #[error("Failed to read file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The knowledge file could not be written
    #[error("Failed to write knowledge file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, DigestError>;
