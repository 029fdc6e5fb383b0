//! Error types for Jupyter notebook parsing

use thiserror::Error;

/// Error type for notebook parsing operations
///
/// Both variants are fatal for a conversion: no HTML is produced when parsing fails.
#[derive(Error, Debug)]
pub enum NotebookError {
    /// The payload is not a well-formed notebook document
    #[error("Malformed notebook JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Notebook version not supported
    #[error("Unsupported notebook format version {major}.{minor} (version 4 or later required)")]
    UnsupportedVersion {
        /// Major version number
        major: i64,
        /// Minor version number
        minor: i64,
    },
}

/// Result type alias for notebook operations
pub type Result<T> = std::result::Result<T, NotebookError>;
