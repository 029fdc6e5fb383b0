//! Error types for notebook rendering
//!
//! Render errors never abort a conversion: they are absorbed where they occur and
//! replaced by escaped plain text. Only [`nbhtml_notebook::NotebookError`] reaches
//! the caller of [`crate::NotebookConverter::convert`].

use thiserror::Error;

/// Failure of a delegated renderer (Markdown or syntax highlighting)
#[derive(Error, Debug)]
pub enum RenderError {
    /// The Markdown renderer rejected its input
    #[error("Markdown rendering failed: {0}")]
    Markdown(String),

    /// The syntax highlighter failed on a code cell
    #[error("Syntax highlighting failed: {0}")]
    Highlight(String),

    /// No bundled highlight theme with this name
    #[error("Unknown highlight theme '{0}'")]
    UnknownTheme(String),
}

impl From<syntect::Error> for RenderError {
    fn from(err: syntect::Error) -> Self {
        Self::Highlight(err.to_string())
    }
}

/// Result type alias for render operations
pub type Result<T> = std::result::Result<T, RenderError>;
