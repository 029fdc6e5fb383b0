//! # nbhtml-notebook
//!
//! Jupyter Notebook (.ipynb) data model and parser for nbhtml.
//!
//! This crate parses notebook documents (nbformat 4.x) into an immutable model:
//! - Markdown, code and raw cells (unknown cell types are kept, not rejected)
//! - Execution counts of code cells
//! - Cell outputs (stream, display data, execute results, errors)
//! - The MIME bundle of rich outputs, one optional field per supported type
//! - The language hints found in the notebook metadata
//!
//! Notebooks older than format 4 are rejected.
//!
//! ## Example
//!
//! ```
//! use nbhtml_notebook::parse_notebook_from_str;
//!
//! let notebook = parse_notebook_from_str(
//!     r#"{"nbformat": 4, "nbformat_minor": 5, "metadata": {}, "cells": []}"#,
//! )?;
//! assert!(notebook.cells.is_empty());
//! assert_eq!(notebook.metadata.language_hint(), "");
//! # Ok::<(), nbhtml_notebook::NotebookError>(())
//! ```

/// Error types for notebook parsing
pub mod error;
/// Jupyter notebook (ipynb) model and parser
pub mod ipynb;
mod multiline;

pub use error::{NotebookError, Result};
pub use ipynb::{
    parse_notebook_from_str, CellOutput, CellType, MimeBundle, NotebookCell, NotebookMetadata,
    OutputType, ParsedNotebook, MIN_NBFORMAT,
};
