//! # nbhtml-render
//!
//! Converts Jupyter Notebooks to a self-contained, sanitized HTML fragment.
//!
//! Every cell becomes a `cell cell-<type>` container holding its rendered input
//! and one `output-wrapper` per output:
//! - Markdown cells and `text/markdown` outputs are rendered with `pulldown-cmark`
//! - Code cells are highlighted with `syntect`, using one language hint per notebook
//! - Raw cells, streams and tracebacks become escaped `<pre>` blocks
//! - Rich outputs pick the best of HTML, PNG, JPEG, SVG, Markdown and plain text
//! - All untrusted HTML goes through an `ammonia` allow-list
//!
//! Only malformed JSON and notebooks older than format 4 are errors. A failing
//! renderer degrades to escaped text for that cell and the conversion continues.
//!
//! ## Example
//!
//! ```
//! use nbhtml_render::convert_notebook_str;
//!
//! let html = convert_notebook_str(r##"{
//!     "nbformat": 4,
//!     "nbformat_minor": 5,
//!     "metadata": {"language_info": {"file_extension": ".py"}},
//!     "cells": [
//!         {"cell_type": "markdown", "source": ["# Results"]},
//!         {"cell_type": "code", "execution_count": 1, "source": ["print('hi')"],
//!          "outputs": [{"output_type": "stream", "name": "stdout", "text": ["hi\n"]}]}
//!     ]
//! }"##)?;
//! assert!(html.contains("<h1>Results</h1>"));
//! assert!(html.contains(r#"<div class="input-prompt">[1]:</div>"#));
//! assert!(html.contains(r#"<div class="output output-stream"><pre>hi"#));
//! # Ok::<(), nbhtml_render::NotebookError>(())
//! ```

mod cell;
mod data;
/// Document assembly and the converter entry points
pub mod document;
/// Render error types
pub mod error;
/// Syntax highlighting
pub mod highlight;
/// Markdown rendering
pub mod markdown;
/// Output rendering
pub mod output;
/// Fallback-aware render results
pub mod rendered;
/// HTML sanitization and escaping
pub mod sanitize;

pub use document::{convert_notebook_str, NotebookConverter};
pub use error::RenderError;
pub use highlight::{Highlighter, SyntectHighlighter, DEFAULT_THEME};
pub use markdown::{CommonMarkRenderer, MarkdownOptions, MarkdownRenderer};
pub use nbhtml_notebook::{NotebookError, ParsedNotebook};
pub use output::strip_ansi;
pub use rendered::Rendered;
pub use sanitize::{escape_text, preformatted, sanitize, SafeHtml};
