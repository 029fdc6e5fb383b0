//! Notebook to HTML document assembly

use crate::highlight::{Highlighter, SyntectHighlighter};
use crate::markdown::{CommonMarkRenderer, MarkdownRenderer};
use crate::sanitize::escape_into;
use nbhtml_notebook::{parse_notebook_from_str, NotebookCell, ParsedNotebook, Result};
use std::fmt::{self, Write};
use std::sync::LazyLock;

static DEFAULT_CONVERTER: LazyLock<NotebookConverter> = LazyLock::new(NotebookConverter::new);

/// Jupyter Notebook to HTML converter
///
/// Holds the Markdown renderer and syntax highlighter used for every conversion.
/// Build it once and share it: [`NotebookConverter::convert`] only needs `&self`.
///
/// ## Output structure
///
/// ```text
/// <div class="notebook">
///   <div class="cell cell-code">
///     <div class="input-wrapper">
///       <div class="input-prompt">[1]:</div>
///       <div class="input">...</div>
///     </div>
///     <div class="output-wrapper">
///       <div class="output-prompt">[1]:</div>
///       <div class="output output-execute-result">...</div>
///     </div>
///   </div>
/// </div>
/// ```
///
/// Prompts are only written for cells and outputs that carry an execution count.
/// The markup has no whitespace between tags.
///
/// ## Example
///
/// ```
/// use nbhtml_render::NotebookConverter;
///
/// let html = NotebookConverter::new().convert(
///     r#"{"nbformat": 4, "nbformat_minor": 5, "metadata": {},
///         "cells": [{"cell_type": "raw", "source": ["a < b"]}]}"#,
/// )?;
/// assert_eq!(
///     html,
///     r#"<div class="notebook"><div class="cell cell-raw"><div class="input-wrapper"><div class="input"><pre>a &lt; b</pre></div></div></div></div>"#
/// );
/// # Ok::<(), nbhtml_render::NotebookError>(())
/// ```
pub struct NotebookConverter {
    markdown: Box<dyn MarkdownRenderer>,
    highlighter: Box<dyn Highlighter>,
}

impl Default for NotebookConverter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotebookConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotebookConverter").finish_non_exhaustive()
    }
}

impl NotebookConverter {
    /// Converter using `pulldown-cmark` and `syntect` with default settings
    #[must_use = "creates a converter that should be used for rendering"]
    pub fn new() -> Self {
        Self {
            markdown: Box::new(CommonMarkRenderer::new()),
            highlighter: Box::new(SyntectHighlighter::new()),
        }
    }

    /// Replace the Markdown renderer
    #[must_use]
    pub fn with_markdown_renderer(mut self, renderer: impl MarkdownRenderer + 'static) -> Self {
        self.markdown = Box::new(renderer);
        self
    }

    /// Replace the syntax highlighter
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    pub(crate) fn markdown(&self) -> &dyn MarkdownRenderer {
        self.markdown.as_ref()
    }

    pub(crate) fn highlighter(&self) -> &dyn Highlighter {
        self.highlighter.as_ref()
    }

    /// Convert a notebook JSON document to an HTML fragment
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The notebook JSON is malformed
    /// - The notebook format is older than version 4
    ///
    /// Failures inside individual cells never surface here; they fall back to
    /// escaped plain text.
    pub fn convert(&self, notebook_json: &str) -> Result<String> {
        let notebook = parse_notebook_from_str(notebook_json)?;
        Ok(self.render_notebook(&notebook))
    }

    /// Render an already parsed notebook
    #[must_use]
    pub fn render_notebook(&self, notebook: &ParsedNotebook) -> String {
        let language_hint = notebook.metadata.language_hint();
        log::debug!(
            "Rendering {} cells (language hint: {:?})",
            notebook.cells.len(),
            language_hint
        );

        let mut html = String::from(r#"<div class="notebook">"#);
        for cell in &notebook.cells {
            self.write_cell(&mut html, language_hint, cell);
        }
        html.push_str("</div>");
        html
    }

    fn write_cell(&self, html: &mut String, language_hint: &str, cell: &NotebookCell) {
        html.push_str(r#"<div class="cell cell-"#);
        escape_into(html, cell.cell_type.as_str());
        html.push_str(r#""><div class="input-wrapper">"#);
        write_prompt(html, "input-prompt", cell.execution_count);
        html.push_str(r#"<div class="input">"#);
        html.push_str(self.render_cell_input(language_hint, cell).as_str());
        html.push_str("</div></div>");

        for output in &cell.outputs {
            html.push_str(r#"<div class="output-wrapper">"#);
            write_prompt(html, "output-prompt", output.execution_count);
            html.push_str(r#"<div class="output output-"#);
            escape_into(html, &output.output_type.as_str().replace('_', "-"));
            html.push_str(r#"">"#);
            html.push_str(self.render_output(output).as_str());
            html.push_str("</div></div>");
        }

        html.push_str("</div>");
    }
}

/// `[N]:` prompt, nothing at all without an execution count
fn write_prompt(html: &mut String, class: &str, execution_count: Option<i64>) {
    if let Some(count) = execution_count {
        let _ = write!(html, r#"<div class="{class}">[{count}]:</div>"#);
    }
}

/// Convert a notebook JSON document to an HTML fragment with the default converter
///
/// # Errors
///
/// Returns an error if the notebook JSON is malformed or older than version 4.
pub fn convert_notebook_str(notebook_json: &str) -> Result<String> {
    DEFAULT_CONVERTER.convert(notebook_json)
}
