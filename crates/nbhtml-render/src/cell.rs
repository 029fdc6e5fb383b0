//! Rendering of cell inputs

use crate::document::NotebookConverter;
use crate::markdown::render_markdown;
use crate::rendered::Rendered;
use crate::sanitize::{preformatted, SafeHtml};
use nbhtml_notebook::{CellType, NotebookCell};

impl NotebookConverter {
    /// Render the source of one cell.
    ///
    /// - markdown: rendered and sanitized, escaped source if the renderer fails
    /// - code: highlighted with `language_hint`, escaped `<pre>` if highlighting fails
    /// - raw: escaped `<pre>`
    /// - anything else: empty
    #[must_use]
    pub fn render_cell_input(&self, language_hint: &str, cell: &NotebookCell) -> SafeHtml {
        match &cell.cell_type {
            CellType::Markdown => render_markdown(self.markdown(), &cell.source).into_html(),
            CellType::Code => self.highlight_code(&cell.source, language_hint).into_html(),
            CellType::Raw => preformatted(&cell.source),
            CellType::Other(kind) => {
                log::debug!("No input rendering for cell type '{kind}'");
                SafeHtml::empty()
            }
        }
    }

    fn highlight_code(&self, source: &str, language_hint: &str) -> Rendered {
        match self.highlighter().highlight(source, language_hint) {
            Ok(html) => Rendered::Primary(html),
            Err(reason) => Rendered::fallback(preformatted(source), reason),
        }
    }
}
