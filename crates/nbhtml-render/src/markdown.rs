//! Markdown rendering for markdown cells and `text/markdown` outputs
//!
//! The default renderer is `pulldown-cmark`. Its output is untrusted (raw HTML in
//! Markdown passes through) and is always sanitized before use.

use crate::error::{RenderError, Result};
use crate::rendered::Rendered;
use crate::sanitize::{escape_text, sanitize};
use pulldown_cmark::{html, Options, Parser};

/// Markdown to HTML conversion
pub trait MarkdownRenderer: Send + Sync {
    /// Render `markdown` to (unsanitized) HTML
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Markdown`] if the input cannot be rendered.
    fn render(&self, markdown: &str) -> Result<String>;
}

/// Markdown extensions enabled on top of CommonMark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkdownOptions {
    /// GitHub-style tables
    pub tables: bool,
    /// `~~strikethrough~~`
    pub strikethrough: bool,
    /// `- [x]` task lists
    pub task_lists: bool,
    /// `[^1]` footnotes
    pub footnotes: bool,
    /// Curly quotes and dashes
    ///
    /// Default: false (keeps code-like prose verbatim)
    pub smart_punctuation: bool,
}

impl Default for MarkdownOptions {
    #[inline]
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            task_lists: true,
            footnotes: true,
            smart_punctuation: false,
        }
    }
}

impl MarkdownOptions {
    fn parser_options(self) -> Options {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, self.task_lists);
        options.set(Options::ENABLE_FOOTNOTES, self.footnotes);
        options.set(Options::ENABLE_SMART_PUNCTUATION, self.smart_punctuation);
        options
    }
}

/// `pulldown-cmark` based [`MarkdownRenderer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CommonMarkRenderer {
    options: MarkdownOptions,
}

impl CommonMarkRenderer {
    /// Create a renderer with the default extensions
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub const fn with_options(options: MarkdownOptions) -> Self {
        Self { options }
    }
}

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, markdown: &str) -> Result<String> {
        let parser = Parser::new_ext(markdown, self.options.parser_options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        Ok(out)
    }
}

/// Render and sanitize Markdown, falling back to the escaped source
pub(crate) fn render_markdown(renderer: &dyn MarkdownRenderer, markdown: &str) -> Rendered {
    match renderer.render(markdown) {
        Ok(html) => Rendered::Primary(sanitize(&html)),
        Err(reason) => Rendered::fallback(escape_text(markdown), reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenRenderer;

    impl MarkdownRenderer for BrokenRenderer {
        fn render(&self, _markdown: &str) -> Result<String> {
            Err(RenderError::Markdown("unbalanced input".to_string()))
        }
    }

    #[test]
    fn test_renders_commonmark() {
        let html = CommonMarkRenderer::new().render("# Title\n\nSome *text*").unwrap();
        assert_eq!(html, "<h1>Title</h1>\n<p>Some <em>text</em></p>\n");
    }

    #[test]
    fn test_tables_enabled_by_default() {
        let html = CommonMarkRenderer::new()
            .render("| a | b |\n|---|---|\n| 1 | 2 |\n")
            .unwrap();
        assert!(html.contains("<table>"));

        let plain = CommonMarkRenderer::with_options(MarkdownOptions {
            tables: false,
            ..MarkdownOptions::default()
        })
        .render("| a | b |\n|---|---|\n| 1 | 2 |\n")
        .unwrap();
        assert!(!plain.contains("<table>"));
    }

    #[test]
    fn test_raw_html_is_sanitized() {
        let rendered = render_markdown(
            &CommonMarkRenderer::new(),
            "hello <script>alert(1)</script> <b>world</b>",
        );
        assert!(!rendered.is_fallback());
        let html = rendered.into_html();
        assert!(!html.as_str().contains("<script"));
        assert!(html.as_str().contains("<b>world</b>"));
    }

    #[test]
    fn test_failure_falls_back_to_escaped_source() {
        let rendered = render_markdown(&BrokenRenderer, "# <Title>");
        assert!(rendered.is_fallback());
        assert_eq!(rendered.into_html().as_str(), "# &lt;Title&gt;");
    }
}
