//! Syntax highlighting for code cells
//!
//! The default highlighter is `syntect` with its bundled syntaxes. Markup uses CSS
//! classes instead of inline colors, pair it with [`SyntectHighlighter::stylesheet`].

use crate::error::{RenderError, Result};
use crate::sanitize::SafeHtml;
use std::sync::LazyLock;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Bundled theme closest to the GitHub look
pub const DEFAULT_THEME: &str = "InspiredGitHub";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// Source code to highlighted HTML
pub trait Highlighter: Send + Sync {
    /// Highlight `source` using `language_hint` to pick the language.
    ///
    /// An empty hint asks the highlighter to guess from the source. The returned
    /// markup must escape all of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Highlight`] if highlighting fails.
    fn highlight(&self, source: &str, language_hint: &str) -> Result<SafeHtml>;
}

/// `syntect` based [`Highlighter`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SyntectHighlighter;

impl SyntectHighlighter {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Pick a syntax: the hint (file extension or language name, any case), then
    /// the first line of the source (shebangs, modelines), then plain text.
    fn find_syntax(source: &str, language_hint: &str) -> &'static SyntaxReference {
        let syntaxes: &'static SyntaxSet = &SYNTAXES;

        let by_hint = if language_hint.is_empty() {
            None
        } else {
            syntaxes.find_syntax_by_token(language_hint)
        };

        by_hint
            .or_else(|| syntaxes.find_syntax_by_first_line(source))
            .unwrap_or_else(|| syntaxes.find_syntax_plain_text())
    }

    /// CSS for the classes emitted by this highlighter, using a bundled theme
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownTheme`] if no bundled theme has this name.
    pub fn stylesheet(theme_name: &str) -> Result<String> {
        let themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .get(theme_name)
            .ok_or_else(|| RenderError::UnknownTheme(theme_name.to_string()))?;
        Ok(css_for_theme_with_class_style(theme, ClassStyle::Spaced)?)
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, source: &str, language_hint: &str) -> Result<SafeHtml> {
        let syntax = Self::find_syntax(source, language_hint);
        log::trace!("Highlighting code cell as {}", syntax.name);

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAXES, ClassStyle::Spaced);
        for line in LinesWithEndings::from(source) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        let code = generator.finalize();
        let mut html = String::with_capacity(code.len() + 40);
        html.push_str(r#"<pre class="highlight"><code>"#);
        html.push_str(&code);
        html.push_str("</code></pre>");
        Ok(SafeHtml::from_trusted(html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_wraps_and_escapes() {
        let html = SyntectHighlighter::new()
            .highlight("if a < b:\n    print('<script>')\n", "py")
            .unwrap();
        let html = html.as_str();
        assert!(html.starts_with(r#"<pre class="highlight"><code>"#));
        assert!(html.ends_with("</code></pre>"));
        assert!(html.contains("print"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_syntax_selection() {
        assert_eq!(SyntectHighlighter::find_syntax("x = 1", "py").name, "Python");
        assert_eq!(SyntectHighlighter::find_syntax("x = 1", "Python").name, "Python");
        assert_eq!(
            SyntectHighlighter::find_syntax("#!/usr/bin/env python\nx = 1\n", "").name,
            "Python"
        );
        assert_eq!(
            SyntectHighlighter::find_syntax("x = 1", "no-such-language").name,
            "Plain Text"
        );
    }

    #[test]
    fn test_unknown_language_still_renders() {
        let html = SyntectHighlighter::new()
            .highlight("a & b", "no-such-language")
            .unwrap();
        assert!(html.as_str().contains("a &amp; b"));
    }

    #[test]
    fn test_stylesheet() {
        let css = SyntectHighlighter::stylesheet(DEFAULT_THEME).unwrap();
        assert!(css.contains('{'));

        let err = SyntectHighlighter::stylesheet("no-such-theme").unwrap_err();
        assert!(matches!(err, RenderError::UnknownTheme(_)));
    }
}
