//! Outcome of a delegated render

use crate::error::RenderError;
use crate::sanitize::SafeHtml;

/// HTML produced by a delegated renderer, or the fallback used in its place
///
/// Either way there is something safe to show: a failing Markdown renderer or
/// highlighter degrades one cell, never the whole notebook.
#[derive(Debug)]
pub enum Rendered {
    /// The renderer succeeded
    Primary(SafeHtml),
    /// The renderer failed and `html` is the escaped plain-text substitute
    Fallback {
        /// Substitute fragment
        html: SafeHtml,
        /// Why the renderer failed
        reason: RenderError,
    },
}

impl Rendered {
    /// Build a fallback, logging the failure
    pub(crate) fn fallback(html: SafeHtml, reason: RenderError) -> Self {
        log::warn!("{reason}; rendering escaped source instead");
        Self::Fallback { html, reason }
    }

    #[inline]
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// The fragment to display
    #[inline]
    #[must_use]
    pub fn into_html(self) -> SafeHtml {
        match self {
            Self::Primary(html) | Self::Fallback { html, .. } => html,
        }
    }
}
