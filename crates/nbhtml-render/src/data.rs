//! Rendering of rich output data (MIME bundles)

use crate::document::NotebookConverter;
use crate::markdown::render_markdown;
use crate::sanitize::{escape_into, preformatted, sanitize, SafeHtml};
use nbhtml_notebook::MimeBundle;
use regex::Regex;
use std::sync::LazyLock;

static DIV_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)div[\s/>]").expect("valid div tag regex"));

impl NotebookConverter {
    /// Render the preferred representation of a MIME bundle.
    ///
    /// Priority: HTML, PNG, JPEG, SVG, Markdown, plain text. PDF and LaTeX are
    /// never rendered; a bundle with nothing renderable gives an empty fragment.
    ///
    /// SVG markup goes through the same allow-list as HTML, which has no SVG
    /// elements, so an SVG output currently renders as an empty fragment. It still
    /// takes precedence over Markdown and plain text.
    #[must_use]
    pub fn render_data(&self, data: &MimeBundle) -> SafeHtml {
        if let Some(html) = &data.html {
            sanitize(unwrap_single_div(html))
        } else if let Some(png) = &data.png {
            image_tag("image/png", png)
        } else if let Some(jpeg) = &data.jpeg {
            image_tag("image/jpeg", jpeg)
        } else if let Some(svg) = &data.svg {
            sanitize(svg)
        } else if let Some(markdown) = &data.markdown {
            render_markdown(self.markdown(), markdown).into_html()
        } else if let Some(text) = &data.plain {
            preformatted(text)
        } else {
            SafeHtml::empty()
        }
    }
}

/// `<img>` embedding an already base64-encoded payload
fn image_tag(mime: &str, base64_payload: &str) -> SafeHtml {
    let mut tag = String::with_capacity(base64_payload.len() + 40);
    tag.push_str("<img src=\"data:");
    tag.push_str(mime);
    tag.push_str(";base64,");
    escape_into(&mut tag, base64_payload);
    tag.push_str("\">");
    sanitize(&tag)
}

/// Remove a redundant `<div>...</div>` around the whole fragment.
///
/// Only an attribute-less `<div>` opening the fragment whose matching `</div>` closes
/// it is removed. `<div>a</div><div>b</div>` is left alone.
pub(crate) fn unwrap_single_div(html: &str) -> &str {
    let Some(inner) = html
        .strip_prefix("<div>")
        .and_then(|rest| rest.strip_suffix("</div>"))
    else {
        return html;
    };

    let mut depth: usize = 0;
    for tag in DIV_TAG.captures_iter(inner) {
        if tag[1].is_empty() {
            depth += 1;
        } else if depth == 0 {
            // closes the outer div early
            return html;
        } else {
            depth -= 1;
        }
    }

    if depth == 0 {
        inner
    } else {
        html
    }
}
