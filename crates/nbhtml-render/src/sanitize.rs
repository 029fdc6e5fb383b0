//! HTML sanitization and text escaping
//!
//! Every fragment that ends up in a rendered notebook is a [`SafeHtml`] value. It is
//! produced by one of:
//! - [`sanitize`]: untrusted markup filtered through a fixed `ammonia` policy
//! - [`escape_text`] / [`preformatted`]: text that must never be interpreted as markup
//! - [`SafeHtml::from_trusted`]: markup built from already-escaped parts
//!
//! The policy is the `ammonia` default allow-list (common structural and formatting
//! tags, no scripts, no event handlers, no `javascript:` URLs) plus base64 raster images
//! embedded as `data:` URIs in `<img src>`.

use ammonia::Builder;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

/// Image types allowed in `data:` URIs
const DATA_URI_IMAGE_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Upper bound on policy passes in [`sanitize`]; the output is stable after two
const MAX_SANITIZE_PASSES: usize = 4;

static POLICY: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::default();
    builder
        .add_url_schemes(&["data"])
        .attribute_filter(filter_data_uri);
    builder
});

/// HTML that is safe to embed in a page
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SafeHtml(String);

impl SafeHtml {
    /// Empty fragment
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self(String::new())
    }

    /// Wrap markup that is already known to be safe.
    ///
    /// The caller vouches that every piece of text in `html` was escaped. Use
    /// [`sanitize`] for anything else.
    #[inline]
    #[must_use]
    pub fn from_trusted(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Borrow the markup
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take the markup out
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeHtml {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeHtml {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SafeHtml> for String {
    #[inline]
    fn from(html: SafeHtml) -> Self {
        html.0
    }
}

/// Strip everything the policy does not allow from `html`.
///
/// Never fails; the worst case is an empty fragment. Sanitizing an already
/// sanitized fragment returns it unchanged.
///
/// A single `ammonia` pass is not always stable: mis-nested blocks get re-nested and a
/// `<pre>` starting with a newline loses it when the output is parsed again. The
/// policy is therefore applied until the markup stops changing.
#[must_use]
pub fn sanitize(html: &str) -> SafeHtml {
    let mut clean = POLICY.clean(html).to_string();
    for _ in 1..MAX_SANITIZE_PASSES {
        let again = POLICY.clean(&clean).to_string();
        if again == clean {
            break;
        }
        clean = again;
    }
    SafeHtml(clean)
}

/// Escape `text` so that it renders literally.
#[must_use]
pub fn escape_text(text: &str) -> SafeHtml {
    let mut escaped = String::with_capacity(text.len());
    escape_into(&mut escaped, text);
    SafeHtml(escaped)
}

/// Escaped `text` inside a `<pre>` block.
#[must_use]
pub fn preformatted(text: &str) -> SafeHtml {
    let mut html = String::with_capacity(text.len() + 11);
    html.push_str("<pre>");
    escape_into(&mut html, text);
    html.push_str("</pre>");
    SafeHtml(html)
}

/// Append the escaped form of `text` to `out`.
///
/// Quotes are escaped too, so the result is usable inside attribute values.
pub(crate) fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

/// Drop `data:` URIs unless they are base64 images in `<img src>`.
fn filter_data_uri<'u>(element: &str, attribute: &str, value: &'u str) -> Option<Cow<'u, str>> {
    let uri = value.trim_start();
    let is_data_uri = uri
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"));

    if !is_data_uri || (element == "img" && attribute == "src" && is_image_data_uri(uri)) {
        Some(Cow::Borrowed(value))
    } else {
        None
    }
}

/// `data:image/<type>;base64,<payload>` with an allowed type and a decodable payload.
///
/// ASCII whitespace inside the payload is ignored, notebooks often store images with
/// line breaks.
fn is_image_data_uri(uri: &str) -> bool {
    let Some((header, payload)) = uri.get(5..).and_then(|rest| rest.split_once(',')) else {
        return false;
    };
    let Some(mime) = header.strip_suffix(";base64") else {
        return false;
    };
    if !DATA_URI_IMAGE_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(mime))
    {
        return false;
    }

    let compact: String = payload
        .chars()
        .filter(|ch| !ch.is_ascii_whitespace())
        .collect();
    !compact.is_empty() && STANDARD.decode(compact.as_bytes()).is_ok()
}
