//! Property-Based Tests
//!
//! Tests using property-based testing (proptest) to verify invariants:
//! - Sanitizing is idempotent and never lets scripts through
//! - Escaped text never contains markup
//! - Conversion never panics and keeps one container per cell

use nbhtml_render::{convert_notebook_str, escape_text, sanitize, strip_ansi};
use proptest::prelude::*;

/// Tag soup built from a fixed vocabulary of inline and block markup, text and
/// hostile snippets. Tags are left unbalanced on purpose.
fn html_soup() -> impl Strategy<Value = String> {
    let snippet = prop::sample::select(vec![
        "<b>",
        "</b>",
        "<em>",
        "</em>",
        "<code>",
        "</code>",
        "<span title=\"t\">",
        "</span>",
        "<p>",
        "</p>",
        "<div>",
        "</div>",
        "<h1>",
        "</h1>",
        "<form>",
        "</form>",
        "<table>",
        "</table>",
        "<tr>",
        "<td>",
        "<pre>",
        "</pre>",
        "<li>",
        "\n",
        "<script>alert(1)</script>",
        "<img src=\"x\" onerror=\"alert(1)\">",
        "<img src=\"data:image/png;base64,iVBORw0KGgo=\">",
        " & ",
    ])
    .prop_map(|snippet| snippet.to_string());
    let fragment = prop_oneof![snippet, "[a-zA-Z0-9 ]{0,12}"];
    prop::collection::vec(fragment, 0..24).prop_map(|parts| parts.concat())
}

// ============================================================================
// Sanitizer Properties
// ============================================================================

/// Property: sanitize(sanitize(x)) == sanitize(x)
#[test]
fn proptest_sanitize_idempotent() {
    proptest!(|(html in html_soup())| {
        let once = sanitize(&html);
        let twice = sanitize(once.as_str());
        prop_assert_eq!(twice, once);
    });
}

/// Property: no script or event handler survives sanitizing
#[test]
fn proptest_sanitize_removes_scripts() {
    proptest!(|(html in html_soup())| {
        let clean = sanitize(&html);
        prop_assert!(!clean.as_str().contains("<script"));
        prop_assert!(!clean.as_str().contains("onerror"));
    });
}

/// Property: sanitize never panics on arbitrary text
#[test]
fn proptest_sanitize_no_panic() {
    proptest!(|(text in "\\PC{0,300}")| {
        let _ = sanitize(&text);
    });
}

// ============================================================================
// Escaping Properties
// ============================================================================

/// Property: escaped text contains no markup characters
#[test]
fn proptest_escape_text_has_no_markup() {
    proptest!(|(text in "\\PC{0,200}")| {
        let escaped = escape_text(&text);
        prop_assert!(!escaped.as_str().contains('<'));
        prop_assert!(!escaped.as_str().contains('>'));
        prop_assert!(!escaped.as_str().contains('"'));
    });
}

/// Property: stripping ANSI codes leaves text without escape sequences intact
#[test]
fn proptest_strip_ansi_keeps_plain_text() {
    proptest!(|(text in "[^\\x1b]{0,200}")| {
        prop_assert_eq!(strip_ansi(&text), text.as_str());
    });
}

// ============================================================================
// Conversion Properties
// ============================================================================

/// Property: arbitrary payloads never panic the converter
#[test]
fn proptest_convert_no_panic() {
    proptest!(|(payload in "\\PC{0,300}")| {
        let _ = convert_notebook_str(&payload);
    });
}

/// Property: one cell container per cell, whatever the cell contents
#[test]
fn proptest_one_container_per_cell() {
    let cell = (
        prop_oneof![Just("markdown"), Just("code"), Just("raw"), Just("other")],
        "\\PC{0,40}",
    );
    proptest!(ProptestConfig::with_cases(64), |(cells in prop::collection::vec(cell, 0..8))| {
        let cells_json: Vec<serde_json::Value> = cells
            .iter()
            .map(|(kind, source)| serde_json::json!({"cell_type": kind, "source": source}))
            .collect();
        let notebook = serde_json::json!({
            "nbformat": 4,
            "nbformat_minor": 5,
            "metadata": {},
            "cells": cells_json,
        });

        let html = convert_notebook_str(&notebook.to_string()).unwrap();
        prop_assert_eq!(html.matches("<div class=\"cell ").count(), cells.len());
    });
}
