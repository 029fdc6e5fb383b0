//! Rendering of cell outputs

use crate::document::NotebookConverter;
use crate::sanitize::{preformatted, SafeHtml};
use nbhtml_notebook::{CellOutput, OutputType};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

// Pre-compiled regex pattern using std::sync::LazyLock (Rust 1.80+)
// SGR and cursor sequences: ESC [ params letter
static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").expect("valid ANSI escape regex"));

/// Shown for error outputs without a traceback
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Remove ANSI terminal escape sequences (colors, cursor movement) from `text`
#[must_use]
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(text, "")
}

impl NotebookConverter {
    /// Render one cell output.
    ///
    /// Display data and execute results go through [`NotebookConverter::render_data`],
    /// errors and streams become escaped `<pre>` blocks, unknown output types render
    /// nothing.
    #[must_use]
    pub fn render_output(&self, output: &CellOutput) -> SafeHtml {
        match &output.output_type {
            OutputType::DisplayData | OutputType::ExecuteResult => self.render_data(&output.data),
            OutputType::Error => render_traceback(output.traceback.as_deref()),
            OutputType::Stream => output
                .text
                .as_deref()
                .map_or_else(SafeHtml::empty, preformatted),
            OutputType::Other(kind) => {
                log::debug!("No rendering for output type '{kind}'");
                SafeHtml::empty()
            }
        }
    }
}

fn render_traceback(traceback: Option<&[String]>) -> SafeHtml {
    let Some(lines) = traceback else {
        return preformatted(UNKNOWN_ERROR_MESSAGE);
    };

    let text = lines
        .iter()
        .map(|line| strip_ansi(line))
        .collect::<Vec<_>>()
        .join("\n");
    preformatted(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbhtml_notebook::MimeBundle;

    fn output(output_type: OutputType) -> CellOutput {
        CellOutput {
            output_type,
            execution_count: None,
            text: None,
            traceback: None,
            data: MimeBundle::default(),
        }
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31mFAIL\x1b[0m"), "FAIL");
        assert_eq!(strip_ansi("\x1b[1;32mok\x1b[39;49m done"), "ok done");
        assert_eq!(strip_ansi("no escapes"), "no escapes");
        assert!(matches!(strip_ansi("no escapes"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_error_with_traceback() {
        let mut error = output(OutputType::Error);
        error.traceback = Some(vec![
            "\x1b[0;31mZeroDivisionError\x1b[0m Traceback".to_string(),
            "----> 1 \x1b[38;5;241m1\x1b[39m / 0".to_string(),
            "ZeroDivisionError: division by zero <here>".to_string(),
        ]);

        let html = NotebookConverter::new().render_output(&error);
        assert_eq!(
            html.as_str(),
            "<pre>ZeroDivisionError Traceback\n----&gt; 1 1 / 0\n\
             ZeroDivisionError: division by zero &lt;here&gt;</pre>"
        );
    }

    #[test]
    fn test_error_without_traceback() {
        let html = NotebookConverter::new().render_output(&output(OutputType::Error));
        assert_eq!(html.as_str(), "<pre>An unknown error occurred</pre>");
    }

    #[test]
    fn test_error_with_empty_traceback() {
        let mut error = output(OutputType::Error);
        error.traceback = Some(Vec::new());
        let html = NotebookConverter::new().render_output(&error);
        assert_eq!(html.as_str(), "<pre></pre>");
    }

    #[test]
    fn test_stream() {
        let mut stream = output(OutputType::Stream);
        stream.text = Some("line 1\nline <2>\n".to_string());
        let html = NotebookConverter::new().render_output(&stream);
        assert_eq!(html.as_str(), "<pre>line 1\nline &lt;2&gt;\n</pre>");

        let html = NotebookConverter::new().render_output(&output(OutputType::Stream));
        assert!(html.is_empty());
    }

    #[test]
    fn test_rich_outputs_use_data() {
        for output_type in [OutputType::DisplayData, OutputType::ExecuteResult] {
            let mut rich = output(output_type);
            rich.data.plain = Some("42".to_string());
            let html = NotebookConverter::new().render_output(&rich);
            assert_eq!(html.as_str(), "<pre>42</pre>");
        }
    }

    #[test]
    fn test_unknown_output_type_is_empty() {
        let mut unknown = output(OutputType::Other("pyout".to_string()));
        unknown.text = Some("ignored".to_string());
        assert!(NotebookConverter::new().render_output(&unknown).is_empty());
    }
}
