use crate::error::{NotebookError, Result};
use crate::multiline;
use serde::Deserialize;

/// Oldest nbformat major version accepted by the parser
pub const MIN_NBFORMAT: i64 = 4;

/// Parsed Jupyter Notebook content
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParsedNotebook {
    /// Notebook-level metadata
    pub metadata: NotebookMetadata,
    /// List of cells in the notebook, in source order
    pub cells: Vec<NotebookCell>,
    /// nbformat major version (always >= [`MIN_NBFORMAT`])
    pub nbformat: i64,
    /// nbformat minor version
    pub nbformat_minor: i64,
}

/// Notebook-level metadata
///
/// Only the fields that identify the notebook language are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NotebookMetadata {
    /// `language_info.file_extension` (e.g. ".py")
    pub file_extension: Option<String>,
    /// `kernelspec.language` (e.g. "python", "R")
    pub kernel_language: Option<String>,
    /// `kernelspec.name` (e.g. "python3", "ir")
    pub kernel_name: Option<String>,
}

impl NotebookMetadata {
    /// Language hint used to pick a highlighter for every code cell.
    ///
    /// Precedence follows field presence: file extension (without its leading `.`),
    /// then kernel language, then kernel name. An empty string means the
    /// highlighter should detect the language from the source itself.
    #[inline]
    #[must_use]
    pub fn language_hint(&self) -> &str {
        if let Some(ext) = &self.file_extension {
            ext.strip_prefix('.').unwrap_or(ext)
        } else if let Some(language) = &self.kernel_language {
            language.as_str()
        } else if let Some(name) = &self.kernel_name {
            name.as_str()
        } else {
            ""
        }
    }
}

/// Individual notebook cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotebookCell {
    /// Type of cell (code, markdown, raw or anything else)
    pub cell_type: CellType,
    /// Cell source content, fragments already joined
    pub source: String,
    /// Execution count, only ever set for code cells
    pub execution_count: Option<i64>,
    /// Cell outputs, only ever non-empty for code cells
    pub outputs: Vec<CellOutput>,
}

/// Type of notebook cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellType {
    /// Executable code cell
    Code,
    /// Markdown documentation cell
    Markdown,
    /// Raw text cell (no formatting)
    Raw,
    /// Any cell type this crate does not know about, kept verbatim
    Other(String),
}

impl CellType {
    /// The `cell_type` string as it appears in the notebook
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Code => "code",
            Self::Markdown => "markdown",
            Self::Raw => "raw",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for CellType {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for CellType {
    fn from(s: &str) -> Self {
        match s {
            "code" => Self::Code,
            "markdown" => Self::Markdown,
            "raw" => Self::Raw,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A single output attached to a code cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellOutput {
    /// Type of output (`stream`, `display_data`, `execute_result`, `error`, ...)
    pub output_type: OutputType,
    /// Execution count (execute results only)
    pub execution_count: Option<i64>,
    /// Stream text, fragments already joined
    pub text: Option<String>,
    /// Error traceback lines, possibly carrying ANSI color codes
    pub traceback: Option<Vec<String>>,
    /// Rich data of display data and execute results
    pub data: MimeBundle,
}

/// Type of cell output
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputType {
    /// Stream output (stdout/stderr)
    Stream,
    /// Rich display data (images, HTML, etc.)
    DisplayData,
    /// Result of code execution
    ExecuteResult,
    /// Error traceback
    Error,
    /// Any output type this crate does not know about, kept verbatim
    Other(String),
}

impl OutputType {
    /// The `output_type` string as it appears in the notebook
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stream => "stream",
            Self::DisplayData => "display_data",
            Self::ExecuteResult => "execute_result",
            Self::Error => "error",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for OutputType {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for OutputType {
    fn from(s: &str) -> Self {
        match s {
            "stream" => Self::Stream,
            "display_data" => Self::DisplayData,
            "execute_result" => Self::ExecuteResult,
            "error" => Self::Error,
            other => Self::Other(other.to_string()),
        }
    }
}

/// MIME bundle of a rich output
///
/// Each supported MIME type is an optional field; unknown types are ignored.
/// PDF and LaTeX content is kept in the model but has no HTML rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct MimeBundle {
    /// `text/html`
    #[serde(rename = "text/html", default, deserialize_with = "multiline::deserialize_option")]
    pub html: Option<String>,
    /// `application/pdf`
    #[serde(rename = "application/pdf", default, deserialize_with = "multiline::deserialize_option")]
    pub pdf: Option<String>,
    /// `text/latex`
    #[serde(rename = "text/latex", default, deserialize_with = "multiline::deserialize_option")]
    pub latex: Option<String>,
    /// `image/svg+xml`
    #[serde(rename = "image/svg+xml", default, deserialize_with = "multiline::deserialize_option")]
    pub svg: Option<String>,
    /// `image/png`, base64 encoded
    #[serde(rename = "image/png", default, deserialize_with = "multiline::deserialize_option")]
    pub png: Option<String>,
    /// `image/jpeg`, base64 encoded
    #[serde(rename = "image/jpeg", default, deserialize_with = "multiline::deserialize_option")]
    pub jpeg: Option<String>,
    /// `text/markdown`
    #[serde(rename = "text/markdown", default, deserialize_with = "multiline::deserialize_option")]
    pub markdown: Option<String>,
    /// `text/plain`
    #[serde(rename = "text/plain", default, deserialize_with = "multiline::deserialize_option")]
    pub plain: Option<String>,
}

// On-disk nbformat 4 layout. Everything optional is defaulted so that only
// structurally broken payloads fail to parse.

#[derive(Deserialize)]
struct RawNotebook {
    #[serde(default)]
    cells: Vec<RawCell>,
    #[serde(default)]
    metadata: RawMetadata,
    #[serde(default)]
    nbformat: i64,
    #[serde(default)]
    nbformat_minor: i64,
}

#[derive(Default, Deserialize)]
struct RawMetadata {
    language_info: Option<RawLanguageInfo>,
    kernelspec: Option<RawKernelSpec>,
}

#[derive(Deserialize)]
struct RawLanguageInfo {
    file_extension: Option<String>,
}

#[derive(Deserialize)]
struct RawKernelSpec {
    language: Option<String>,
    name: Option<String>,
}

#[derive(Deserialize)]
struct RawCell {
    #[serde(default)]
    cell_type: String,
    execution_count: Option<i64>,
    #[serde(default, deserialize_with = "multiline::deserialize")]
    source: String,
    #[serde(default)]
    outputs: Vec<RawOutput>,
}

#[derive(Deserialize)]
struct RawOutput {
    #[serde(default)]
    output_type: String,
    execution_count: Option<i64>,
    #[serde(default, deserialize_with = "multiline::deserialize_option")]
    text: Option<String>,
    traceback: Option<Vec<String>>,
    #[serde(default)]
    data: MimeBundle,
}

/// Parse a Jupyter Notebook from a string
///
/// # Errors
///
/// Returns an error if:
/// - The notebook JSON is malformed
/// - The notebook format is older than [`MIN_NBFORMAT`]
#[must_use = "this function returns a parsed notebook that should be processed"]
pub fn parse_notebook_from_str(content: &str) -> Result<ParsedNotebook> {
    let raw: RawNotebook = serde_json::from_str(content)?;

    if raw.nbformat < MIN_NBFORMAT {
        return Err(NotebookError::UnsupportedVersion {
            major: raw.nbformat,
            minor: raw.nbformat_minor,
        });
    }

    let metadata = extract_metadata(raw.metadata);
    let cells: Vec<NotebookCell> = raw.cells.into_iter().map(extract_cell).collect();

    log::debug!(
        "Parsed notebook v{}.{} with {} cells",
        raw.nbformat,
        raw.nbformat_minor,
        cells.len()
    );

    Ok(ParsedNotebook {
        metadata,
        cells,
        nbformat: raw.nbformat,
        nbformat_minor: raw.nbformat_minor,
    })
}

/// Extract notebook metadata
fn extract_metadata(metadata: RawMetadata) -> NotebookMetadata {
    let file_extension = metadata.language_info.and_then(|li| li.file_extension);
    let (kernel_language, kernel_name) = metadata
        .kernelspec
        .map_or((None, None), |ks| (ks.language, ks.name));

    NotebookMetadata {
        file_extension,
        kernel_language,
        kernel_name,
    }
}

/// Convert one on-disk cell, dropping execution data from non-code cells
fn extract_cell(cell: RawCell) -> NotebookCell {
    let cell_type = CellType::from(cell.cell_type.as_str());

    match cell_type {
        CellType::Code => NotebookCell {
            cell_type,
            source: cell.source,
            execution_count: cell.execution_count,
            outputs: cell.outputs.into_iter().map(extract_output).collect(),
        },
        _ => NotebookCell {
            cell_type,
            source: cell.source,
            execution_count: None,
            outputs: Vec::new(),
        },
    }
}

fn extract_output(output: RawOutput) -> CellOutput {
    CellOutput {
        output_type: OutputType::from(output.output_type.as_str()),
        execution_count: output.execution_count,
        text: output.text,
        traceback: output.traceback,
        data: output.data,
    }
}
