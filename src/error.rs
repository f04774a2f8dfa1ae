//! Error and warning types for docpress.

use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Result type alias for docpress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort a conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The requested template is not in the registry.
    #[error("Template not found: {0} (expected one of classic, modern, minimal)")]
    TemplateNotFound(String),

    /// The requested output format is not supported.
    #[error("Unknown output format: {0} (expected pdf or docx)")]
    UnknownFormat(String),

    /// The requested page size is not supported.
    #[error("Unknown page size: {0} (expected a4, letter or legal)")]
    UnknownPageSize(String),

    /// The requested structure mode is not supported.
    #[error("Unknown structure mode: {0} (expected markdown, auto, literal or bulletize)")]
    UnknownMode(String),

    /// The input payload is not valid UTF-8.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A notebook payload could not be decoded.
    #[error("Invalid notebook: {0}")]
    Notebook(String),

    /// Error building the PDF object graph.
    #[error("PDF generation error: {0}")]
    Pdf(String),

    /// Error writing the DOCX package.
    #[error("DOCX generation error: {0}")]
    Docx(String),

    /// Error during rendering (JSON dumps, layout).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Pdf(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Docx(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Docx(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(format!(
            "input is not valid UTF-8 (first invalid byte at offset {})",
            err.valid_up_to()
        ))
    }
}

/// Recoverable conditions reported alongside a successful result.
///
/// Warnings never interrupt the pipeline; they are logged as they occur
/// and collected so callers can surface them.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// A fenced code block was still open at end of input.
    #[error("line {line}: code fence opened here is never closed")]
    UnterminatedFence {
        /// 1-based line of the opening fence
        line: usize,
    },

    /// A pipe table whose header has no usable columns.
    #[error("line {line}: table header has no columns, rows kept as paragraphs")]
    MalformedTable {
        /// 1-based line of the header row
        line: usize,
    },

    /// A single word wider than the line it was placed on.
    #[error("page {page}: word {word:?} is wider than the text column")]
    Overflow {
        /// 1-based page number
        page: u32,
        /// The offending word
        word: String,
    },
}
