//! Source detection and decoding.
//!
//! Maps a source file name to its kind and default structure mode, decodes
//! raw payloads as UTF-8, and turns Jupyter notebooks into Markdown text.

use crate::error::{Error, Result};
use crate::parser::StructureMode;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Fence language for notebooks that do not declare one.
const DEFAULT_NOTEBOOK_LANGUAGE: &str = "python";

/// Kind of source payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceKind {
    /// Markdown text (`.md`, `.markdown`, `.mdown`)
    Markdown,
    /// Jupyter notebook JSON (`.ipynb`)
    Notebook,
    /// Anything else, treated as plain text
    #[default]
    PlainText,
}

impl SourceKind {
    /// Detect the kind from a file name or path by its extension.
    ///
    /// # Example
    /// ```
    /// use docpress::source::SourceKind;
    ///
    /// assert_eq!(SourceKind::from_file_name("notes.MD"), SourceKind::Markdown);
    /// assert_eq!(SourceKind::from_file_name("lab.ipynb"), SourceKind::Notebook);
    /// assert_eq!(SourceKind::from_file_name("data.csv"), SourceKind::PlainText);
    /// ```
    pub fn from_file_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("md" | "markdown" | "mdown") => SourceKind::Markdown,
            Some("ipynb") => SourceKind::Notebook,
            _ => SourceKind::PlainText,
        }
    }

    /// Structure mode used when the caller does not pick one.
    pub fn default_mode(&self) -> StructureMode {
        match self {
            SourceKind::Markdown | SourceKind::Notebook => StructureMode::Markdown,
            SourceKind::PlainText => StructureMode::Literal,
        }
    }

    /// Turn a decoded payload of this kind into analyzable text.
    pub fn prepare(&self, text: &str) -> Result<String> {
        match self {
            SourceKind::Notebook => notebook_to_markdown(text),
            SourceKind::Markdown | SourceKind::PlainText => Ok(text.to_string()),
        }
    }
}

/// Decode a payload as UTF-8, skipping a leading byte order mark.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    Ok(std::str::from_utf8(bytes)?)
}

/// Read a source file, returning its kind and analyzable text.
pub fn read_source<P: AsRef<Path>>(path: P) -> Result<(SourceKind, String)> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let kind = SourceKind::from_file_name(name);
    let text = kind.prepare(decode_utf8(&bytes)?)?;
    log::debug!("Read {:?} source {} ({} bytes)", kind, path.display(), bytes.len());
    Ok((kind, text))
}

#[derive(Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<Cell>,
    #[serde(default)]
    metadata: NotebookMetadata,
}

#[derive(Deserialize, Default)]
struct NotebookMetadata {
    #[serde(default)]
    language_info: Option<LanguageInfo>,
}

#[derive(Deserialize)]
struct LanguageInfo {
    name: Option<String>,
}

#[derive(Deserialize)]
struct Cell {
    cell_type: String,
    #[serde(default)]
    source: CellSource,
}

/// Notebook cell sources are either one string or a list of lines.
#[derive(Deserialize)]
#[serde(untagged)]
enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Text(String::new())
    }
}

impl CellSource {
    fn joined(&self) -> String {
        match self {
            CellSource::Text(text) => text.clone(),
            CellSource::Lines(lines) => lines.concat(),
        }
    }
}

/// Convert Jupyter notebook JSON into Markdown.
///
/// Markdown cells are copied verbatim, code cells become fenced blocks in
/// the notebook's language (`python` when undeclared), and blank cells and
/// outputs are skipped.
pub fn notebook_to_markdown(json: &str) -> Result<String> {
    let notebook: Notebook =
        serde_json::from_str(json).map_err(|e| Error::Notebook(e.to_string()))?;

    let language = notebook
        .metadata
        .language_info
        .and_then(|info| info.name)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_NOTEBOOK_LANGUAGE.to_string());

    let mut sections = Vec::new();
    for cell in &notebook.cells {
        let source = cell.source.joined();
        if source.trim().is_empty() {
            continue;
        }
        let source = source.trim_end_matches('\n');
        match cell.cell_type.as_str() {
            "markdown" => sections.push(source.to_string()),
            "code" => sections.push(format!("```{}\n{}\n```", language, source)),
            other => log::debug!("Skipping notebook cell of type {:?}", other),
        }
    }

    Ok(sections.join("\n\n"))
}
