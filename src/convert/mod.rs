//! Conversion pipeline with pluggable output emitters.
//!
//! An [`Emitter`] turns a [`StructuredDocument`] into the bytes of one
//! output format. The [`EmitterRegistry`] maps formats to emitters and runs
//! the whole pipeline: title handling, analysis, emission and statistics.
//!
//! # Example
//!
//! ```no_run
//! use docpress::convert::{ConvertOptions, EmitterRegistry, OutputFormat};
//!
//! fn main() -> docpress::Result<()> {
//!     let registry = EmitterRegistry::with_defaults();
//!     let options = ConvertOptions::new()
//!         .with_format(OutputFormat::Docx)
//!         .with_title("Release Notes");
//!
//!     let result = registry.convert("Fixed the *important* bug.", &options)?;
//!     result.persist_in(".")?;
//!     Ok(())
//! }
//! ```

mod docx;
mod pdf;

pub use docx::DocxEmitter;
pub use pdf::PdfEmitter;

use crate::error::{Error, Result, Warning};
use crate::model::StructuredDocument;
use crate::parser::{
    inject_heading, title_from_file_name, Analysis, AnalyzeOptions, Analyzer, StructureMode,
};
use crate::render::{ConversionStats, EmitOptions, PageSize, Template, TemplateName};
use crate::source::decode_utf8;
use rayon::prelude::*;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Stem used for output file names when no source name is known.
const DEFAULT_STEM: &str = "document";

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Paginated PDF
    #[default]
    Pdf,

    /// Word-processor document (OOXML)
    Docx,
}

impl OutputFormat {
    /// All supported formats.
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Pdf, OutputFormat::Docx];

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" | "pdf-style" => Ok(OutputFormat::Pdf),
            "docx" | "word" | "word-processor-style" => Ok(OutputFormat::Docx),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Options for a conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Typographic template
    pub template: TemplateName,

    /// Output format
    pub format: OutputFormat,

    /// Analysis options (mode, title hint, file name)
    pub analyze: AnalyzeOptions,

    /// Emission options (page size, timestamps)
    pub emit: EmitOptions,

    /// In Markdown mode, make the title a level-1 heading when the text
    /// has none; when disabled the document carries no separate title in
    /// any mode.
    pub title_heading: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self {
            template: TemplateName::default(),
            format: OutputFormat::default(),
            analyze: AnalyzeOptions::default(),
            emit: EmitOptions::default(),
            title_heading: true,
        }
    }

    /// Set the template.
    pub fn with_template(mut self, template: TemplateName) -> Self {
        self.template = template;
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the structure mode.
    pub fn with_mode(mut self, mode: StructureMode) -> Self {
        self.analyze.mode = mode;
        self
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.analyze.title_hint = Some(title.into());
        self
    }

    /// Set the source file name (title fallback and output name).
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.analyze.file_name = Some(name.into());
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.emit.page_size = page_size;
        self
    }

    /// Enable or disable title heading injection.
    pub fn with_title_heading(mut self, enabled: bool) -> Self {
        self.title_heading = enabled;
        self
    }

    /// Replace the analysis options.
    pub fn with_analyze_options(mut self, options: AnalyzeOptions) -> Self {
        self.analyze = options;
        self
    }

    /// Replace the emission options.
    pub fn with_emit_options(mut self, options: EmitOptions) -> Self {
        self.emit = options;
        self
    }

    /// Suggested output file name: the source stem plus the format extension.
    pub fn output_file_name(&self) -> String {
        let stem = self
            .analyze
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).file_stem())
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.trim().is_empty())
            .unwrap_or(DEFAULT_STEM);
        format!("{}.{}", stem, self.format.extension())
    }

    /// Title to inject as a heading: the hint, else the file-name title.
    fn heading_title(&self) -> Option<String> {
        let hint = self
            .analyze
            .title_hint
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        hint.or_else(|| {
            self.analyze
                .file_name
                .as_deref()
                .map(title_from_file_name)
                .filter(|t| !t.is_empty())
        })
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Bytes and layout facts produced by an emitter.
#[derive(Debug, Clone, Default)]
pub struct EmitOutput {
    /// Encoded document
    pub bytes: Vec<u8>,

    /// Pages laid out (0 when the format is not paginated here)
    pub page_count: u32,

    /// Warnings raised while emitting
    pub warnings: Vec<Warning>,
}

/// Trait for output emitters.
///
/// Implement this trait to add a new output format. Emitters are stateless
/// and deterministic: the same document, template and options always yield
/// the same bytes.
pub trait Emitter: Send + Sync {
    /// The format this emitter produces.
    fn format(&self) -> OutputFormat;

    /// Get the name of this emitter.
    fn name(&self) -> &str;

    /// Encode a document.
    fn emit(
        &self,
        doc: &StructuredDocument,
        template: &Template,
        options: &EmitOptions,
    ) -> Result<EmitOutput>;

    /// File extension of the output.
    fn extension(&self) -> &'static str {
        self.format().extension()
    }

    /// MIME type of the output.
    fn mime_type(&self) -> &'static str {
        self.format().mime_type()
    }
}

/// Result of a conversion.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Encoded output document
    pub bytes: Vec<u8>,

    /// Suggested file name (`<stem>.<ext>`)
    pub file_name: String,

    /// Output format
    pub format: OutputFormat,

    /// MIME type of the output
    pub mime_type: &'static str,

    /// Conversion statistics
    pub stats: ConversionStats,

    /// Warnings from analysis and emission
    pub warnings: Vec<Warning>,
}

impl ConvertResult {
    /// Get output length in bytes.
    pub fn content_len(&self) -> usize {
        self.bytes.len()
    }

    /// Write the output into `dir` under [`ConvertResult::file_name`].
    ///
    /// The bytes go to a temporary file in the same directory which is
    /// renamed over the target only after the write succeeded, so readers
    /// never observe a partial file.
    pub fn persist_in<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        let target = dir.join(&self.file_name);

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&self.bytes)?;
        file.flush()?;
        file.persist(&target).map_err(|e| e.error)?;

        log::debug!("Wrote {} ({} bytes)", target.display(), self.bytes.len());
        Ok(target)
    }
}

/// A text payload and its conversion options.
#[derive(Debug, Clone)]
pub struct ConvertRequest {
    /// Source text
    pub text: String,

    /// Conversion options
    pub options: ConvertOptions,
}

impl ConvertRequest {
    /// Create a request.
    pub fn new(text: impl Into<String>, options: ConvertOptions) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}

/// Analyze text with the title rules of a conversion.
///
/// In Markdown mode with `title_heading` enabled, the title hint (or the
/// file-name title) is injected as a level-1 heading unless the text
/// already starts with one. With `title_heading` disabled, a title that did
/// not come from a heading in the text is dropped in every mode.
pub fn analyze_for_conversion(text: &str, options: &ConvertOptions) -> Analysis {
    let markdown = options.analyze.mode == StructureMode::Markdown;

    let text: Cow<'_, str> = match options.heading_title() {
        Some(title) if markdown && options.title_heading => {
            Cow::Owned(inject_heading(text, &title))
        }
        _ => Cow::Borrowed(text),
    };

    let mut analysis = Analyzer::new(options.analyze.clone()).analyze(&text);
    if !options.title_heading {
        analysis.document.clear_title();
    }
    analysis
}

/// Registry of output emitters.
///
/// The registry maps output formats to emitters and runs conversions.
pub struct EmitterRegistry {
    emitters: HashMap<OutputFormat, Arc<dyn Emitter>>,
}

impl EmitterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            emitters: HashMap::new(),
        }
    }

    /// Create a registry with the PDF and DOCX emitters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfEmitter::new()));
        registry.register(Arc::new(DocxEmitter::new()));
        registry
    }

    /// Register an emitter, replacing any previous one for its format.
    pub fn register(&mut self, emitter: Arc<dyn Emitter>) {
        self.emitters.insert(emitter.format(), emitter);
    }

    /// Get the emitter for a format.
    pub fn get(&self, format: OutputFormat) -> Option<Arc<dyn Emitter>> {
        self.emitters.get(&format).cloned()
    }

    /// Check if a format has an emitter.
    pub fn supports(&self, format: OutputFormat) -> bool {
        self.emitters.contains_key(&format)
    }

    /// Convert text into the format selected by `options`.
    pub fn convert(&self, text: &str, options: &ConvertOptions) -> Result<ConvertResult> {
        let emitter = self
            .get(options.format)
            .ok_or_else(|| Error::UnknownFormat(options.format.to_string()))?;
        let template = options.template.template();

        let Analysis {
            document,
            mut warnings,
        } = analyze_for_conversion(text, options);

        let output = emitter.emit(&document, template, &options.emit)?;
        warnings.extend(output.warnings);

        let mut stats = ConversionStats::from_document(&document);
        stats.page_count = output.page_count;
        stats.warning_count = warnings.len() as u32;

        log::info!(
            "Converted {} blocks to {} with template {} ({} pages, {} bytes, {} warnings)",
            document.blocks.len(),
            emitter.name(),
            template.name,
            output.page_count,
            output.bytes.len(),
            warnings.len()
        );

        Ok(ConvertResult {
            bytes: output.bytes,
            file_name: options.output_file_name(),
            format: options.format,
            mime_type: emitter.mime_type(),
            stats,
            warnings,
        })
    }

    /// Decode UTF-8 bytes and convert them.
    pub fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        self.convert(decode_utf8(bytes)?, options)
    }

    /// Convert independent requests in parallel.
    ///
    /// Results are returned in request order; one failure does not affect
    /// the others.
    pub fn convert_batch(&self, requests: &[ConvertRequest]) -> Vec<Result<ConvertResult>> {
        requests
            .par_iter()
            .map(|request| self.convert(&request.text, &request.options))
            .collect()
    }
}

impl Default for EmitterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
