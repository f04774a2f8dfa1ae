//! # docpress
//!
//! Text and Markdown to paginated PDF and DOCX conversion.
//!
//! Raw text is analyzed into a [`StructuredDocument`] of headings,
//! paragraphs, bullets, quotes, code blocks and tables, then emitted either
//! as a PDF laid out with one of three typographic templates or as a DOCX
//! package that maps each block onto a Word style.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docpress::{Docpress, OutputFormat, TemplateName};
//!
//! fn main() -> docpress::Result<()> {
//!     let result = Docpress::new()
//!         .with_template(TemplateName::Modern)
//!         .with_format(OutputFormat::Pdf)
//!         .convert_file("notes.md")?;
//!
//!     let path = result.persist_in(".")?;
//!     println!("{} ({} pages)", path.display(), result.stats.page_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Structure modes**: Markdown, automatic structure, literal, bulletize
//! - **Inline styling**: bold, italic and code spans carried to both outputs
//! - **Templates**: classic (serif), modern (sans) and minimal (monospace)
//! - **Deterministic output**: identical input yields identical bytes
//! - **Batch conversion**: independent documents converted in parallel

pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertRequest, ConvertResult, EmitOutput, Emitter, EmitterRegistry,
    OutputFormat,
};
pub use error::{Error, Result, Warning};
pub use model::{Block, RunStyle, StructuredDocument, StyledRun, Table, TitleSource};
pub use parser::{AnalyzeOptions, Analyzer, StructureMode};
pub use render::{ConversionStats, EmitOptions, JsonFormat, PageSize, Template, TemplateName};
pub use source::SourceKind;

use std::path::Path;

/// Analyze text in Markdown mode and return the structured document.
///
/// # Example
///
/// ```
/// use docpress::{analyze, Block};
///
/// let doc = analyze("# Title\n\n- first\n- second", None);
/// assert_eq!(doc.title, "Title");
/// assert_eq!(doc.block_count(), 3);
/// assert!(matches!(doc.blocks[1], Block::Bullet { .. }));
/// ```
pub fn analyze(text: &str, title_hint: Option<&str>) -> StructuredDocument {
    let mut options = AnalyzeOptions::default();
    if let Some(hint) = title_hint {
        options = options.with_title_hint(hint);
    }
    Analyzer::new(options).analyze(text).document
}

/// Convert text with the default emitters.
///
/// # Example
///
/// ```no_run
/// use docpress::{convert, ConvertOptions, OutputFormat};
///
/// let options = ConvertOptions::new().with_format(OutputFormat::Docx);
/// let result = convert("Plain **bold** text", &options)?;
/// std::fs::write(&result.file_name, &result.bytes)?;
/// # Ok::<(), docpress::Error>(())
/// ```
pub fn convert(text: &str, options: &ConvertOptions) -> Result<ConvertResult> {
    EmitterRegistry::with_defaults().convert(text, options)
}

/// Convert UTF-8 bytes with the default emitters.
pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
    EmitterRegistry::with_defaults().convert_bytes(bytes, options)
}

/// Convert a source file with the default emitters.
///
/// Notebooks are turned into Markdown first. The file name is used as the
/// title fallback and output stem unless `options` already names one. The
/// structure mode in `options` is used as given; see [`Docpress`] for
/// mode selection by file kind.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<ConvertResult> {
    let path = path.as_ref();
    let (_, text) = source::read_source(path)?;
    let options = with_source_name(options.clone(), path);
    convert(&text, &options)
}

/// Convert independent requests in parallel with the default emitters.
pub fn convert_batch(requests: &[ConvertRequest]) -> Vec<Result<ConvertResult>> {
    EmitterRegistry::with_defaults().convert_batch(requests)
}

fn with_source_name(options: ConvertOptions, path: &Path) -> ConvertOptions {
    if options.analyze.file_name.is_some() {
        return options;
    }
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => options.with_file_name(name),
        None => options,
    }
}

/// Builder-style API for conversions.
///
/// When no structure mode is set, files use the default mode of their kind
/// (Markdown for `.md` and `.ipynb`, literal otherwise) and strings use
/// Markdown.
///
/// # Example
///
/// ```no_run
/// use docpress::{Docpress, OutputFormat, PageSize, StructureMode};
///
/// let result = Docpress::new()
///     .with_format(OutputFormat::Docx)
///     .with_mode(StructureMode::Bulletize)
///     .with_title("Standup")
///     .with_page_size(PageSize::LETTER)
///     .convert_str("did a thing\nwill do another")?;
/// # Ok::<(), docpress::Error>(())
/// ```
pub struct Docpress {
    options: ConvertOptions,
    mode: Option<StructureMode>,
    registry: EmitterRegistry,
}

impl Docpress {
    /// Create a new Docpress builder.
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
            mode: None,
            registry: EmitterRegistry::with_defaults(),
        }
    }

    /// Set the template.
    pub fn with_template(mut self, template: TemplateName) -> Self {
        self.options = self.options.with_template(template);
        self
    }

    /// Set the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.options = self.options.with_format(format);
        self
    }

    /// Force a structure mode.
    pub fn with_mode(mut self, mode: StructureMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the display title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options = self.options.with_title(title);
        self
    }

    /// Do not add the title as a heading or title line.
    pub fn without_title_heading(mut self) -> Self {
        self.options = self.options.with_title_heading(false);
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.options = self.options.with_page_size(page_size);
        self
    }

    /// Set the emission options.
    pub fn with_emit_options(mut self, options: EmitOptions) -> Self {
        self.options = self.options.with_emit_options(options);
        self
    }

    /// Register an additional emitter, replacing the default for its format.
    pub fn with_emitter(mut self, emitter: std::sync::Arc<dyn Emitter>) -> Self {
        self.registry.register(emitter);
        self
    }

    /// Get the options a conversion of a source kind would use.
    pub fn options_for(&self, kind: SourceKind) -> ConvertOptions {
        let mode = self.mode.unwrap_or_else(|| kind.default_mode());
        self.options.clone().with_mode(mode)
    }

    /// Convert a source file.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<ConvertResult> {
        let path = path.as_ref();
        let (kind, text) = source::read_source(path)?;
        let options = with_source_name(self.options_for(kind), path);
        self.registry.convert(&text, &options)
    }

    /// Convert a string.
    pub fn convert_str(&self, text: &str) -> Result<ConvertResult> {
        self.registry
            .convert(text, &self.options_for(SourceKind::Markdown))
    }
}

impl Default for Docpress {
    fn default() -> Self {
        Self::new()
    }
}
