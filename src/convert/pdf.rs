//! PDF emitter implementation.

use crate::error::Result;
use crate::model::StructuredDocument;
use crate::render::{write_pdf, EmitOptions, LayoutEngine, Template};

use super::{EmitOutput, Emitter, OutputFormat};

/// PDF emitter.
///
/// Paginates the document with the template metrics, then writes the pages
/// as a PDF using the standard fonts.
#[derive(Debug, Clone, Default)]
pub struct PdfEmitter {
    _private: (),
}

impl PdfEmitter {
    /// Create a new PDF emitter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Emitter for PdfEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn emit(
        &self,
        doc: &StructuredDocument,
        template: &Template,
        options: &EmitOptions,
    ) -> Result<EmitOutput> {
        let layout = LayoutEngine::new(template, options.page_size)
            .with_title_line(options.show_title)
            .layout(doc);
        let bytes = write_pdf(&layout, &doc.title, options)?;

        Ok(EmitOutput {
            bytes,
            page_count: layout.pages.len() as u32,
            warnings: layout.warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, StyledRun, TitleSource};
    use crate::render::{PageSize, CLASSIC};

    #[test]
    fn test_pdf_emitter_metadata() {
        let emitter = PdfEmitter::new();
        assert_eq!(emitter.format(), OutputFormat::Pdf);
        assert_eq!(emitter.extension(), "pdf");
        assert_eq!(emitter.mime_type(), "application/pdf");
    }

    #[test]
    fn test_pdf_emitter_counts_pages() {
        let mut doc = StructuredDocument::with_title("Pages", TitleSource::Hint);
        for i in 0..200 {
            doc.push(Block::paragraph(vec![StyledRun::plain(format!("Line {}", i))]));
        }

        let output = PdfEmitter::new()
            .emit(&doc, &CLASSIC, &EmitOptions::new())
            .unwrap();

        assert!(output.page_count > 1);
        let loaded = lopdf::Document::load_mem(&output.bytes).unwrap();
        assert_eq!(loaded.get_pages().len() as u32, output.page_count);
    }

    #[test]
    fn test_pdf_emitter_uses_page_size() {
        let doc = StructuredDocument::with_title("Letter", TitleSource::Hint);
        let options = EmitOptions::new().with_page_size(PageSize::LETTER);
        let output = PdfEmitter::new().emit(&doc, &CLASSIC, &options).unwrap();

        let loaded = lopdf::Document::load_mem(&output.bytes).unwrap();
        let (_, page_id) = loaded.get_pages().into_iter().next().unwrap();
        let page = loaded.get_dictionary(page_id).unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box[2].as_float().unwrap(), 612.0);
        assert_eq!(media_box[3].as_float().unwrap(), 792.0);
    }
}
