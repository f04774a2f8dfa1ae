//! DOCX emitter implementation.

use crate::error::Result;
use crate::model::StructuredDocument;
use crate::render::{write_docx, EmitOptions, Template};

use super::{EmitOutput, Emitter, OutputFormat};

/// DOCX emitter.
///
/// Maps blocks onto Word paragraph styles; pagination is left to the word
/// processor, so no page count is reported.
#[derive(Debug, Clone, Default)]
pub struct DocxEmitter {
    _private: (),
}

impl DocxEmitter {
    /// Create a new DOCX emitter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl Emitter for DocxEmitter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Docx
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn emit(
        &self,
        doc: &StructuredDocument,
        template: &Template,
        options: &EmitOptions,
    ) -> Result<EmitOutput> {
        Ok(EmitOutput {
            bytes: write_docx(doc, template, options)?,
            page_count: 0,
            warnings: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, StyledRun, TitleSource};
    use crate::render::MODERN;

    #[test]
    fn test_docx_emitter_metadata() {
        let emitter = DocxEmitter::new();
        assert_eq!(emitter.format(), OutputFormat::Docx);
        assert_eq!(emitter.extension(), "docx");
        assert!(emitter.mime_type().ends_with("wordprocessingml.document"));
    }

    #[test]
    fn test_docx_emitter_output_is_zip() {
        let mut doc = StructuredDocument::with_title("Memo", TitleSource::Hint);
        doc.push(Block::paragraph(vec![StyledRun::plain("Hello")]));

        let output = DocxEmitter::new()
            .emit(&doc, &MODERN, &EmitOptions::new())
            .unwrap();

        assert!(output.bytes.starts_with(b"PK"));
        assert_eq!(output.page_count, 0);
        assert!(output.warnings.is_empty());
    }
}
