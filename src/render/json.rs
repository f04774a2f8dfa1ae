//! JSON rendering for structured documents.

use crate::error::{Error, Result};
use crate::model::StructuredDocument;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a structured document to JSON.
pub fn to_json(doc: &StructuredDocument, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, StyledRun, TitleSource};

    #[test]
    fn test_to_json_pretty() {
        let mut doc = StructuredDocument::with_title("Report", TitleSource::Hint);
        doc.push(Block::paragraph(vec![StyledRun::bold("Hello")]));

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\": \"Report\""));
        assert!(json.contains("\"type\": \"paragraph\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let doc = StructuredDocument::new();
        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_json_parses_back() {
        let mut doc = StructuredDocument::with_title("T", TitleSource::Heading);
        doc.push(Block::code(vec!["fn main() {}".to_string()], Some("rust".to_string())));

        let json = to_json(&doc, JsonFormat::Compact).unwrap();
        let parsed: StructuredDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
