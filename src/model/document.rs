//! Document-level types.

use super::block::Block;
use serde::{Deserialize, Serialize};

/// Where the document title came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    /// The first level-1 heading block; renderers must not draw it twice.
    Heading,
    /// The caller-supplied title hint.
    Hint,
    /// Derived from the source file name.
    FileName,
    /// No title.
    #[default]
    None,
}

/// A format-neutral structured document: a title and ordered blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Display title (may be empty)
    pub title: String,

    /// Origin of the title
    pub title_source: TitleSource,

    /// Content blocks in source order
    pub blocks: Vec<Block>,
}

impl StructuredDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with the given title.
    pub fn with_title(title: impl Into<String>, source: TitleSource) -> Self {
        Self {
            title: title.into(),
            title_source: source,
            blocks: Vec::new(),
        }
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Set the title and its origin.
    pub fn set_title(&mut self, title: impl Into<String>, source: TitleSource) {
        self.title = title.into();
        self.title_source = source;
    }

    /// Drop a title that does not come from a heading block.
    pub fn clear_title(&mut self) {
        if self.title_source != TitleSource::Heading {
            self.title.clear();
            self.title_source = TitleSource::None;
        }
    }

    /// Whether renderers should draw the title themselves.
    pub fn needs_title_line(&self) -> bool {
        !self.title.trim().is_empty() && self.title_source != TitleSource::Heading
    }

    /// Get the number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over heading blocks.
    pub fn headings(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_heading())
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| block.plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
