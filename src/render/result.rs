//! Conversion statistics.

use serde::{Deserialize, Serialize};

use crate::model::{Block, StructuredDocument};

/// Statistics collected while converting a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of pages laid out (0 for unpaginated formats)
    pub page_count: u32,

    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of bullet items
    pub bullet_count: u32,

    /// Number of quotes
    pub quote_count: u32,

    /// Number of code blocks
    pub code_block_count: u32,

    /// Number of structural text blocks (diagrams, trees)
    pub structural_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,

    /// Number of warnings raised by analysis and layout
    pub warning_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the blocks and text of a document.
    pub fn from_document(doc: &StructuredDocument) -> Self {
        let mut stats = Self::new();
        for block in &doc.blocks {
            stats.add_block(block);
            stats.count_text(&block.plain_text());
        }
        stats
    }

    /// Increment the counter for a block's kind.
    pub fn add_block(&mut self, block: &Block) {
        match block {
            Block::Heading { .. } => self.add_heading(),
            Block::Paragraph { .. } => self.add_paragraph(),
            Block::Bullet { .. } => self.add_bullet(),
            Block::Quote { .. } => self.quote_count += 1,
            Block::Code { .. } => self.code_block_count += 1,
            Block::StructuralText { .. } => self.structural_count += 1,
            Block::Table(_) => self.add_table(),
        }
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment bullet count.
    pub fn add_bullet(&mut self) {
        self.bullet_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ConversionStats) {
        self.page_count += other.page_count;
        self.heading_count += other.heading_count;
        self.paragraph_count += other.paragraph_count;
        self.bullet_count += other.bullet_count;
        self.quote_count += other.quote_count;
        self.code_block_count += other.code_block_count;
        self.structural_count += other.structural_count;
        self.table_count += other.table_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
        self.warning_count += other.warning_count;
    }

    /// Total number of blocks counted.
    pub fn block_count(&self) -> u32 {
        self.heading_count
            + self.paragraph_count
            + self.bullet_count
            + self.quote_count
            + self.code_block_count
            + self.structural_count
            + self.table_count
    }
}
