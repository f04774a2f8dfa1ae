//! Block-level content.

use super::run::{runs_text, StyledRun};
use super::table::Table;
use serde::{Deserialize, Serialize};

/// Deepest bullet nesting level (0-based).
pub const MAX_BULLET_DEPTH: u8 = 1;

/// A typed block of document content.
///
/// The set of block kinds is closed; renderers match on it exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading (level 1-6).
    Heading {
        /// Heading level
        level: u8,
        /// Heading text
        runs: Vec<StyledRun>,
    },

    /// A paragraph of text.
    Paragraph {
        /// Paragraph text
        runs: Vec<StyledRun>,
    },

    /// A bullet list item.
    Bullet {
        /// Item text
        runs: Vec<StyledRun>,
        /// Nesting depth (0 or 1)
        depth: u8,
    },

    /// A block quote line.
    Quote {
        /// Quoted text
        runs: Vec<StyledRun>,
    },

    /// A fenced code block, lines kept verbatim.
    Code {
        /// Source lines
        lines: Vec<String>,
        /// Fence info string (e.g. `python`)
        language: Option<String>,
    },

    /// Box-drawing diagrams (trees, boxes), laid out fixed-width.
    StructuralText {
        /// Diagram lines
        lines: Vec<String>,
    },

    /// A rectangular table.
    Table(Table),
}

impl Block {
    /// Create a heading block. The level is clamped to 1-6.
    pub fn heading(level: u8, runs: Vec<StyledRun>) -> Self {
        Block::Heading {
            level: level.clamp(1, 6),
            runs,
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(runs: Vec<StyledRun>) -> Self {
        Block::Paragraph { runs }
    }

    /// Create a bullet block. The depth is clamped to the supported nesting.
    pub fn bullet(runs: Vec<StyledRun>, depth: u8) -> Self {
        Block::Bullet {
            runs,
            depth: depth.min(MAX_BULLET_DEPTH),
        }
    }

    /// Create a quote block.
    pub fn quote(runs: Vec<StyledRun>) -> Self {
        Block::Quote { runs }
    }

    /// Create a code block.
    pub fn code(lines: Vec<String>, language: Option<String>) -> Self {
        Block::Code { lines, language }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { runs, .. }
            | Block::Paragraph { runs }
            | Block::Bullet { runs, .. }
            | Block::Quote { runs } => runs_text(runs),
            Block::Code { lines, .. } | Block::StructuralText { lines } => lines.join("\n"),
            Block::Table(table) => table.plain_text(),
        }
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Get the heading level or None.
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Block::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Short name of the block kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::Bullet { .. } => "bullet",
            Block::Quote { .. } => "quote",
            Block::Code { .. } => "code",
            Block::StructuralText { .. } => "structural_text",
            Block::Table(_) => "table",
        }
    }
}
