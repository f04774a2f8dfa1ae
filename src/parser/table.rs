//! Pipe table recognition.

use regex::Regex;

use super::cursor::LineCursor;
use super::inline::format_inline;
use crate::model::{Block, Table, TableRow};

/// Recognizes GitHub-style pipe tables.
#[derive(Debug, Clone)]
pub struct PipeTableParser {
    separator_regex: Regex,
}

/// Outcome of parsing a table candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum TableOutcome {
    /// A well-formed table.
    Table(Table),
    /// The header had no columns; each row degraded to a paragraph.
    Degraded(Vec<Block>),
}

impl PipeTableParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self {
            separator_regex: Regex::new(r"^\s*\|?\s*:?-+:?\s*(\|\s*:?-+:?\s*)*\|?\s*$")
                .expect("separator pattern is valid"),
        }
    }

    /// Check whether the cursor is positioned on a header row followed by
    /// a separator row.
    pub fn at_table(&self, cursor: &LineCursor<'_>) -> bool {
        match (cursor.peek(), cursor.peek_next()) {
            (Some(header), Some(separator)) => {
                header.contains('|') && self.is_separator(separator)
            }
            _ => false,
        }
    }

    /// Check whether a line is a header/body separator row (`|---|:--:|`).
    pub fn is_separator(&self, line: &str) -> bool {
        line.contains('|') && line.contains('-') && self.separator_regex.is_match(line)
    }

    /// Consume a table starting at the cursor.
    ///
    /// Call only when [`at_table`](Self::at_table) returned true. Data rows
    /// run until the first line without a pipe.
    pub fn parse(&self, cursor: &mut LineCursor<'_>) -> TableOutcome {
        let header_line = cursor.advance().unwrap_or_default();
        cursor.advance();

        let mut body_lines = Vec::new();
        while let Some(line) = cursor.peek() {
            if line.trim().is_empty() || !line.contains('|') {
                break;
            }
            body_lines.push(line);
            cursor.advance();
        }

        let header_cells = split_cells(header_line);
        if header_cells.iter().all(|c| c.is_empty()) {
            let blocks = std::iter::once(header_line)
                .chain(body_lines)
                .filter(|line| !line.trim().is_empty())
                .map(|line| Block::paragraph(format_inline(line.trim())))
                .collect();
            return TableOutcome::Degraded(blocks);
        }

        let mut table = Table::new(format_row(&header_cells));
        for line in body_lines {
            table.push_row(format_row(&split_cells(line)));
        }
        TableOutcome::Table(table)
    }
}

impl Default for PipeTableParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a pipe row into trimmed cell texts, ignoring outer pipes.
pub fn split_cells(line: &str) -> Vec<&str> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}

fn format_row(cells: &[&str]) -> TableRow {
    cells.iter().map(|cell| format_inline(cell)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::runs_text;

    #[test]
    fn test_split_cells() {
        assert_eq!(split_cells("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_cells("a|b|c"), vec!["a", "b", "c"]);
        assert_eq!(split_cells("| a | |"), vec!["a", ""]);
    }

    #[test]
    fn test_separator_detection() {
        let parser = PipeTableParser::new();
        assert!(parser.is_separator("|---|---|"));
        assert!(parser.is_separator("| :-- | --: | :-: |"));
        assert!(parser.is_separator("--- | ---"));
        assert!(!parser.is_separator("---"));
        assert!(!parser.is_separator("| a | b |"));
    }

    #[test]
    fn test_parse_table() {
        let text = "| Name | Age |\n|------|-----|\n| Ada | 36 |\n| Alan | 41 |\nafter";
        let parser = PipeTableParser::new();
        let mut cursor = LineCursor::new(text);
        assert!(parser.at_table(&cursor));

        let TableOutcome::Table(table) = parser.parse(&mut cursor) else {
            panic!("expected a table");
        };
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 2);
        assert_eq!(runs_text(&table.body()[1][0]), "Alan");
        assert_eq!(cursor.peek(), Some("after"));
    }

    #[test]
    fn test_cells_are_inline_formatted() {
        let text = "| **Key** | Value |\n|---|---|\n| `x` | *y* |";
        let parser = PipeTableParser::new();
        let mut cursor = LineCursor::new(text);
        let TableOutcome::Table(table) = parser.parse(&mut cursor) else {
            panic!("expected a table");
        };
        assert!(table.header()[0][0].bold);
        assert!(table.body()[0][0][0].code);
        assert!(table.body()[0][1][0].italic);
    }

    #[test]
    fn test_empty_header_degrades() {
        let text = "| |\n|---|\n| a |";
        let parser = PipeTableParser::new();
        let mut cursor = LineCursor::new(text);
        let TableOutcome::Degraded(blocks) = parser.parse(&mut cursor) else {
            panic!("expected degraded rows");
        };
        assert_eq!(blocks.len(), 2);
        assert!(cursor.is_eof());
    }
}
