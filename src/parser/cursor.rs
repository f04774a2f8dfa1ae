//! Forward-only line cursor with one line of lookahead.

/// A cursor over the lines of a text.
///
/// Analysis is a single forward pass; the only lookahead available is the
/// line after the current one.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// Create a cursor positioned on the first line.
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    /// The current line, if any.
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// The line after the current one, if any.
    pub fn peek_next(&self) -> Option<&'a str> {
        self.lines.get(self.pos + 1).copied()
    }

    /// Consume and return the current line.
    pub fn advance(&mut self) -> Option<&'a str> {
        let line = self.peek()?;
        self.pos += 1;
        Some(line)
    }

    /// 1-based number of the current line.
    pub fn line_number(&self) -> usize {
        self.pos + 1
    }

    /// Check whether every line has been consumed.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.lines.len()
    }
}
