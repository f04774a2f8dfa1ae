//! Block structural analysis.
//!
//! Turns raw text into an ordered sequence of typed blocks in one forward
//! pass over the lines. Classification order for each line (first match
//! wins):
//!
//! 1. fence delimiters toggle a verbatim code block
//! 2. lines opening with a box-drawing character form structural text
//! 3. ATX headings (`#` to `######`)
//! 4. pipe tables (header row followed by a separator row)
//! 5. heuristic headings, in auto-structure mode only
//! 6. bullets (`-`, `*`, `+`) and quotes (`>`)
//! 7. everything else, numbered lines included, is a paragraph
//!
//! Blank lines and thematic breaks are skipped.

use std::borrow::Cow;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::cursor::LineCursor;
use super::inline::format_inline;
use super::options::{AnalyzeOptions, StructureMode};
use super::table::{PipeTableParser, TableOutcome};
use super::title::resolve_title;
use crate::error::Warning;
use crate::model::{runs_text, Block, StructuredDocument, StyledRun, MAX_BULLET_DEPTH};

/// Maximum length of an all-caps line treated as a heading.
const ALL_CAPS_HEADING_MAX: usize = 60;

/// Maximum length of a `Label:` line treated as a heading.
const LABEL_HEADING_MAX: usize = 40;

/// Indentation (in columns) that nests a bullet one level deeper.
const NESTED_BULLET_INDENT: usize = 2;

/// Result of analyzing a text.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The structured document
    pub document: StructuredDocument,

    /// Recovered conditions encountered during analysis
    pub warnings: Vec<Warning>,
}

/// Block structural analyzer.
///
/// # Example
///
/// ```
/// use docpress::parser::{Analyzer, AnalyzeOptions};
///
/// let analyzer = Analyzer::new(AnalyzeOptions::default());
/// let analysis = analyzer.analyze("# Title\n\nHello *world*");
/// assert_eq!(analysis.document.title, "Title");
/// assert_eq!(analysis.document.blocks.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    options: AnalyzeOptions,
    tables: PipeTableParser,
    numbered_regex: Regex,
}

#[derive(Default)]
struct State {
    blocks: Vec<Block>,
    warnings: Vec<Warning>,
    first_heading: Option<String>,
}

impl State {
    fn push(&mut self, block: Block) {
        if let Block::Heading { level: 1, runs } = &block {
            if self.first_heading.is_none() {
                self.first_heading = Some(runs_text(runs));
            }
        }
        self.blocks.push(block);
    }

    fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }
}

/// An open code fence.
struct Fence {
    marker: char,
    len: usize,
    language: Option<String>,
}

impl Fence {
    fn open(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = trimmed.chars().take_while(|c| *c == marker).count();
        if len < 3 {
            return None;
        }
        let info = trimmed[len..].trim();
        if marker == '`' && info.contains('`') {
            return None;
        }
        Some(Self {
            marker,
            len,
            language: info.split_whitespace().next().map(str::to_string),
        })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        let trimmed = line.trim();
        let run = trimmed.chars().take_while(|c| *c == self.marker).count();
        run >= self.len && trimmed[run..].trim().is_empty()
    }
}

impl Analyzer {
    /// Create an analyzer with the given options.
    pub fn new(options: AnalyzeOptions) -> Self {
        Self {
            options,
            tables: PipeTableParser::new(),
            numbered_regex: Regex::new(r"^\s*\d+\.\s+").expect("numbered pattern is valid"),
        }
    }

    /// Get the analyzer options.
    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Analyze a text into a structured document.
    pub fn analyze(&self, text: &str) -> Analysis {
        let text: Cow<'_, str> = if self.options.normalize_unicode {
            Cow::Owned(text.nfc().collect())
        } else {
            Cow::Borrowed(text)
        };

        let mut state = State::default();
        let mut cursor = LineCursor::new(&text);

        match self.options.mode {
            StructureMode::Literal => collect_lines(&mut cursor, &mut state, |line| {
                Block::paragraph(vec![StyledRun::plain(line)])
            }),
            StructureMode::Bulletize => collect_lines(&mut cursor, &mut state, |line| {
                Block::bullet(vec![StyledRun::plain(line)], 0)
            }),
            StructureMode::Markdown | StructureMode::AutoStructure => {
                self.parse_blocks(&mut cursor, &mut state)
            }
        }

        let (title, title_source) = resolve_title(
            state.first_heading.as_deref(),
            self.options.title_hint.as_deref(),
            self.options.file_name.as_deref(),
        );

        log::debug!(
            "Analyzed {} lines into {} blocks ({} mode, title from {:?})",
            text.lines().count(),
            state.blocks.len(),
            self.options.mode,
            title_source
        );

        Analysis {
            document: StructuredDocument {
                title,
                title_source,
                blocks: state.blocks,
            },
            warnings: state.warnings,
        }
    }

    fn parse_blocks(&self, cursor: &mut LineCursor<'_>, state: &mut State) {
        while let Some(line) = cursor.peek() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                cursor.advance();
                continue;
            }

            if let Some(fence) = Fence::open(line) {
                self.parse_fence(cursor, fence, state);
                continue;
            }

            if is_box_drawing(line) {
                parse_structural(cursor, state);
                continue;
            }

            if let Some((level, content)) = atx_heading(line) {
                cursor.advance();
                if !content.is_empty() {
                    state.push(Block::heading(level, format_inline(content)));
                }
                continue;
            }

            if self.tables.at_table(cursor) {
                let line_number = cursor.line_number();
                match self.tables.parse(cursor) {
                    TableOutcome::Table(table) => state.push(Block::Table(table)),
                    TableOutcome::Degraded(blocks) => {
                        state.warn(Warning::MalformedTable { line: line_number });
                        blocks.into_iter().for_each(|b| state.push(b));
                    }
                }
                continue;
            }

            if self.options.mode == StructureMode::AutoStructure {
                if let Some(heading) = self.heuristic_heading(cursor) {
                    state.push(heading);
                    continue;
                }
            }

            if is_thematic_break(trimmed) {
                cursor.advance();
                continue;
            }

            if bullet_item(line).is_some() {
                self.parse_list(cursor, 0, state);
                continue;
            }

            cursor.advance();
            if let Some(quoted) = trimmed.strip_prefix('>') {
                let quoted = quoted.trim_start();
                if !quoted.is_empty() {
                    state.push(Block::quote(format_inline(quoted)));
                }
                continue;
            }

            // Numbered lines fall through here and keep their numeral.
            state.push(Block::paragraph(format_inline(trimmed)));
        }
    }

    fn parse_fence(&self, cursor: &mut LineCursor<'_>, fence: Fence, state: &mut State) {
        let opened_at = cursor.line_number();
        cursor.advance();

        let mut lines = Vec::new();
        let mut closed = false;
        while let Some(line) = cursor.advance() {
            if fence.is_closed_by(line) {
                closed = true;
                break;
            }
            lines.push(line.to_string());
        }

        if !closed {
            state.warn(Warning::UnterminatedFence { line: opened_at });
        }
        state.push(Block::code(lines, fence.language));
    }

    /// Recursive-descent list walker; `depth` is the nesting level being
    /// collected. Returns when an item dedents below `depth` or the list ends.
    fn parse_list(&self, cursor: &mut LineCursor<'_>, depth: u8, state: &mut State) {
        while let Some(line) = cursor.peek() {
            let Some((indent, body)) = bullet_item(line) else {
                break;
            };

            let item_depth = if indent >= NESTED_BULLET_INDENT {
                MAX_BULLET_DEPTH
            } else {
                0
            };

            if item_depth < depth {
                return;
            }
            if item_depth > depth {
                self.parse_list(cursor, depth + 1, state);
                continue;
            }

            cursor.advance();
            let body = body.trim();
            if !body.is_empty() {
                state.push(Block::bullet(format_inline(body), depth));
            }
        }
    }

    fn heuristic_heading(&self, cursor: &mut LineCursor<'_>) -> Option<Block> {
        let line = cursor.peek()?.trim();
        if self.is_list_or_quote(line) {
            return None;
        }

        let length = line.chars().count();
        let all_caps = length < ALL_CAPS_HEADING_MAX && is_all_caps(line);
        let label = line.ends_with(':') && length < LABEL_HEADING_MAX;
        let underlined = cursor.peek_next().is_some_and(is_underline);

        if !(all_caps || label || underlined) {
            return None;
        }

        cursor.advance();
        if underlined {
            cursor.advance();
        }
        Some(Block::heading(2, format_inline(line)))
    }

    fn is_list_or_quote(&self, line: &str) -> bool {
        bullet_item(line).is_some()
            || line.starts_with(['-', '*', '>'])
            || self.numbered_regex.is_match(line)
    }
}

fn collect_lines(cursor: &mut LineCursor<'_>, state: &mut State, make: impl Fn(&str) -> Block) {
    while let Some(line) = cursor.advance() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            state.push(make(trimmed));
        }
    }
}

fn parse_structural(cursor: &mut LineCursor<'_>, state: &mut State) {
    let mut lines = Vec::new();
    while let Some(line) = cursor.peek().filter(|l| is_box_drawing(l)) {
        lines.push(line.trim_end().to_string());
        cursor.advance();
    }
    state.push(Block::StructuralText { lines });
}

fn is_box_drawing(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_some_and(|c| ('\u{2500}'..='\u{257F}').contains(&c))
}

/// Parse an ATX heading into its level and content.
fn atx_heading(line: &str) -> Option<(u8, &str)> {
    let trimmed = line.trim_start();
    let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }

    let rest = &trimmed[hashes..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut content = rest.trim();
    let without_closing = content.trim_end_matches('#');
    if without_closing.is_empty() || without_closing.ends_with(char::is_whitespace) {
        content = without_closing.trim_end();
    }
    Some((hashes as u8, content))
}

/// Split a bullet line into its indentation width and body.
fn bullet_item(line: &str) -> Option<(usize, &str)> {
    let content = line.trim_start();
    let indent = &line[..line.len() - content.len()];

    if !content.starts_with(['-', '*', '+']) {
        return None;
    }
    let rest = &content[1..];
    let body = rest.strip_prefix([' ', '\t'])?;

    let width = indent
        .chars()
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum();
    Some((width, body))
}

fn is_thematic_break(trimmed: &str) -> bool {
    let compact: Vec<char> = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && matches!(compact[0], '-' | '*' | '_')
        && compact.iter().all(|c| *c == compact[0])
}

fn is_underline(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && (trimmed.chars().all(|c| c == '-') || trimmed.chars().all(|c| c == '='))
}

fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}
