//! Pagination: structured blocks to positioned page items.
//!
//! The engine walks the document top to bottom with a vertical cursor that
//! starts at the top margin of each page. Before a line is placed the
//! cursor is checked against the bottom margin; when the line does not fit
//! the page is closed and a new one begins. Coordinates use the PDF
//! convention (origin bottom-left, y grows upwards).
//!
//! Rules the engine follows:
//!
//! - Spacing before a block is dropped at the top of a page.
//! - A heading is moved to the next page when it would otherwise be the
//!   last thing on its page (keep-with-next).
//! - Table rows are kept together; a row taller than a whole page is split
//!   between lines.
//! - Code lines are wrapped by character, everything else by word.

use super::font::FontFace;
use super::options::PageSize;
use super::template::Template;
use super::wrap::{wrap_chars, wrap_runs, Piece, Wrapped, WrappedLine};
use crate::error::Warning;
use crate::model::{Block, RunStyle, StructuredDocument, StyledRun, Table, TableRow};

/// Indentation of a depth-0 bullet's text.
const BULLET_INDENT: f32 = 18.0;

/// Extra indentation per bullet depth.
const BULLET_STEP: f32 = 18.0;

/// Distance from a bullet marker to its text.
const MARKER_GAP: f32 = 12.0;

/// Indentation of quote text.
const QUOTE_INDENT: f32 = 18.0;

/// Horizontal padding inside code and structural blocks.
const CODE_PAD: f32 = 6.0;

/// Padding inside table cells.
const CELL_PAD: f32 = 4.0;

/// Gray level of code block shading.
pub const CODE_SHADE: f32 = 0.96;

/// Gray level of table header shading.
pub const HEADER_SHADE: f32 = 0.9;

/// An axis-aligned rectangle; `y` is the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

/// One line of text at a fixed baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Left edge of the line; piece offsets are relative to it
    pub x: f32,
    /// Baseline position
    pub baseline: f32,
    /// Pieces in drawing order
    pub pieces: Vec<Piece>,
}

impl TextLine {
    /// Reconstruct the visible text of the line.
    pub fn text(&self) -> String {
        let mut out = String::new();
        let mut end: Option<f32> = None;
        for piece in &self.pieces {
            if let Some(end) = end {
                if piece.x > end + 0.01 {
                    out.push(' ');
                }
            }
            out.push_str(&piece.text);
            end = Some(piece.end());
        }
        out
    }
}

/// Something drawn on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionedItem {
    /// A line of text
    Text(TextLine),
    /// A stroked line segment (quote bars)
    Rule {
        /// Start point
        from: (f32, f32),
        /// End point
        to: (f32, f32),
        /// Stroke width
        width: f32,
    },
    /// A stroked table cell border, filled when it is a header cell
    Cell {
        /// Cell bounds
        rect: Rect,
        /// Header row cell
        header: bool,
    },
    /// A filled background (code lines)
    Shade {
        /// Shaded area
        rect: Rect,
        /// Gray level (0 black, 1 white)
        gray: f32,
    },
}

/// A laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page dimensions
    pub size: PageSize,
    /// Items in painting order
    pub items: Vec<PositionedItem>,
}

impl Page {
    fn new(number: u32, size: PageSize) -> Self {
        Self {
            number,
            size,
            items: Vec::new(),
        }
    }

    /// Iterate over the text lines on the page.
    pub fn text_lines(&self) -> impl Iterator<Item = &TextLine> {
        self.items.iter().filter_map(|item| match item {
            PositionedItem::Text(line) => Some(line),
            _ => None,
        })
    }

    /// Plain text of the page, one line per text line.
    pub fn text(&self) -> String {
        self.text_lines()
            .map(TextLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if nothing was placed on the page.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The output of the layout engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    /// Pages in order; never empty
    pub pages: Vec<Page>,
    /// Layout warnings
    pub warnings: Vec<Warning>,
}

impl Layout {
    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lays out structured documents on fixed-size pages.
#[derive(Debug, Clone)]
pub struct LayoutEngine<'t> {
    template: &'t Template,
    page_size: PageSize,
    show_title: bool,
}

impl<'t> LayoutEngine<'t> {
    /// Create an engine for a template and page size.
    pub fn new(template: &'t Template, page_size: PageSize) -> Self {
        Self {
            template,
            page_size,
            show_title: true,
        }
    }

    /// Enable or disable drawing the title line.
    pub fn with_title_line(mut self, show: bool) -> Self {
        self.show_title = show;
        self
    }

    /// Lay out a document.
    pub fn layout(&self, doc: &StructuredDocument) -> Layout {
        let mut composer = Composer::new(self.template, self.page_size);

        if self.show_title && doc.needs_title_line() {
            composer.title(doc.title.trim());
        }

        for (i, block) in doc.blocks.iter().enumerate() {
            let next = doc.blocks.get(i + 1);
            match block {
                Block::Heading { level, runs } => composer.heading(*level, runs, next),
                Block::Paragraph { runs } => composer.paragraph(runs),
                Block::Bullet { runs, depth } => composer.bullet(runs, *depth),
                Block::Quote { runs } => composer.quote(runs),
                Block::Code { lines, .. } => composer.fixed_width(lines, true),
                Block::StructuralText { lines } => composer.fixed_width(lines, false),
                Block::Table(table) => composer.table(table),
            }
        }

        let layout = composer.finish();
        log::debug!(
            "Laid out {} blocks on {} pages",
            doc.blocks.len(),
            layout.pages.len()
        );
        layout
    }
}

/// Lay out a document with the title line enabled and return its pages.
pub fn paginate(doc: &StructuredDocument, template: &Template, page_size: PageSize) -> Vec<Page> {
    LayoutEngine::new(template, page_size).layout(doc).pages
}

/// Pagination state for one layout pass.
struct Composer<'t> {
    template: &'t Template,
    size: PageSize,
    pages: Vec<Page>,
    page: Page,
    y: f32,
    fresh: bool,
    warnings: Vec<Warning>,
}

impl<'t> Composer<'t> {
    fn new(template: &'t Template, size: PageSize) -> Self {
        Self {
            template,
            size,
            pages: Vec::new(),
            page: Page::new(1, size),
            y: size.height - template.margin,
            fresh: true,
            warnings: Vec::new(),
        }
    }

    fn left(&self) -> f32 {
        self.template.margin
    }

    fn content_width(&self) -> f32 {
        self.size.width - 2.0 * self.template.margin
    }

    fn usable_height(&self) -> f32 {
        self.size.height - 2.0 * self.template.margin
    }

    fn fits(&self, height: f32) -> bool {
        self.y - height >= self.template.margin
    }

    fn break_page(&mut self) {
        let number = self.page.number + 1;
        let finished = std::mem::replace(&mut self.page, Page::new(number, self.size));
        log::debug!("Page {} full, continuing on page {}", finished.number, number);
        self.pages.push(finished);
        self.y = self.size.height - self.template.margin;
        self.fresh = true;
    }

    /// Close the page if `height` does not fit below the cursor.
    fn ensure(&mut self, height: f32) {
        if !self.fresh && !self.fits(height) {
            self.break_page();
        }
    }

    /// Vertical space between blocks, dropped at the top of a page.
    fn space(&mut self, amount: f32) {
        if !self.fresh {
            self.y -= amount;
        }
    }

    fn push(&mut self, item: PositionedItem) {
        self.page.items.push(item);
        self.fresh = false;
    }

    fn baseline(top: f32, line_height: f32, size: f32) -> f32 {
        top - line_height / 2.0 - size * 0.35
    }

    /// Place one line of text, breaking the page first when needed.
    fn line(&mut self, x: f32, line_height: f32, size: f32, pieces: Vec<Piece>) {
        self.ensure(line_height);
        let baseline = Self::baseline(self.y, line_height, size);
        self.push(PositionedItem::Text(TextLine { x, baseline, pieces }));
        self.y -= line_height;
    }

    /// Place a wrapped line and report its overflowing word on the page it landed on.
    fn place(&mut self, x: f32, line_height: f32, size: f32, line: WrappedLine) {
        self.line(x, line_height, size, line.pieces);
        self.record_overflow(line.overflow.as_deref());
    }

    fn record_overflow(&mut self, word: Option<&str>) {
        if let Some(word) = word {
            let warning = Warning::Overflow {
                page: self.page.number,
                word: word.to_string(),
            };
            log::warn!("{}", warning);
            self.warnings.push(warning);
        }
    }

    fn body_style(&self) -> impl Fn(RunStyle) -> (FontFace, f32) + 't {
        let template = self.template;
        move |style| {
            let face = if style.code {
                template.code_face(style.bold, style.italic)
            } else {
                template.body_face(style.bold, style.italic)
            };
            (face, template.body_size)
        }
    }

    fn title(&mut self, title: &str) {
        let template = self.template;
        let size = template.title_size;
        let line_height = template.line_height(size);
        let face = template.head_face(false);
        let runs = [StyledRun::plain(title)];
        let wrapped = wrap_runs(&runs, self.content_width(), |_| (face, size));

        for line in wrapped.lines {
            let x = self.left() + ((self.content_width() - line.width) / 2.0).max(0.0);
            self.place(x, line_height, size, line);
        }
        self.y -= size * 0.6;
    }

    fn heading(&mut self, level: u8, runs: &[StyledRun], next: Option<&Block>) {
        let template = self.template;
        let size = template.heading_size(level);
        let line_height = template.line_height(size);
        let wrapped = wrap_runs(runs, self.content_width(), |style| {
            let face = if style.code {
                template.code_face(true, style.italic)
            } else {
                template.head_face(style.italic)
            };
            (face, size)
        });

        self.space(size * 0.6);

        let own = wrapped.lines.len() as f32 * line_height + size * 0.25;
        let following = next.map_or(0.0, |block| self.first_line_height(block));
        if !self.fresh && !self.fits(own + following) {
            self.break_page();
        }

        for line in wrapped.lines {
            self.place(self.left(), line_height, size, line);
        }
        self.space(size * 0.25);
    }

    /// Height of the first unit a block will place, including its spacing.
    ///
    /// For a table this is the whole header row, or a single line of it when
    /// the row is taller than a page and will be split anyway.
    fn first_line_height(&self, block: &Block) -> f32 {
        let template = self.template;
        let body = template.line_height(template.body_size);
        match block {
            Block::Heading { level, .. } => {
                let size = template.heading_size(*level);
                size * 0.6 + template.line_height(size)
            }
            Block::Paragraph { .. } | Block::Quote { .. } => template.body_size * 0.4 + body,
            Block::Bullet { .. } => template.body_size * 0.2 + body,
            Block::Code { .. } | Block::StructuralText { .. } => {
                template.body_size * 0.5 + template.line_height(template.code_size)
            }
            Block::Table(table) => {
                let columns = table.column_count();
                let Some(header) = table.rows().first().filter(|_| columns > 0) else {
                    return 0.0;
                };
                let text_width = self.content_width() / columns as f32 - 2.0 * CELL_PAD;
                let lines = row_lines(&self.wrap_row(header, true, text_width));
                let row_height = lines as f32 * body + 2.0 * CELL_PAD;
                let first = if row_height <= self.usable_height() {
                    row_height
                } else {
                    body + 2.0 * CELL_PAD
                };
                template.body_size * 0.5 + first
            }
        }
    }

    fn paragraph(&mut self, runs: &[StyledRun]) {
        let template = self.template;
        let wrapped = wrap_runs(runs, self.content_width(), self.body_style());

        self.space(template.body_size * 0.4);
        let line_height = template.line_height(template.body_size);
        for line in wrapped.lines {
            self.place(self.left(), line_height, template.body_size, line);
        }
    }

    fn bullet(&mut self, runs: &[StyledRun], depth: u8) {
        let template = self.template;
        let size = template.body_size;
        let indent = BULLET_INDENT + f32::from(depth) * BULLET_STEP;
        let wrapped = wrap_runs(runs, self.content_width() - indent, self.body_style());

        self.space(size * 0.2);
        let line_height = template.line_height(size);
        let marker = if depth == 0 { "•" } else { "–" };
        let x = self.left() + indent;

        let mut lines = wrapped.lines;
        if lines.is_empty() {
            lines.push(WrappedLine::default());
        }
        for (i, mut line) in lines.into_iter().enumerate() {
            if i == 0 {
                let face = template.body_face(false, false);
                line.pieces.insert(0, Piece::new(marker, face, size, -MARKER_GAP));
            }
            self.place(x, line_height, size, line);
        }
    }

    fn quote(&mut self, runs: &[StyledRun]) {
        let template = self.template;
        let size = template.body_size;
        let wrapped = wrap_runs(runs, self.content_width() - QUOTE_INDENT, |style| {
            let face = if style.code {
                template.code_face(style.bold, true)
            } else {
                template.body_face(style.bold, true)
            };
            (face, size)
        });

        self.space(size * 0.4);
        let line_height = template.line_height(size);
        let bar_x = self.left() + QUOTE_INDENT / 3.0;
        for line in wrapped.lines {
            self.ensure(line_height);
            let top = self.y;
            self.push(PositionedItem::Rule {
                from: (bar_x, top),
                to: (bar_x, top - line_height),
                width: 2.0,
            });
            self.place(self.left() + QUOTE_INDENT, line_height, size, line);
        }
    }

    fn fixed_width(&mut self, lines: &[String], shaded: bool) {
        if lines.is_empty() {
            return;
        }

        let template = self.template;
        let size = template.code_size;
        let face = template.code_face(false, false);
        let line_height = template.line_height(size);
        let text_width = self.content_width() - 2.0 * CODE_PAD;

        self.space(template.body_size * 0.5);
        for source in lines {
            for text in wrap_chars(source, face, size, text_width) {
                self.ensure(line_height);
                if shaded {
                    let rect = Rect {
                        x: self.left(),
                        y: self.y - line_height,
                        width: self.content_width(),
                        height: line_height,
                    };
                    self.push(PositionedItem::Shade {
                        rect,
                        gray: CODE_SHADE,
                    });
                }
                let piece = Piece::new(text, face, size, 0.0);
                self.line(self.left() + CODE_PAD, line_height, size, vec![piece]);
            }
        }
        self.space(template.body_size * 0.3);
    }

    fn table(&mut self, table: &Table) {
        let columns = table.column_count();
        if columns == 0 {
            return;
        }

        let template = self.template;
        let size = template.body_size;
        let line_height = template.line_height(size);
        let column_width = self.content_width() / columns as f32;
        let text_width = column_width - 2.0 * CELL_PAD;

        self.space(size * 0.5);
        for (r, row) in table.rows().iter().enumerate() {
            let header = r == 0;
            let cells = self.wrap_row(row, header, text_width);
            let lines = row_lines(&cells);
            let row_height = lines as f32 * line_height + 2.0 * CELL_PAD;

            if row_height <= self.usable_height() {
                self.ensure(row_height);
                self.row_segment(&cells, 0, lines, header, column_width, line_height);
                continue;
            }

            let mut start = 0;
            while start < lines {
                let room = ((self.y - template.margin - 2.0 * CELL_PAD) / line_height).floor();
                let mut take = if room > 0.0 { room as usize } else { 0 };
                if take == 0 {
                    if !self.fresh {
                        self.break_page();
                        continue;
                    }
                    take = 1;
                }
                let end = (start + take).min(lines);
                self.row_segment(&cells, start, end, header, column_width, line_height);
                start = end;
                if start < lines {
                    self.break_page();
                }
            }
        }
        self.space(size * 0.3);
    }

    /// Wrap each cell of a row; header cells are set bold.
    fn wrap_row(&self, row: &TableRow, header: bool, text_width: f32) -> Vec<Wrapped> {
        let template = self.template;
        let size = template.body_size;
        row.iter()
            .map(|cell| {
                wrap_runs(cell, text_width, |style| {
                    let face = if style.code {
                        template.code_face(style.bold || header, style.italic)
                    } else {
                        template.body_face(style.bold || header, style.italic)
                    };
                    (face, size)
                })
            })
            .collect()
    }

    /// Draw lines `start..end` of a table row as one band of cells.
    fn row_segment(
        &mut self,
        cells: &[Wrapped],
        start: usize,
        end: usize,
        header: bool,
        column_width: f32,
        line_height: f32,
    ) {
        let size = self.template.body_size;
        let height = (end - start) as f32 * line_height + 2.0 * CELL_PAD;
        let top = self.y;
        let left = self.left();

        for col in 0..cells.len() {
            let rect = Rect {
                x: left + col as f32 * column_width,
                y: top - height,
                width: column_width,
                height,
            };
            self.push(PositionedItem::Cell { rect, header });
        }

        for (col, cell) in cells.iter().enumerate() {
            let x = left + col as f32 * column_width + CELL_PAD;
            for (offset, line) in cell.lines.iter().take(end).skip(start).enumerate() {
                let line_top = top - CELL_PAD - offset as f32 * line_height;
                self.push(PositionedItem::Text(TextLine {
                    x,
                    baseline: Self::baseline(line_top, line_height, size),
                    pieces: line.pieces.clone(),
                }));
                self.record_overflow(line.overflow.as_deref());
            }
        }

        self.y = top - height;
    }

    fn finish(mut self) -> Layout {
        if self.pages.is_empty() || !self.page.is_empty() {
            self.pages.push(self.page);
        }
        Layout {
            pages: self.pages,
            warnings: self.warnings,
        }
    }
}

/// Number of lines a row occupies; an empty row still takes one.
fn row_lines(cells: &[Wrapped]) -> usize {
    cells.iter().map(|c| c.lines.len()).max().unwrap_or(0).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TitleSource;
    use crate::render::template::{CLASSIC, MINIMAL};

    fn engine(template: &Template) -> LayoutEngine<'_> {
        LayoutEngine::new(template, PageSize::A4)
    }

    fn paragraph(text: &str) -> Block {
        Block::paragraph(vec![StyledRun::plain(text)])
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let layout = engine(&CLASSIC).layout(&StructuredDocument::new());
        assert_eq!(layout.page_count(), 1);
        assert!(layout.pages[0].is_empty());
    }

    #[test]
    fn test_title_line_drawn_for_hint_title() {
        let mut doc = StructuredDocument::with_title("Quarterly Report", TitleSource::Hint);
        doc.push(paragraph("Body"));

        let layout = engine(&CLASSIC).layout(&doc);
        let lines: Vec<_> = layout.pages[0].text_lines().collect();
        assert_eq!(lines[0].text(), "Quarterly Report");
        assert_eq!(lines[0].pieces[0].size, CLASSIC.title_size);
        assert!(lines[0].x > CLASSIC.margin);
    }

    #[test]
    fn test_heading_title_not_drawn_twice() {
        let mut doc = StructuredDocument::with_title("Intro", TitleSource::Heading);
        doc.push(Block::heading(1, vec![StyledRun::plain("Intro")]));

        let layout = engine(&CLASSIC).layout(&doc);
        let text = layout.pages[0].text();
        assert_eq!(text.matches("Intro").count(), 1);
    }

    #[test]
    fn test_title_line_can_be_disabled() {
        let doc = StructuredDocument::with_title("Hidden", TitleSource::FileName);
        let layout = engine(&CLASSIC).with_title_line(false).layout(&doc);
        assert!(layout.pages[0].is_empty());
    }

    #[test]
    fn test_first_line_starts_at_top_margin() {
        let mut doc = StructuredDocument::new();
        doc.push(paragraph("First"));

        let layout = engine(&CLASSIC).layout(&doc);
        let line = layout.pages[0].text_lines().next().unwrap();
        let top = PageSize::A4.height - CLASSIC.margin;
        assert!(line.baseline < top);
        assert!(line.baseline > top - CLASSIC.line_height(CLASSIC.body_size));
        assert_eq!(line.x, CLASSIC.margin);
    }

    #[test]
    fn test_long_paragraph_breaks_pages() {
        let mut doc = StructuredDocument::new();
        let words = vec!["lorem ipsum dolor sit amet"; 400].join(" ");
        doc.push(paragraph(&words));

        let layout = engine(&CLASSIC).layout(&doc);
        assert!(layout.page_count() > 1);
        for page in &layout.pages {
            for line in page.text_lines() {
                assert!(line.baseline > CLASSIC.margin - 5.0);
            }
        }
    }

    #[test]
    fn test_heading_kept_with_next_block() {
        let template = &MINIMAL;
        let line_height = template.line_height(template.code_size);
        let capacity = ((PageSize::A4.height - 2.0 * template.margin) / line_height) as usize;

        // Leaves room for the heading but not for the heading plus one body line.
        let mut doc = StructuredDocument::new();
        doc.push(Block::code(vec!["x".to_string(); capacity - 3], None));
        doc.push(Block::heading(2, vec![StyledRun::plain("Next Section")]));
        doc.push(paragraph("Section body"));

        let layout = engine(template).layout(&doc);
        assert_eq!(layout.page_count(), 2);
        let second = layout.pages[1].text();
        assert!(second.starts_with("Next Section"));
        assert!(second.contains("Section body"));
    }

    #[test]
    fn test_bullet_marker_and_indent() {
        let mut doc = StructuredDocument::new();
        doc.push(Block::bullet(vec![StyledRun::plain("top")], 0));
        doc.push(Block::bullet(vec![StyledRun::plain("nested")], 1));

        let layout = engine(&CLASSIC).layout(&doc);
        let lines: Vec<_> = layout.pages[0].text_lines().collect();
        assert_eq!(lines[0].pieces[0].text, "•");
        assert_eq!(lines[1].pieces[0].text, "–");
        assert!(lines[1].x > lines[0].x);
        assert_eq!(lines[0].x, CLASSIC.margin + BULLET_INDENT);
    }

    #[test]
    fn test_quote_has_bar_and_italic_text() {
        let mut doc = StructuredDocument::new();
        doc.push(Block::quote(vec![StyledRun::plain("quoted")]));

        let layout = engine(&CLASSIC).layout(&doc);
        let items = &layout.pages[0].items;
        assert!(matches!(items[0], PositionedItem::Rule { .. }));
        match &items[1] {
            PositionedItem::Text(line) => assert!(line.pieces[0].face.italic),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_code_lines_are_shaded_and_verbatim() {
        let mut doc = StructuredDocument::new();
        doc.push(Block::code(
            vec!["fn main() {".to_string(), "".to_string(), "}".to_string()],
            Some("rust".to_string()),
        ));

        let layout = engine(&CLASSIC).layout(&doc);
        let page = &layout.pages[0];
        let shades = page
            .items
            .iter()
            .filter(|item| matches!(item, PositionedItem::Shade { .. }))
            .count();
        assert_eq!(shades, 3);

        let texts: Vec<_> = page.text_lines().map(TextLine::text).collect();
        assert_eq!(texts, vec!["fn main() {", "", "}"]);
        assert_eq!(
            page.text_lines().next().unwrap().pieces[0].face,
            CLASSIC.code_face(false, false)
        );
    }

    #[test]
    fn test_structural_text_is_not_shaded() {
        let mut doc = StructuredDocument::new();
        doc.push(Block::StructuralText {
            lines: vec!["├── src".to_string(), "└── tests".to_string()],
        });

        let layout = engine(&CLASSIC).layout(&doc);
        let page = &layout.pages[0];
        assert!(page
            .items
            .iter()
            .all(|item| matches!(item, PositionedItem::Text(_))));
        assert_eq!(page.text_lines().count(), 2);
    }

    #[test]
    fn test_table_cells() {
        let mut table = Table::new(vec![
            vec![StyledRun::plain("Name")],
            vec![StyledRun::plain("Value")],
        ]);
        table.push_row(vec![vec![StyledRun::plain("a")], vec![StyledRun::plain("1")]]);

        let mut doc = StructuredDocument::new();
        doc.push(Block::Table(table));

        let layout = engine(&CLASSIC).layout(&doc);
        let page = &layout.pages[0];
        let cells: Vec<_> = page
            .items
            .iter()
            .filter_map(|item| match item {
                PositionedItem::Cell { rect, header } => Some((*rect, *header)),
                _ => None,
            })
            .collect();

        assert_eq!(cells.len(), 4);
        assert!(cells[0].1 && cells[1].1);
        assert!(!cells[2].1 && !cells[3].1);
        assert_eq!(cells[0].0.width, cells[1].0.width);

        let header_line = page.text_lines().next().unwrap();
        assert_eq!(header_line.text(), "Name");
        assert!(header_line.pieces[0].face.bold);
    }

    #[test]
    fn test_overflow_warning() {
        let mut doc = StructuredDocument::new();
        doc.push(paragraph(&"x".repeat(400)));

        let layout = engine(&CLASSIC).layout(&doc);
        assert_eq!(layout.warnings.len(), 1);
        assert!(matches!(&layout.warnings[0], Warning::Overflow { page: 1, .. }));
    }

    #[test]
    fn test_overflow_warning_names_page_the_word_lands_on() {
        let filler = vec!["lorem ipsum dolor sit amet"; 400].join(" ");
        let mut doc = StructuredDocument::new();
        doc.push(paragraph(&format!("{} {}", filler, "x".repeat(400))));

        let layout = engine(&CLASSIC).layout(&doc);
        let last = layout.page_count() as u32;
        assert!(last > 1);
        assert_eq!(layout.warnings.len(), 1);
        assert!(matches!(&layout.warnings[0], Warning::Overflow { page, .. } if *page == last));
    }

    #[test]
    fn test_table_overflow_warning_names_row_page() {
        let mut table = Table::new(vec![vec![StyledRun::plain("Key")]]);
        table.push_row(vec![vec![StyledRun::plain("y".repeat(600))]]);

        let mut doc = StructuredDocument::new();
        doc.push(Block::code(vec!["x".to_string(); 200], None));
        doc.push(Block::Table(table));

        let layout = engine(&CLASSIC).layout(&doc);
        let row_page = layout
            .pages
            .iter()
            .find(|page| page.text().contains("yyyyyyyyyy"))
            .map(|page| page.number)
            .unwrap();
        assert!(row_page > 1);
        assert_eq!(layout.warnings.len(), 1);
        assert!(matches!(&layout.warnings[0], Warning::Overflow { page, .. } if *page == row_page));
    }
}
