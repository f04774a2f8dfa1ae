//! Greedy line breaking over styled runs.

use super::font::FontFace;
use crate::model::{RunStyle, StyledRun};

/// Spaces a tab expands to in fixed-width text.
pub const TAB_WIDTH: usize = 4;

/// A span of text in a single face, positioned relative to its line start.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    /// Text to draw
    pub text: String,
    /// Face the text is set in
    pub face: FontFace,
    /// Font size in points
    pub size: f32,
    /// Horizontal offset from the line start
    pub x: f32,
    /// Measured width
    pub width: f32,
}

impl Piece {
    /// Create a piece at offset `x`, measuring its width.
    pub fn new(text: impl Into<String>, face: FontFace, size: f32, x: f32) -> Self {
        let text = text.into();
        let width = face.text_width(&text, size);
        Self {
            text,
            face,
            size,
            x,
            width,
        }
    }

    /// Offset of the piece's right edge.
    pub fn end(&self) -> f32 {
        self.x + self.width
    }
}

/// One output line of wrapped text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedLine {
    /// Pieces in drawing order
    pub pieces: Vec<Piece>,
    /// Total width of the line
    pub width: f32,
    /// The word that alone exceeds the available width, if this line holds one
    pub overflow: Option<String>,
}

/// The result of wrapping a run sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wrapped {
    /// Lines in order
    pub lines: Vec<WrappedLine>,
    /// Words that alone exceed the available width
    pub overflow: Vec<String>,
}

struct Fragment {
    text: String,
    face: FontFace,
    size: f32,
    width: f32,
}

struct Word {
    fragments: Vec<Fragment>,
    width: f32,
    space_width: f32,
}

impl Word {
    fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

/// Break styled runs into lines no wider than `max_width`.
///
/// Words are separated by whitespace and may span several runs
/// (`**bold**text` is one word). Consecutive whitespace collapses to a
/// single space. A word wider than `max_width` is placed alone on its own
/// line, marked in [`WrappedLine::overflow`] and listed in
/// [`Wrapped::overflow`].
///
/// `resolve` maps each run's style to the face and size it is set in.
pub fn wrap_runs<F>(runs: &[StyledRun], max_width: f32, resolve: F) -> Wrapped
where
    F: Fn(RunStyle) -> (FontFace, f32),
{
    let words = split_words(runs, &resolve);

    let mut wrapped = Wrapped::default();
    let mut line = WrappedLine::default();

    for word in words {
        if !line.pieces.is_empty() && line.width + word.space_width + word.width > max_width {
            wrapped.lines.push(std::mem::take(&mut line));
        }
        if line.pieces.is_empty() && word.width > max_width {
            let text = word.text();
            wrapped.overflow.push(text.clone());
            line.overflow = Some(text);
        }
        append_word(&mut line, word);
    }

    if !line.pieces.is_empty() {
        wrapped.lines.push(line);
    }
    wrapped
}

fn split_words<F>(runs: &[StyledRun], resolve: &F) -> Vec<Word>
where
    F: Fn(RunStyle) -> (FontFace, f32),
{
    let mut words: Vec<Word> = Vec::new();
    let mut pending_space: Option<f32> = None;
    let mut glued = false;

    for run in runs {
        let (face, size) = resolve(run.style());
        for (is_space, segment) in segments(&run.text) {
            if is_space {
                pending_space = Some(face.text_width(" ", size));
                glued = false;
                continue;
            }

            let width = face.text_width(segment, size);
            let fragment = Fragment {
                text: segment.to_string(),
                face,
                size,
                width,
            };

            match words.last_mut() {
                Some(word) if glued => {
                    word.width += width;
                    word.fragments.push(fragment);
                }
                _ => words.push(Word {
                    fragments: vec![fragment],
                    width,
                    space_width: pending_space.unwrap_or(0.0),
                }),
            }
            pending_space = None;
            glued = true;
        }
    }

    words
}

/// Split text into alternating whitespace and non-whitespace segments.
fn segments(text: &str) -> Vec<(bool, &str)> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut current: Option<bool> = None;

    for (i, ch) in text.char_indices() {
        let is_space = ch.is_whitespace();
        match current {
            Some(kind) if kind == is_space => {}
            Some(kind) => {
                out.push((kind, &text[start..i]));
                start = i;
                current = Some(is_space);
            }
            None => current = Some(is_space),
        }
    }
    if let Some(kind) = current {
        out.push((kind, &text[start..]));
    }
    out
}

fn append_word(line: &mut WrappedLine, word: Word) {
    let mut gap = if line.pieces.is_empty() {
        0.0
    } else {
        word.space_width
    };

    for fragment in word.fragments {
        match line.pieces.last_mut() {
            Some(last) if last.face == fragment.face && last.size == fragment.size => {
                if gap > 0.0 {
                    let space = last.face.text_width(" ", last.size);
                    last.text.push(' ');
                    last.width += space;
                    line.width += space;
                }
                last.text.push_str(&fragment.text);
                last.width += fragment.width;
            }
            _ => {
                line.width += gap;
                line.pieces.push(Piece {
                    text: fragment.text,
                    face: fragment.face,
                    size: fragment.size,
                    x: line.width,
                    width: fragment.width,
                });
            }
        }
        line.width += fragment.width;
        gap = 0.0;
    }
}

/// Break a fixed-width line by characters.
///
/// Tabs expand to [`TAB_WIDTH`] spaces. Each output line holds at least one
/// character; an empty input yields a single empty line.
pub fn wrap_chars(line: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let expanded = line.replace('\t', &" ".repeat(TAB_WIDTH));
    if expanded.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0.0;

    for ch in expanded.chars() {
        let advance = f32::from(face.char_width(ch)) * size / 1000.0;
        if !current.is_empty() && width + advance > max_width {
            lines.push(std::mem::take(&mut current));
            width = 0.0;
        }
        current.push(ch);
        width += advance;
    }
    lines.push(current);
    lines
}
