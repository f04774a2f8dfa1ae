//! Styled inline runs.

use serde::{Deserialize, Serialize};

/// Inline style flags. The flags combine freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Inline code (fixed-width font)
    pub code: bool,
}

impl RunStyle {
    /// Plain style.
    pub const PLAIN: RunStyle = RunStyle {
        bold: false,
        italic: false,
        code: false,
    };

    /// Same style with bold switched on.
    pub fn bolded(self) -> Self {
        Self { bold: true, ..self }
    }

    /// Same style with italic switched on.
    pub fn italicized(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }

    /// Same style with code switched on.
    pub fn as_code(self) -> Self {
        Self { code: true, ..self }
    }
}

/// A maximal span of text with uniform style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledRun {
    /// The text content
    pub text: String,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Inline code
    pub code: bool,
}

impl StyledRun {
    /// Create a run with the given style.
    pub fn styled(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            bold: style.bold,
            italic: style.italic,
            code: style.code,
        }
    }

    /// Create a plain run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, RunStyle::PLAIN)
    }

    /// Create a bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, RunStyle::PLAIN.bolded())
    }

    /// Create an italic run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(text, RunStyle::PLAIN.italicized())
    }

    /// Create an inline code run.
    pub fn code(text: impl Into<String>) -> Self {
        Self::styled(text, RunStyle::PLAIN.as_code())
    }

    /// The style flags of this run.
    pub fn style(&self) -> RunStyle {
        RunStyle {
            bold: self.bold,
            italic: self.italic,
            code: self.code,
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Concatenate the text of a run sequence.
pub fn runs_text(runs: &[StyledRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

/// Append a run, merging it into the previous one when the styles match.
///
/// Empty text is dropped so run sequences never contain empty runs.
pub fn push_run(runs: &mut Vec<StyledRun>, text: &str, style: RunStyle) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.style() == style => last.text.push_str(text),
        _ => runs.push(StyledRun::styled(text, style)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_run_merges_same_style() {
        let mut runs = Vec::new();
        push_run(&mut runs, "Hello ", RunStyle::PLAIN);
        push_run(&mut runs, "world", RunStyle::PLAIN);
        push_run(&mut runs, "!", RunStyle::PLAIN.bolded());

        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "Hello world");
        assert!(runs[1].bold);
    }

    #[test]
    fn test_push_run_skips_empty() {
        let mut runs = Vec::new();
        push_run(&mut runs, "", RunStyle::PLAIN.italicized());
        assert!(runs.is_empty());
    }

    #[test]
    fn test_style_round_trip() {
        let style = RunStyle::PLAIN.bolded().italicized();
        let run = StyledRun::styled("x", style);
        assert_eq!(run.style(), style);
        assert!(!run.code);
    }

    #[test]
    fn test_runs_text() {
        let runs = vec![StyledRun::plain("a "), StyledRun::bold("b")];
        assert_eq!(runs_text(&runs), "a b");
    }
}
