//! Analysis options and configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Options for analyzing source text.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// How lines are classified into blocks
    pub mode: StructureMode,

    /// Title used when the text has no level-1 heading
    pub title_hint: Option<String>,

    /// Source file name, used as the last title fallback
    pub file_name: Option<String>,

    /// Apply Unicode NFC normalization before analysis
    pub normalize_unicode: bool,
}

impl AnalyzeOptions {
    /// Create new analyze options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set structure mode.
    pub fn with_mode(mut self, mode: StructureMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the title hint.
    pub fn with_title_hint(mut self, title: impl Into<String>) -> Self {
        self.title_hint = Some(title.into());
        self
    }

    /// Set the source file name.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            mode: StructureMode::Markdown,
            title_hint: None,
            file_name: None,
            normalize_unicode: true,
        }
    }
}

/// How source lines are classified into blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StructureMode {
    /// Markdown syntax: headings, lists, quotes, fences, pipe tables
    #[default]
    Markdown,
    /// Markdown rules plus heuristic headings for plain text
    AutoStructure,
    /// Every non-blank line is a plain paragraph
    Literal,
    /// Every non-blank line is a bullet
    Bulletize,
}

impl StructureMode {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            StructureMode::Markdown => "markdown",
            StructureMode::AutoStructure => "auto",
            StructureMode::Literal => "literal",
            StructureMode::Bulletize => "bulletize",
        }
    }

    /// Whether Markdown block syntax is recognized in this mode.
    pub fn parses_markdown(&self) -> bool {
        matches!(self, StructureMode::Markdown | StructureMode::AutoStructure)
    }
}

impl fmt::Display for StructureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StructureMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(StructureMode::Markdown),
            "auto" | "auto-structure" | "auto_structure" => Ok(StructureMode::AutoStructure),
            "literal" | "plain" => Ok(StructureMode::Literal),
            "bulletize" | "bullets" => Ok(StructureMode::Bulletize),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_options_builder() {
        let options = AnalyzeOptions::new()
            .with_mode(StructureMode::Bulletize)
            .with_title_hint("Notes")
            .with_file_name("notes.txt")
            .with_normalization(false);

        assert_eq!(options.mode, StructureMode::Bulletize);
        assert_eq!(options.title_hint.as_deref(), Some("Notes"));
        assert_eq!(options.file_name.as_deref(), Some("notes.txt"));
        assert!(!options.normalize_unicode);
    }

    #[test]
    fn test_default_options() {
        let options = AnalyzeOptions::default();
        assert_eq!(options.mode, StructureMode::Markdown);
        assert!(options.normalize_unicode);
        assert!(options.title_hint.is_none());
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("auto".parse::<StructureMode>().unwrap(), StructureMode::AutoStructure);
        assert_eq!("MD".parse::<StructureMode>().unwrap(), StructureMode::Markdown);
        assert!("fancy".parse::<StructureMode>().is_err());
    }
}
