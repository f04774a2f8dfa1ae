//! Emission options and page geometry.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Page dimensions in points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Page width
    pub width: f32,
    /// Page height
    pub height: f32,
}

impl PageSize {
    /// ISO A4 (210 x 297 mm)
    pub const A4: PageSize = PageSize::new(595.28, 841.89);

    /// US Letter (8.5 x 11 in)
    pub const LETTER: PageSize = PageSize::new(612.0, 792.0);

    /// US Legal (8.5 x 14 in)
    pub const LEGAL: PageSize = PageSize::new(612.0, 1008.0);

    /// Create a custom page size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Named preset, if this size matches one.
    pub fn name(&self) -> Option<&'static str> {
        if *self == Self::A4 {
            Some("a4")
        } else if *self == Self::LETTER {
            Some("letter")
        } else if *self == Self::LEGAL {
            Some("legal")
        } else {
            None
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}x{}", self.width, self.height),
        }
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "letter" => Ok(Self::LETTER),
            "legal" => Ok(Self::LEGAL),
            _ => Err(Error::UnknownPageSize(s.to_string())),
        }
    }
}

/// Options shared by the output emitters.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// Page size for paginated output
    pub page_size: PageSize,

    /// Creation timestamp written into document metadata.
    /// `None` keeps the output byte-for-byte reproducible.
    pub created: Option<DateTime<Utc>>,

    /// Draw the document title line when the title did not come from a heading
    pub show_title: bool,

    /// Deflate-compress PDF content streams
    pub compress: bool,
}

impl EmitOptions {
    /// Create emit options with defaults.
    pub fn new() -> Self {
        Self {
            page_size: PageSize::default(),
            created: None,
            show_title: true,
            compress: true,
        }
    }

    /// Set the page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Enable or disable the title line.
    pub fn with_title_line(mut self, show: bool) -> Self {
        self.show_title = show;
        self
    }

    /// Enable or disable stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_parse() {
        assert_eq!("a4".parse::<PageSize>().unwrap(), PageSize::A4);
        assert_eq!("Letter".parse::<PageSize>().unwrap(), PageSize::LETTER);
        assert_eq!(" LEGAL ".parse::<PageSize>().unwrap(), PageSize::LEGAL);
        assert!(matches!(
            "tabloid".parse::<PageSize>(),
            Err(Error::UnknownPageSize(_))
        ));
    }

    #[test]
    fn test_page_size_display() {
        assert_eq!(PageSize::LETTER.to_string(), "letter");
        assert_eq!(PageSize::new(400.0, 700.0).to_string(), "400x700");
    }

    #[test]
    fn test_emit_options_builder() {
        let created = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let options = EmitOptions::new()
            .with_page_size(PageSize::LEGAL)
            .with_created(created)
            .with_title_line(false)
            .with_compression(false);

        assert_eq!(options.page_size, PageSize::LEGAL);
        assert_eq!(options.created, Some(created));
        assert!(!options.show_title);
        assert!(!options.compress);
    }

    #[test]
    fn test_emit_options_defaults() {
        let options = EmitOptions::default();
        assert_eq!(options.page_size, PageSize::A4);
        assert!(options.created.is_none());
        assert!(options.show_title);
        assert!(options.compress);
    }
}
