//! Typographic templates.
//!
//! Templates are immutable presets selected by name from a closed registry.
//! They are passed explicitly to the layout engine and the emitters.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::font::{FontFace, FontFamily};
use crate::error::{Error, Result};

/// A typographic preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    /// Registry name
    pub name: &'static str,

    /// Family for body text
    pub body_font: FontFamily,

    /// Family for the title and headings (drawn bold)
    pub head_font: FontFamily,

    /// Family for code and structural text
    pub code_font: FontFamily,

    /// Body text size in points
    pub body_size: f32,

    /// Document title size in points
    pub title_size: f32,

    /// Heading sizes for levels 1-6
    pub heading_sizes: [f32; 6],

    /// Code and structural text size in points
    pub code_size: f32,

    /// Baseline-to-baseline distance for body text in points
    pub line_spacing: f32,

    /// Page margin on all four sides in points
    pub margin: f32,
}

/// Serif layout with generous margins.
pub const CLASSIC: Template = Template {
    name: "classic",
    body_font: FontFamily::Times,
    head_font: FontFamily::Times,
    code_font: FontFamily::Courier,
    body_size: 11.0,
    title_size: 18.0,
    heading_sizes: [18.0, 15.0, 13.0, 12.0, 11.0, 11.0],
    code_size: 10.0,
    line_spacing: 14.0,
    margin: 60.0,
};

/// Sans-serif layout.
pub const MODERN: Template = Template {
    name: "modern",
    body_font: FontFamily::Helvetica,
    head_font: FontFamily::Helvetica,
    code_font: FontFamily::Courier,
    body_size: 12.0,
    title_size: 20.0,
    heading_sizes: [20.0, 17.0, 14.0, 13.0, 12.0, 12.0],
    code_size: 11.0,
    line_spacing: 16.0,
    margin: 50.0,
};

/// Fixed-width layout with tight margins.
pub const MINIMAL: Template = Template {
    name: "minimal",
    body_font: FontFamily::Courier,
    head_font: FontFamily::Courier,
    code_font: FontFamily::Courier,
    body_size: 10.0,
    title_size: 16.0,
    heading_sizes: [16.0, 14.0, 12.0, 11.0, 10.0, 10.0],
    code_size: 9.0,
    line_spacing: 12.0,
    margin: 40.0,
};

impl Template {
    /// Look up a template by name (case-insensitive).
    pub fn by_name(name: &str) -> Result<&'static Template> {
        name.parse::<TemplateName>().map(TemplateName::template)
    }

    /// All registered templates.
    pub fn all() -> [&'static Template; 3] {
        [&CLASSIC, &MODERN, &MINIMAL]
    }

    /// Line height for text set at `size`.
    ///
    /// Leading scales with the font size so every block keeps the body
    /// text's line-spacing ratio.
    pub fn line_height(&self, size: f32) -> f32 {
        size * self.line_spacing / self.body_size
    }

    /// Size for a heading level (clamped to 1-6).
    pub fn heading_size(&self, level: u8) -> f32 {
        self.heading_sizes[usize::from(level.clamp(1, 6)) - 1]
    }

    /// Face for body text with the given emphasis.
    pub fn body_face(&self, bold: bool, italic: bool) -> FontFace {
        self.body_font.face(bold, italic)
    }

    /// Face for the title and headings.
    pub fn head_face(&self, italic: bool) -> FontFace {
        self.head_font.face(true, italic)
    }

    /// Face for code with the given emphasis.
    pub fn code_face(&self, bold: bool, italic: bool) -> FontFace {
        self.code_font.face(bold, italic)
    }
}

impl Default for Template {
    fn default() -> Self {
        CLASSIC
    }
}

/// Name of a registered template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemplateName {
    /// Times, 11pt body
    #[default]
    Classic,
    /// Helvetica, 12pt body
    Modern,
    /// Courier, 10pt body
    Minimal,
}

impl TemplateName {
    /// All template names in registry order.
    pub const ALL: [TemplateName; 3] = [
        TemplateName::Classic,
        TemplateName::Modern,
        TemplateName::Minimal,
    ];

    /// The template registered under this name.
    pub fn template(self) -> &'static Template {
        match self {
            TemplateName::Classic => &CLASSIC,
            TemplateName::Modern => &MODERN,
            TemplateName::Minimal => &MINIMAL,
        }
    }

    /// Registry name.
    pub fn as_str(&self) -> &'static str {
        self.template().name
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(TemplateName::Classic),
            "modern" => Ok(TemplateName::Modern),
            "minimal" => Ok(TemplateName::Minimal),
            _ => Err(Error::TemplateNotFound(s.to_string())),
        }
    }
}
