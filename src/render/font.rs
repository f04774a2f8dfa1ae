//! Standard Type1 font faces and their metrics.

use serde::{Deserialize, Serialize};

use super::encoding::win_ansi_byte;

/// One of the three standard PDF font families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Times (serif)
    Times,
    /// Helvetica (sans-serif)
    Helvetica,
    /// Courier (fixed-width)
    Courier,
}

impl FontFamily {
    /// Get a face of this family.
    pub fn face(self, bold: bool, italic: bool) -> FontFace {
        FontFace {
            family: self,
            bold,
            italic,
        }
    }

    /// The upright regular face.
    pub fn regular(self) -> FontFace {
        self.face(false, false)
    }

    /// Equivalent font name for word processors.
    pub fn word_name(self) -> &'static str {
        match self {
            FontFamily::Times => "Times New Roman",
            FontFamily::Helvetica => "Arial",
            FontFamily::Courier => "Courier New",
        }
    }
}

/// A concrete face: family plus weight and slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FontFace {
    /// Font family
    pub family: FontFamily,
    /// Bold weight
    pub bold: bool,
    /// Italic or oblique slant
    pub italic: bool,
}

impl FontFace {
    /// PostScript name of the standard-14 font for this face.
    pub fn base_font(&self) -> &'static str {
        match (self.family, self.bold, self.italic) {
            (FontFamily::Times, false, false) => "Times-Roman",
            (FontFamily::Times, true, false) => "Times-Bold",
            (FontFamily::Times, false, true) => "Times-Italic",
            (FontFamily::Times, true, true) => "Times-BoldItalic",
            (FontFamily::Helvetica, false, false) => "Helvetica",
            (FontFamily::Helvetica, true, false) => "Helvetica-Bold",
            (FontFamily::Helvetica, false, true) => "Helvetica-Oblique",
            (FontFamily::Helvetica, true, true) => "Helvetica-BoldOblique",
            (FontFamily::Courier, false, false) => "Courier",
            (FontFamily::Courier, true, false) => "Courier-Bold",
            (FontFamily::Courier, false, true) => "Courier-Oblique",
            (FontFamily::Courier, true, true) => "Courier-BoldOblique",
        }
    }

    /// Same family with additional weight or slant.
    pub fn emphasized(self, bold: bool, italic: bool) -> Self {
        Self {
            family: self.family,
            bold: self.bold || bold,
            italic: self.italic || italic,
        }
    }

    /// Advance width of a character in 1/1000 em.
    ///
    /// Widths are looked up for the WinAnsi byte the character is drawn
    /// as, so measurement always matches what the PDF shows. Italic faces
    /// share the upright tables.
    pub fn char_width(&self, ch: char) -> u16 {
        if self.family == FontFamily::Courier {
            return 600;
        }

        let (table, default) = match (self.family, self.bold) {
            (FontFamily::Helvetica, false) => (&HELVETICA, 556),
            (FontFamily::Helvetica, true) => (&HELVETICA_BOLD, 556),
            (FontFamily::Times, false) => (&TIMES_ROMAN, 500),
            (FontFamily::Times, true) => (&TIMES_BOLD, 500),
            (FontFamily::Courier, _) => return 600,
        };

        let helvetica = self.family == FontFamily::Helvetica;
        match win_ansi_byte(ch) {
            byte @ 32..=126 => table[(byte - 32) as usize],
            0xA0 => table[0],
            0x95 => 350,
            0x85 | 0x97 => 1000,
            0x99 => {
                if helvetica {
                    1000
                } else {
                    980
                }
            }
            0x91 | 0x92 => match (helvetica, self.bold) {
                (true, false) => 222,
                (true, true) => 278,
                (false, _) => 333,
            },
            0x93 | 0x94 => match (helvetica, self.bold) {
                (true, false) => 333,
                (false, false) => 444,
                (_, true) => 500,
            },
            _ => default,
        }
    }

    /// Width of a string in points at the given size.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size / 1000.0
    }
}

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];
