//! Rendering: layout of structured documents and output emitters.
//!
//! PDF output goes through the [`LayoutEngine`], which positions every line
//! on fixed-size pages, and is then painted by [`write_pdf`]. DOCX output is
//! structural: [`write_docx`] maps blocks onto word-processor styles and
//! leaves pagination to the reader application.

mod docx;
mod encoding;
mod font;
mod json;
mod layout;
mod options;
mod pdf;
mod result;
mod template;
mod wrap;

pub use docx::write_docx;
pub use encoding::{encode as encode_win_ansi, win_ansi_byte};
pub use font::{FontFace, FontFamily};
pub use json::{to_json, JsonFormat};
pub use layout::{paginate, Layout, LayoutEngine, Page, PositionedItem, Rect, TextLine};
pub use options::{EmitOptions, PageSize};
pub use pdf::write_pdf;
pub use result::ConversionStats;
pub use template::{Template, TemplateName, CLASSIC, MINIMAL, MODERN};
pub use wrap::{wrap_chars, wrap_runs, Piece, Wrapped, WrappedLine};

/// Producer string written into output metadata.
pub const PRODUCER: &str = concat!("docpress ", env!("CARGO_PKG_VERSION"));
