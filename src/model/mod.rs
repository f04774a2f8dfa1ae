//! Document model types.
//!
//! This module defines the format-neutral intermediate representation that
//! bridges text analysis and rendering. A [`StructuredDocument`] is built
//! append-only by the analyzer and fully materialized before layout.

mod block;
mod document;
mod run;
mod table;

pub use block::{Block, MAX_BULLET_DEPTH};
pub use document::{StructuredDocument, TitleSource};
pub use run::{push_run, runs_text, RunStyle, StyledRun};
pub use table::{Table, TableCell, TableRow, FOLDED_CELL_SEPARATOR};
