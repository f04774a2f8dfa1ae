//! Text analysis: raw text to structured blocks.

mod analyzer;
mod cursor;
mod inline;
mod options;
mod table;
mod title;

pub use analyzer::{Analysis, Analyzer};
pub use cursor::LineCursor;
pub use inline::format_inline;
pub use options::{AnalyzeOptions, StructureMode};
pub use table::{split_cells, PipeTableParser, TableOutcome};
pub use title::{has_heading, inject_heading, resolve_title, title_from_file_name};
