//! Table types.

use super::run::{push_run, runs_text, RunStyle, StyledRun};
use serde::{Deserialize, Serialize};

/// A table cell: a sequence of styled runs.
pub type TableCell = Vec<StyledRun>;

/// A table row: one cell per column.
pub type TableRow = Vec<TableCell>;

/// Separator used when surplus cells are folded into the last column.
pub const FOLDED_CELL_SEPARATOR: &str = " | ";

/// A rectangular table. The first row is the header.
///
/// Every row has exactly [`Table::column_count`] cells: short rows are
/// padded with empty cells and surplus cells are folded into the last one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table, header first
    rows: Vec<TableRow>,

    /// Number of columns, fixed by the header
    columns: usize,
}

impl Table {
    /// Create a table from its header row.
    pub fn new(header: TableRow) -> Self {
        let columns = header.len();
        Self {
            rows: vec![header],
            columns,
        }
    }

    /// Append a data row, normalizing it to the header's column count.
    pub fn push_row(&mut self, mut row: TableRow) {
        if row.len() > self.columns && self.columns > 0 {
            let surplus = row.split_off(self.columns);
            if let Some(last) = row.last_mut() {
                for cell in surplus {
                    push_run(last, FOLDED_CELL_SEPARATOR, RunStyle::PLAIN);
                    for run in cell {
                        push_run(last, &run.text, run.style());
                    }
                }
            }
        }
        row.resize_with(self.columns, Vec::new);
        self.rows.push(row);
    }

    /// All rows, header first.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// The header row.
    pub fn header(&self) -> &TableRow {
        &self.rows[0]
    }

    /// Data rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        &self.rows[1..]
    }

    /// Get the number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Get plain text representation of the table, one line per row.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| runs_text(cell))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str) -> TableCell {
        vec![StyledRun::plain(text)]
    }

    #[test]
    fn test_short_row_is_padded() {
        let mut table = Table::new(vec![cell("a"), cell("b"), cell("c")]);
        table.push_row(vec![cell("1")]);

        assert_eq!(table.body()[0].len(), 3);
        assert!(table.body()[0][2].is_empty());
    }

    #[test]
    fn test_surplus_cells_are_folded() {
        let mut table = Table::new(vec![cell("a"), cell("b")]);
        table.push_row(vec![cell("1"), cell("2"), cell("3"), cell("4")]);

        let row = &table.body()[0];
        assert_eq!(row.len(), 2);
        assert_eq!(runs_text(&row[1]), "2 | 3 | 4");
    }

    #[test]
    fn test_plain_text() {
        let mut table = Table::new(vec![cell("Name"), cell("Age")]);
        table.push_row(vec![cell("Ada"), cell("36")]);
        assert_eq!(table.plain_text(), "Name\tAge\nAda\t36");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
    }
}
