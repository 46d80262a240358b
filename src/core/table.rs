//! Table, row and cell types produced by the parser

use std::borrow::Cow;

/// A cell is a raw byte sequence, not necessarily valid UTF-8
pub type Cell = Vec<u8>;

/// A row is an ordered sequence of cells
pub type Row = Vec<Cell>;

/// Parsed ATBL table
///
/// Rows and cells keep the order in which they were declared in the
/// source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Table { rows: Vec::new() }
    }

    /// Borrow all rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Take ownership of all rows
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total number of cells across all rows
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Total number of bytes across all cells
    pub fn byte_count(&self) -> usize {
        self.rows.iter().flatten().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a single cell by row and column index
    pub fn cell(&self, row: usize, col: usize) -> Option<&[u8]> {
        self.rows.get(row)?.get(col).map(Vec::as_slice)
    }

    pub(crate) fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Table { rows }
    }
}

impl From<Table> for Vec<Row> {
    fn from(table: Table) -> Self {
        table.rows
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// View a cell as text, replacing invalid UTF-8 sequences
pub fn cell_as_text(cell: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(cell)
}

/// Render a cell as lowercase hex
pub fn cell_to_hex(cell: &[u8]) -> String {
    hex::encode(cell)
}

/// Render a cell the way it would be written inline: text when it is
/// valid UTF-8 without control characters, hex otherwise.
pub fn cell_display(cell: &[u8]) -> String {
    match std::str::from_utf8(cell) {
        Ok(text) if !text.chars().any(char::is_control) => format!("{:?}", text),
        _ => format!("0x{}", cell_to_hex(cell)),
    }
}
