//! Dense cell grid produced by the sheet and CSV readers.

use serde::{Deserialize, Serialize};

/// Rows of cell text, index-aligned by column.
///
/// Rows may differ in length; every row is dense from column 0 to its last
/// referenced column, with unreferenced cells stored as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawGrid {
    rows: Vec<Vec<String>>,
}

impl RawGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// All rows in source order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Get a row by index.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(|r| r.as_slice())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the grid has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

impl From<Vec<Vec<String>>> for RawGrid {
    fn from(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

impl FromIterator<Vec<String>> for RawGrid {
    fn from_iter<I: IntoIterator<Item = Vec<String>>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
