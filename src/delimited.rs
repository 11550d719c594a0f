//! Comma-separated text input.
//!
//! Enrollment sheets are often exported as CSV instead of XLSX. The text is
//! read into the same [`RawGrid`] the sheet decoder produces so both inputs
//! share one normalization path.

use crate::error::Result;
use crate::model::RawGrid;
use csv::ReaderBuilder;
use std::io::Cursor;

/// Read CSV bytes into a grid.
///
/// Rows may have different field counts. Blank lines are kept as empty rows
/// and left to the normalizer to drop. A leading UTF-8 BOM is ignored.
pub fn parse_csv(data: &[u8]) -> Result<RawGrid> {
    let data = data.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(data);
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let mut grid = RawGrid::new();
    let mut last_line = 0;
    for result in rdr.records() {
        let record = result?;

        // the reader skips blank lines; keep them so row positions line up
        let line = record.position().map(|p| p.line()).unwrap_or(last_line + 1);
        for _ in last_line + 1..line {
            grid.push_row(Vec::new());
        }
        last_line = line + record.iter().map(|f| f.matches('\n').count() as u64).sum::<u64>();

        grid.push_row(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(rows = grid.len(), width = grid.width(), "read csv");
    Ok(grid)
}
