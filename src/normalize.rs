//! Grid to record normalization (first row = headers).

use crate::model::{RawGrid, Record};

/// Convert a grid into one record per non-blank data row.
///
/// Row 0 supplies the header labels (trimmed). Headers pair with values by
/// column position; an empty header contributes no key. Rows whose cells are
/// all blank after trimming are skipped. Short rows yield empty strings for
/// the missing positions.
pub fn records_from_grid(grid: &RawGrid) -> Vec<Record> {
    let Some((header_row, data_rows)) = grid.rows().split_first() else {
        return Vec::new();
    };

    let headers: Vec<&str> = header_row.iter().map(|h| h.trim()).collect();

    let records: Vec<Record> = data_rows
        .iter()
        .filter(|row| !is_blank(row))
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| !header.is_empty())
                .map(|(i, header)| (*header, row.get(i).map(String::as_str).unwrap_or("")))
                .collect::<Record>()
        })
        .collect();

    tracing::debug!(
        headers = headers.iter().filter(|h| !h.is_empty()).count(),
        rows = data_rows.len(),
        records = records.len(),
        "normalized grid"
    );
    records
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}
