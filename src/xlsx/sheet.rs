//! Worksheet XML decoding into a dense grid.

use crate::error::Result;
use crate::model::RawGrid;
use quick_xml::events::{BytesStart, Event};

use super::cell_ref::CellRef;
use super::shared_strings::SharedStrings;

/// A `<c>` element collected while its children are being read.
#[derive(Debug, Default)]
struct PendingCell {
    column: usize,
    cell_type: Option<String>,
    /// `<v>` content; `None` when the element is absent
    value: Option<String>,
    /// `<is>` text; `None` when the cell has no inline string
    inline: Option<String>,
}

impl PendingCell {
    fn from_element(e: &BytesStart<'_>, next_column: usize) -> Result<Self> {
        let mut cell = PendingCell {
            column: next_column,
            ..Default::default()
        };
        for attr in e.attributes() {
            let attr = attr?;
            match attr.key.local_name().as_ref() {
                b"r" => cell.column = CellRef::parse(&String::from_utf8_lossy(&attr.value)).column,
                b"t" => cell.cell_type = Some(String::from_utf8_lossy(&attr.value).to_string()),
                _ => {}
            }
        }
        Ok(cell)
    }

    /// Final text of the cell.
    ///
    /// Shared-string cells dereference their index; otherwise an inline string
    /// wins over the raw value. Absent nodes resolve to the empty string.
    fn resolve(self, shared: &SharedStrings) -> String {
        match (self.cell_type.as_deref(), self.value, self.inline) {
            (Some("s"), Some(raw), _) => shared.resolve(&raw).to_string(),
            (Some("s"), None, _) => String::new(),
            (_, _, Some(inline)) => inline,
            (_, Some(raw), None) => raw,
            (_, None, None) => String::new(),
        }
    }
}

/// Row under construction; cells may arrive sparse and out of order.
#[derive(Debug, Default)]
struct RowBuilder {
    cells: Vec<String>,
    next_column: usize,
}

impl RowBuilder {
    fn place(&mut self, column: usize, text: String) {
        if column >= self.cells.len() {
            self.cells.resize(column + 1, String::new());
        }
        self.cells[column] = text;
        self.next_column = column + 1;
    }
}

/// Decode worksheet XML into a [`RawGrid`].
///
/// Rows are taken in document order. Within a row, cells are placed by the
/// column of their `r` reference (a cell without one follows the previous
/// cell) and the gaps are filled with empty strings.
pub fn decode_sheet(xml: &str, shared: &SharedStrings) -> Result<RawGrid> {
    let mut grid = RawGrid::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    let mut row: Option<RowBuilder> = None;
    let mut cell: Option<PendingCell> = None;
    let mut in_value = false;
    let mut in_inline = false;
    let mut in_phonetic = false;
    let mut in_inline_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => row = Some(RowBuilder::default()),
                b"c" => {
                    if let Some(r) = row.as_ref() {
                        cell = Some(PendingCell::from_element(&e, r.next_column)?);
                    }
                }
                b"v" if cell.is_some() => {
                    in_value = true;
                    if let Some(c) = cell.as_mut() {
                        c.value.get_or_insert_with(String::new);
                    }
                }
                b"is" if cell.is_some() => {
                    in_inline = true;
                    if let Some(c) = cell.as_mut() {
                        c.inline.get_or_insert_with(String::new);
                    }
                }
                b"rPh" if in_inline => in_phonetic = true,
                b"t" if in_inline && !in_phonetic => in_inline_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => grid.push_row(Vec::new()),
                b"c" => {
                    if let Some(r) = row.as_mut() {
                        let pending = PendingCell::from_element(&e, r.next_column)?;
                        let column = pending.column;
                        r.place(column, pending.resolve(shared));
                    }
                }
                _ => {}
            },
            Event::Text(e) if in_value || in_inline_text => {
                let text = e.unescape()?;
                append_text(cell.as_mut(), in_value, &text);
            }
            Event::CData(e) if in_value || in_inline_text => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                append_text(cell.as_mut(), in_value, &text);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(r) = row.take() {
                        grid.push_row(r.cells);
                    }
                }
                b"c" => {
                    if let (Some(pending), Some(r)) = (cell.take(), row.as_mut()) {
                        let column = pending.column;
                        r.place(column, pending.resolve(shared));
                    }
                    in_value = false;
                    in_inline = false;
                    in_phonetic = false;
                    in_inline_text = false;
                }
                b"v" => in_value = false,
                b"is" => in_inline = false,
                b"rPh" => in_phonetic = false,
                b"t" => in_inline_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(rows = grid.len(), width = grid.width(), "decoded sheet");
    Ok(grid)
}

fn append_text(cell: Option<&mut PendingCell>, in_value: bool, text: &str) {
    let Some(cell) = cell else { return };
    let target = if in_value {
        cell.value.get_or_insert_with(String::new)
    } else {
        cell.inline.get_or_insert_with(String::new)
    };
    target.push_str(text);
}
