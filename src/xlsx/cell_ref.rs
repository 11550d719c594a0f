//! Cell reference parsing ("B7" -> column 1, row 7).
//!
//! Pure value conversions with no archive or XML dependency.

/// Number of columns an XLSX sheet can address (A..=XFD).
pub const MAX_COLUMNS: usize = 16_384;

/// A parsed cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRef {
    /// Zero-based column index
    pub column: usize,
    /// One-based row number as written in the reference, if any
    pub row: Option<u32>,
}

impl CellRef {
    /// Parse a reference such as `"AB12"`.
    ///
    /// Column letters must be a leading run of uppercase `A`-`Z`. Anything
    /// else (lowercase, no letters, a column past XFD) resolves to column 0.
    pub fn parse(reference: &str) -> Self {
        let letters_end = reference
            .find(|c: char| !c.is_ascii_uppercase())
            .unwrap_or(reference.len());
        let (letters, rest) = reference.split_at(letters_end);

        Self {
            column: letters_to_index(letters).unwrap_or(0),
            row: rest.parse::<u32>().ok(),
        }
    }
}

impl std::fmt::Display for CellRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&column_letters(self.column))?;
        if let Some(row) = self.row {
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Column index for a cell reference; unparseable references give 0.
pub fn column_index(reference: &str) -> usize {
    CellRef::parse(reference).column
}

fn letters_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }

    let mut value: usize = 0;
    for byte in letters.bytes() {
        let digit = usize::from(byte - b'A') + 1;
        value = value.checked_mul(26)?.checked_add(digit)?;
        if value > MAX_COLUMNS {
            return None;
        }
    }

    Some(value - 1)
}

/// Canonical column letters for a zero-based index (0 -> "A", 26 -> "AA").
pub fn column_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
