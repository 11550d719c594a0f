//! JSON renderer implementation.

use crate::error::Result;
use crate::model::Record;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert records to a JSON array of objects.
pub fn records_to_json(records: &[Record], format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(records)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(records)?,
    };
    Ok(json)
}

/// Convert records to JSON with default formatting.
pub fn records_to_json_default(records: &[Record]) -> Result<String> {
    records_to_json(records, JsonFormat::Pretty)
}

/// Parse a JSON array of objects into records.
///
/// Numbers and booleans become their text form, `null` becomes an empty value.
pub fn records_from_json(json: &str) -> Result<Vec<Record>> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    tracing::debug!(records = records.len(), "parsed records from JSON");
    Ok(records)
}
