//! Input format selection.

use crate::error::{Error, Result};
use std::path::Path;

/// Supported input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Excel workbook (.xlsx)
    Xlsx,
    /// Comma-separated text (.csv)
    Csv,
}

impl InputFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            InputFormat::Xlsx => "xlsx",
            InputFormat::Csv => "csv",
        }
    }

    /// Returns a human-readable name for this format.
    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::Xlsx => "Excel Workbook",
            InputFormat::Csv => "CSV Text",
        }
    }

    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" => Some(InputFormat::Xlsx),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Choose the input format from a file's extension.
///
/// Content is never sniffed: a `.xlsx` file that is not a ZIP archive fails
/// later with `MalformedArchive` rather than being read as text.
///
/// # Example
///
/// ```
/// use edi834::detect::{detect_format_from_path, InputFormat};
///
/// assert_eq!(detect_format_from_path("members.CSV")?, InputFormat::Csv);
/// assert!(detect_format_from_path("members.xls").is_err());
/// # Ok::<(), edi834::Error>(())
/// ```
pub fn detect_format_from_path(path: impl AsRef<Path>) -> Result<InputFormat> {
    let path = path.as_ref();
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(InputFormat::from_extension)
        .ok_or_else(|| {
            Error::UnsupportedFormat(format!(
                "{}: expected a .xlsx or .csv file",
                path.display()
            ))
        })
}
