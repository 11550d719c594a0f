//! Error types for the edi834 library.

use std::io;
use thiserror::Error;

/// Result type alias for edi834 operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading spreadsheets or generating EDI.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a valid ZIP container (bad signature, CRC, or directory).
    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    /// Workbook, relationship, shared-string, or sheet XML failed to parse.
    #[error("Malformed sheet XML: {0}")]
    MalformedSheetXml(String),

    /// A named archive entry is absent.
    ///
    /// Callers treat this as soft for the shared-string part and for sheet
    /// path resolution; it only surfaces when no worksheet exists at all.
    #[error("Missing archive entry: {0}")]
    MissingEntry(String),

    /// The input file type is not one this library reads.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Delimited text could not be read.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Error converting records to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Records failed the enrollment input checks.
    #[error("Validation failed:\n{0}")]
    Validation(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::MalformedArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::MalformedSheetXml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::MalformedSheetXml(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
