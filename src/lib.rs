//! # edi834
//!
//! Spreadsheet enrollment data to X12 834 benefit enrollment files.
//!
//! The first worksheet of an XLSX workbook (or a CSV file) is read into
//! header-keyed records, which the generator turns into a single
//! 005010X220A1 interchange.
//!
//! ## Quick Start
//!
//! ```no_run
//! use edi834::{generate_834, parse_file, SystemStamp};
//!
//! // Read the first worksheet
//! let records = parse_file("enrollment.xlsx")?;
//! println!("Members: {}", records.len());
//!
//! // Generate the 834 text
//! let edi = generate_834(&records, &SystemStamp::new());
//! std::fs::write("enrollment.edi", edi)?;
//! # Ok::<(), edi834::Error>(())
//! ```
//!
//! ## Module APIs
//!
//! ```no_run
//! use edi834::edi::{Edi834Generator, GeneratorOptions, SystemStamp, UsageIndicator};
//! use edi834::xlsx::XlsxParser;
//!
//! let records = XlsxParser::open("enrollment.xlsx")?.parse()?;
//!
//! let options = GeneratorOptions::default()
//!     .with_usage(UsageIndicator::Test)
//!     .with_line_separator("\r\n");
//! let interchange = Edi834Generator::new(options).generate(&records, &SystemStamp::new());
//! println!("{} segments", interchange.segment_count());
//! # Ok::<(), edi834::Error>(())
//! ```
//!
//! ## Features
//!
//! - `async`: Async file reading with Tokio
//! - `ffi`: C-ABI bindings for foreign language integration

pub mod container;
pub mod delimited;
pub mod detect;
pub mod edi;
pub mod error;
pub mod model;
pub mod normalize;
pub mod render;
pub mod xlsx;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-exports
pub use container::{Relationship, Relationships, XlsxContainer};
pub use detect::{detect_format_from_path, InputFormat};
pub use edi::{
    Edi834Generator, FixedStamp, GeneratorOptions, Interchange, StampProvider, SystemStamp,
};
pub use error::{Error, Result};
pub use model::{RawGrid, Record};

use std::io::Read;
use std::path::Path;

/// Parse an input file into records.
///
/// The reader is chosen by extension: `.xlsx` opens the workbook archive and
/// `.csv` reads delimited text. Any other extension is `UnsupportedFormat`.
///
/// # Example
///
/// ```no_run
/// use edi834::parse_file;
///
/// let records = parse_file("enrollment.xlsx")?;
/// for record in &records {
///     println!("{:?}", record.get("Last Name"));
/// }
/// # Ok::<(), edi834::Error>(())
/// ```
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let format = detect_format_from_path(path.as_ref())?;
    let data = std::fs::read(path.as_ref())?;
    parse_bytes_as(&data, format)
}

/// Parse XLSX workbook bytes into records.
///
/// Bytes that are not a valid ZIP container fail with `MalformedArchive`.
pub fn parse_bytes(data: &[u8]) -> Result<Vec<Record>> {
    xlsx::XlsxParser::from_bytes(data.to_vec())?.parse()
}

/// Parse input bytes of a known format into records.
///
/// # Example
///
/// ```
/// use edi834::{parse_bytes_as, InputFormat};
///
/// let records = parse_bytes_as(b"Member ID,Last Name\n100,Doe\n", InputFormat::Csv)?;
/// assert_eq!(records[0].get("Last Name"), Some("Doe"));
/// # Ok::<(), edi834::Error>(())
/// ```
pub fn parse_bytes_as(data: &[u8], format: InputFormat) -> Result<Vec<Record>> {
    match format {
        InputFormat::Xlsx => parse_bytes(data),
        InputFormat::Csv => {
            let grid = delimited::parse_csv(data)?;
            Ok(normalize::records_from_grid(&grid))
        }
    }
}

/// Parse XLSX records from any byte source, such as an upload stream.
pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<Record>> {
    xlsx::XlsxParser::from_reader(reader)?.parse()
}

/// Parse an input file without blocking the async runtime.
#[cfg(feature = "async")]
pub async fn parse_file_async(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let format = detect_format_from_path(path.as_ref())?;
    let data = tokio::fs::read(path.as_ref()).await?;
    parse_bytes_as(&data, format)
}

/// Generate 834 text with default options.
///
/// An empty record list yields an empty string.
pub fn generate_834<S: StampProvider + ?Sized>(records: &[Record], stamp: &S) -> String {
    Edi834Generator::default().generate_string(records, stamp)
}

/// Parse XLSX workbook bytes and generate 834 text in one step.
///
/// # Example
///
/// ```no_run
/// use edi834::{transcode_bytes, FixedStamp};
///
/// let data = std::fs::read("enrollment.xlsx")?;
/// let stamp = FixedStamp::from_ymd_hm(2024, 1, 15, 9, 30, 894135).unwrap();
/// let edi = transcode_bytes(&data, &stamp)?;
/// assert!(edi.starts_with("ISA*"));
/// # Ok::<(), edi834::Error>(())
/// ```
pub fn transcode_bytes<S: StampProvider + ?Sized>(data: &[u8], stamp: &S) -> Result<String> {
    transcode_bytes_as(data, InputFormat::Xlsx, stamp)
}

/// Parse input bytes of a known format and generate 834 text.
///
/// # Example
///
/// ```
/// use edi834::{transcode_bytes_as, FixedStamp, InputFormat};
///
/// let stamp = FixedStamp::from_ymd_hm(2024, 1, 15, 9, 30, 894135).unwrap();
/// let csv = b"Member ID,Relationship Code\n100,18\n";
/// let edi = transcode_bytes_as(csv, InputFormat::Csv, &stamp)?;
/// assert!(edi.contains("INS*Y*18*"));
/// # Ok::<(), edi834::Error>(())
/// ```
pub fn transcode_bytes_as<S: StampProvider + ?Sized>(
    data: &[u8],
    format: InputFormat,
    stamp: &S,
) -> Result<String> {
    let records = parse_bytes_as(data, format)?;
    Ok(generate_834(&records, stamp))
}
