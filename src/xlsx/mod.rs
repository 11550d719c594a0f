//! Minimal XLSX reader.
//!
//! Only what enrollment input needs: the shared string table and the first
//! worksheet, decoded as raw cell text. Styles, formulas and number formats
//! are not interpreted.
//!
//! # Example
//!
//! ```no_run
//! use edi834::xlsx::XlsxParser;
//!
//! let parser = XlsxParser::open("enrollment.xlsx")?;
//! for record in parser.parse()? {
//!     println!("{:?}", record.get("Member ID"));
//! }
//! # Ok::<(), edi834::Error>(())
//! ```

pub mod cell_ref;
mod parser;
mod shared_strings;
mod sheet;
pub mod workbook;

pub use cell_ref::{column_index, column_letters, CellRef};
pub use parser::{XlsxParser, SHARED_STRINGS_PATH};
pub use shared_strings::SharedStrings;
pub use sheet::decode_sheet;
pub use workbook::{resolve_first_sheet_path, DEFAULT_SHEET_PATH};
