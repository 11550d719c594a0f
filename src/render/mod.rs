//! Record serialization.
//!
//! Records render as a JSON array of objects whose keys follow header
//! order, and the same shape parses back for generation.
//!
//! # Example
//!
//! ```no_run
//! use edi834::{parse_file, render::*};
//!
//! let records = parse_file("enrollment.xlsx")?;
//! let json = records_to_json(&records, JsonFormat::Pretty)?;
//! let again = records_from_json(&json)?;
//! assert_eq!(records, again);
//! # Ok::<(), edi834::Error>(())
//! ```

mod json;

pub use json::{records_from_json, records_to_json, records_to_json_default, JsonFormat};
