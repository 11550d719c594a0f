//! X12 834 benefit enrollment output.
//!
//! Records become one interchange: an ISA/GS/ST envelope, the sponsor and
//! payer header, one member loop per record, and the SE/GE/IEA trailer.
//!
//! # Example
//!
//! ```
//! use edi834::edi::{Edi834Generator, FixedStamp, GeneratorOptions};
//! use edi834::Record;
//!
//! let records = vec![Record::new()
//!     .with("Member ID", "100")
//!     .with("Relationship Code", "19")];
//! let stamp = FixedStamp::from_ymd_hm(2024, 1, 15, 9, 30, 1).unwrap();
//!
//! let edi = Edi834Generator::new(GeneratorOptions::default()).generate_string(&records, &stamp);
//! assert!(edi.contains("INS*N*19*"));
//! assert!(edi.ends_with("IEA*1*000000001~"));
//! ```

mod dates;
pub mod fields;
mod generator;
mod options;
mod segment;
mod stamp;
mod validate;

pub use dates::normalize_date;
pub use generator::{Edi834Generator, Interchange, IMPLEMENTATION_REFERENCE};
pub use options::{GeneratorOptions, UsageIndicator, SUBSCRIBER_RELATIONSHIP_CODE};
pub use segment::{Delimiters, Segment};
pub use stamp::{FixedStamp, StampProvider, SystemStamp, DEFAULT_CONTROL_NUMBER};
pub use validate::{validate_records, ValidationIssue, ValidationReport};
