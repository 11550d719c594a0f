//! Intermediate data model shared by the readers and the EDI generator.

mod grid;
mod record;

pub use grid::RawGrid;
pub use record::Record;
