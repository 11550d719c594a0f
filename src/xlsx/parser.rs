//! XLSX reader: shared strings + first sheet -> grid -> records.

use crate::container::XlsxContainer;
use crate::error::{Error, Result};
use crate::model::{RawGrid, Record};
use crate::normalize::records_from_grid;
use std::io::Read;
use std::path::Path;

use super::sheet::decode_sheet;
use super::shared_strings::SharedStrings;
use super::workbook::{resolve_first_sheet_path, DEFAULT_SHEET_PATH};

/// Shared string part inside the package.
pub const SHARED_STRINGS_PATH: &str = "xl/sharedStrings.xml";

/// Reader for the first worksheet of an XLSX workbook.
pub struct XlsxParser {
    container: XlsxContainer,
    shared_strings: SharedStrings,
    sheet_path: String,
}

impl XlsxParser {
    /// Open an XLSX file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = XlsxContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = XlsxContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    /// Create a parser from a byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let container = XlsxContainer::from_reader(reader)?;
        Self::from_container(container)
    }

    /// Create a parser from a container.
    ///
    /// Loads the shared string table (absent part = empty table) and resolves
    /// the first sheet's part path.
    pub fn from_container(container: XlsxContainer) -> Result<Self> {
        let shared_strings = match container.read_optional_xml(SHARED_STRINGS_PATH)? {
            Some(xml) => SharedStrings::parse(&xml)?,
            None => {
                tracing::debug!("no shared string table");
                SharedStrings::default()
            }
        };

        let sheet_path = resolve_first_sheet_path(&container)?;

        Ok(Self {
            container,
            shared_strings,
            sheet_path,
        })
    }

    /// Decode the first sheet into a dense grid.
    pub fn parse_grid(&self) -> Result<RawGrid> {
        let xml = match self.container.read_optional_xml(&self.sheet_path)? {
            Some(xml) => xml,
            None => return Err(Error::MissingEntry(DEFAULT_SHEET_PATH.to_string())),
        };
        decode_sheet(&xml, &self.shared_strings)
    }

    /// Decode the first sheet into header-keyed records.
    pub fn parse(&self) -> Result<Vec<Record>> {
        let grid = self.parse_grid()?;
        Ok(records_from_grid(&grid))
    }

    /// Part path of the sheet that will be decoded.
    pub fn sheet_path(&self) -> &str {
        &self.sheet_path
    }

    /// The loaded shared string table.
    pub fn shared_strings(&self) -> &SharedStrings {
        &self.shared_strings
    }

    /// Get a reference to the container.
    pub fn container(&self) -> &XlsxContainer {
        &self.container
    }
}
