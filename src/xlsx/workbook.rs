//! First-sheet lookup through workbook.xml and its relationships.

use crate::container::XlsxContainer;
use crate::error::Result;
use quick_xml::events::Event;

/// Workbook part inside the package.
pub const WORKBOOK_PATH: &str = "xl/workbook.xml";

/// Path most producers use for the first worksheet.
pub const DEFAULT_SHEET_PATH: &str = "xl/worksheets/sheet1.xml";

/// Sheet info from workbook.xml.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetInfo {
    pub name: String,
    pub rel_id: Option<String>,
}

/// Return the first `<sheet>` declared in workbook.xml, in document order.
pub fn first_sheet(xml: &str) -> Result<Option<SheetInfo>> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                let mut sheet = SheetInfo::default();
                for attr in e.attributes() {
                    let attr = attr?;
                    match attr.key.local_name().as_ref() {
                        b"name" => sheet.name = attr.unescape_value()?.into_owned(),
                        // r:id; the prefix varies between producers
                        b"id" => {
                            let id = String::from_utf8_lossy(&attr.value).trim().to_string();
                            if !id.is_empty() {
                                sheet.rel_id = Some(id);
                            }
                        }
                        _ => {}
                    }
                }
                return Ok(Some(sheet));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}

/// Locate the XML part of the workbook's first sheet.
///
/// Resolution is best effort: a missing workbook, sheet, relationship id,
/// mapping, or target part falls back to [`DEFAULT_SHEET_PATH`]. Malformed
/// workbook or relationship XML is still an error.
pub fn resolve_first_sheet_path(container: &XlsxContainer) -> Result<String> {
    match lookup_first_sheet_path(container)? {
        Some(path) if container.exists(&path) => {
            tracing::debug!(sheet = %path, "resolved first sheet");
            Ok(path)
        }
        Some(path) => {
            tracing::warn!(
                sheet = %path,
                fallback = DEFAULT_SHEET_PATH,
                "resolved sheet part is absent, using default path"
            );
            Ok(DEFAULT_SHEET_PATH.to_string())
        }
        None => {
            tracing::warn!(
                fallback = DEFAULT_SHEET_PATH,
                "could not resolve first sheet, using default path"
            );
            Ok(DEFAULT_SHEET_PATH.to_string())
        }
    }
}

fn lookup_first_sheet_path(container: &XlsxContainer) -> Result<Option<String>> {
    let Some(xml) = container.read_optional_xml(WORKBOOK_PATH)? else {
        return Ok(None);
    };
    let Some(rel_id) = first_sheet(&xml)?.and_then(|sheet| sheet.rel_id) else {
        return Ok(None);
    };

    let rels = container.read_relationships(WORKBOOK_PATH)?;
    Ok(rels
        .get(&rel_id)
        .filter(|rel| !rel.target.is_empty())
        .map(|rel| XlsxContainer::resolve_path(WORKBOOK_PATH, &rel.target)))
}
