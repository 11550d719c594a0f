//! In-memory XLSX fixtures for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
  <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#;

/// Workbook whose first declared sheet uses the given relationship id.
pub fn workbook(first_rel: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets>
    <sheet name="Members" sheetId="1" r:id="{}"/>
    <sheet name="Other" sheetId="2" r:id="rId1"/>
  </sheets>
</workbook>"#,
        first_rel
    )
}

pub fn shared_strings(items: &[&str]) -> String {
    let body: String = items
        .iter()
        .map(|s| format!("<si><t xml:space=\"preserve\">{}</t></si>", s))
        .collect();
    format!(
        r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">{1}</sst>"#,
        items.len(),
        body
    )
}

pub fn worksheet(rows: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
        rows
    )
}

/// Zip the given `(entry, content)` pairs.
pub fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
    zip_entries(entries, SimpleFileOptions::default())
}

/// Like [`archive`], but entries are stored uncompressed so their bytes can
/// be located and altered in the output.
pub fn stored_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    zip_entries(entries, options)
}

fn zip_entries(entries: &[(&str, &str)], options: SimpleFileOptions) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Header row plus one row per member, every cell a shared string.
///
/// Returns the workbook bytes with the data in `sheet1.xml`.
pub fn enrollment_xlsx(headers: &[&str], members: &[&[&str]]) -> Vec<u8> {
    let mut strings: Vec<&str> = headers.to_vec();
    let mut rows = String::new();

    rows.push_str(r#"<row r="1">"#);
    for (col, _) in headers.iter().enumerate() {
        rows.push_str(&format!(r#"<c r="{}1" t="s"><v>{}</v></c>"#, letter(col), col));
    }
    rows.push_str("</row>");

    for (n, member) in members.iter().enumerate() {
        let line = n + 2;
        rows.push_str(&format!(r#"<row r="{}">"#, line));
        for (col, value) in member.iter().enumerate() {
            strings.push(*value);
            rows.push_str(&format!(
                r#"<c r="{}{}" t="s"><v>{}</v></c>"#,
                letter(col),
                line,
                strings.len() - 1
            ));
        }
        rows.push_str("</row>");
    }

    let sst = shared_strings(&strings);
    let sheet = worksheet(&rows);
    let workbook = workbook("rId1");
    archive(&[
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/sharedStrings.xml", &sst),
        ("xl/worksheets/sheet1.xml", &sheet),
    ])
}

fn letter(col: usize) -> char {
    (b'A' + col as u8) as char
}
