//! End-to-end tests: spreadsheet bytes to records to 834 text.

mod common;

use common::*;
use edi834::edi::{validate_records, Edi834Generator, GeneratorOptions, UsageIndicator};
use edi834::render::{records_from_json, records_to_json, JsonFormat};
use edi834::xlsx::XlsxParser;
use edi834::{
    parse_bytes, parse_bytes_as, parse_file, transcode_bytes, Error, FixedStamp, InputFormat,
    Record,
};

const HEADERS: &[&str] = &[
    "Member ID",
    "Relationship Code",
    "Last Name",
    "First Name",
    "Date of Birth",
    "Gender",
];

fn stamp() -> FixedStamp {
    FixedStamp::from_ymd_hm(2024, 1, 15, 9, 30, 894_135).unwrap()
}

fn family_xlsx() -> Vec<u8> {
    enrollment_xlsx(
        HEADERS,
        &[
            &["100", "18", "Doe", "Jane", "1990-05-01", "F"],
            &["101", "19", "Doe", "Jim", "2015-08-20 00:00:00", "M"],
        ],
    )
}

#[test]
fn test_xlsx_to_records() {
    let records = parse_bytes(&family_xlsx()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].keys().collect::<Vec<_>>(), HEADERS.to_vec());
    assert_eq!(records[1].get("First Name"), Some("Jim"));
}

#[test]
fn test_xlsx_to_edi() {
    let edi = transcode_bytes(&family_xlsx(), &stamp()).unwrap();
    let lines: Vec<&str> = edi.lines().collect();

    assert_eq!(lines[0].len(), 106);
    assert!(lines.contains(&"INS*Y*18*21**A***FT**N**~"));
    assert!(lines.contains(&"INS*N*19*21**A***FT**N**~"));
    assert!(lines.contains(&"NM1*IL*1*Doe*Jim****34*101~"));
    assert!(lines.contains(&"DMG*D8*20150820*M~"));

    let se_index = lines.iter().position(|l| l.starts_with("SE*")).unwrap();
    assert_eq!(lines[se_index], format!("SE*{}*894135~", se_index - 2));
    assert_eq!(lines[lines.len() - 2], "GE*1*894135~");
    assert_eq!(lines[lines.len() - 1], "IEA*1*000894135~");
    assert!(!edi.ends_with('\n'));
}

#[test]
fn test_parsing_is_idempotent() {
    let data = family_xlsx();
    assert_eq!(parse_bytes(&data).unwrap(), parse_bytes(&data).unwrap());
    assert_eq!(
        transcode_bytes(&data, &stamp()).unwrap(),
        transcode_bytes(&data, &stamp()).unwrap()
    );
}

#[test]
fn test_first_sheet_follows_relationships() {
    let workbook = workbook("rId2");
    let sheet1 = worksheet(r#"<row><c t="inlineStr"><is><t>Wrong</t></is></c></row>"#);
    let sheet2 = worksheet(
        r#"<row><c r="A1" t="inlineStr"><is><t>Member ID</t></is></c></row>
           <row><c r="A2"><v>7</v></c></row>"#,
    );
    let data = archive(&[
        ("xl/workbook.xml", &workbook),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", &sheet1),
        ("xl/worksheets/sheet2.xml", &sheet2),
    ]);

    let parser = XlsxParser::from_bytes(data).unwrap();
    assert_eq!(parser.sheet_path(), "xl/worksheets/sheet2.xml");
    let records = parser.parse().unwrap();
    assert_eq!(records, vec![Record::new().with("Member ID", "7")]);
}

#[test]
fn test_missing_workbook_uses_default_sheet() {
    let sheet = worksheet(
        r#"<row><c r="A1" t="inlineStr"><is><t>Plan</t></is></c></row>
           <row><c r="A2" t="inlineStr"><is><t>GOLD</t></is></c></row>"#,
    );
    let data = archive(&[("xl/worksheets/sheet1.xml", &sheet)]);
    let records = parse_bytes(&data).unwrap();
    assert_eq!(records[0].get("Plan"), Some("GOLD"));
}

#[test]
fn test_no_worksheet_is_missing_entry() {
    let data = archive(&[("xl/workbook.xml", &workbook("rId1"))]);
    let err = parse_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::MissingEntry(_)));
}

#[test]
fn test_malformed_sheet_xml() {
    let data = archive(&[(
        "xl/worksheets/sheet1.xml",
        "<worksheet><sheetData><row><c><v>1</x></c></row></sheetData></worksheet>",
    )]);
    let err = parse_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::MalformedSheetXml(_)));
}

#[test]
fn test_corrupt_archive() {
    let mut data = family_xlsx();
    data.truncate(data.len() / 2);
    let err = parse_bytes(&data).unwrap_err();
    assert!(matches!(err, Error::MalformedArchive(_)));
}

#[test]
fn test_checksum_mismatch_is_malformed_archive() {
    let sheet = worksheet(
        r#"<row><c r="A1" t="inlineStr"><is><t>Member ID</t></is></c></row>
           <row><c r="A2" t="inlineStr"><is><t>CHECKSUM</t></is></c></row>"#,
    );
    let mut data = stored_archive(&[("xl/worksheets/sheet1.xml", &sheet)]);
    assert_eq!(parse_bytes(&data).unwrap()[0].get("Member ID"), Some("CHECKSUM"));

    let at = data
        .windows(8)
        .position(|w| w == b"CHECKSUM")
        .unwrap();
    data[at] = b'X';

    match parse_bytes(&data).unwrap_err() {
        Error::MalformedArchive(msg) => assert!(msg.contains("xl/worksheets/sheet1.xml")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_text_named_xlsx_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("enrollment.xlsx");
    std::fs::write(&path, "Member ID,Last Name\n100,Doe\n").unwrap();
    assert!(matches!(
        parse_file(&path).unwrap_err(),
        Error::MalformedArchive(_)
    ));
}

#[test]
fn test_html_never_becomes_an_interchange() {
    let html = b"<html><head><title>Sign in</title></head><body>not a workbook</body></html>";
    let err = transcode_bytes(html, &stamp()).unwrap_err();
    assert!(matches!(err, Error::MalformedArchive(_)));
}

#[test]
fn test_ole2_workbook_is_malformed_archive() {
    let mut xls = vec![0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
    xls.resize(512, 0);
    let err = parse_bytes(&xls).unwrap_err();
    assert!(matches!(err, Error::MalformedArchive(_)));
}

#[test]
fn test_csv_matches_xlsx() {
    let csv = "Member ID,Relationship Code,Last Name,First Name,Date of Birth,Gender\r\n\
               100,18,Doe,Jane,1990-05-01,F\r\n\
               101,19,Doe,Jim,2015-08-20 00:00:00,M\r\n";
    let from_csv = parse_bytes_as(csv.as_bytes(), InputFormat::Csv).unwrap();
    let from_xlsx = parse_bytes(&family_xlsx()).unwrap();
    assert_eq!(from_csv, from_xlsx);
}

#[test]
fn test_json_round_trip_feeds_generator() {
    let records = parse_bytes(&family_xlsx()).unwrap();
    let json = records_to_json(&records, JsonFormat::Compact).unwrap();
    let back = records_from_json(&json).unwrap();
    assert_eq!(back, records);

    let generator = Edi834Generator::default();
    assert_eq!(
        generator.generate_string(&back, &stamp()),
        generator.generate_string(&records, &stamp())
    );
}

#[test]
fn test_test_mode_and_separator() {
    let records = parse_bytes(&family_xlsx()).unwrap();
    let options = GeneratorOptions::new()
        .with_usage(UsageIndicator::Test)
        .with_line_separator("\r\n");
    let edi = Edi834Generator::new(options).generate_string(&records, &stamp());
    assert!(edi.contains("*00501*000894135*0*T*:~\r\nGS*BE*"));
}

#[test]
fn test_validation_on_parsed_rows() {
    let data = enrollment_xlsx(
        &["Member ID", "Relationship Code", "Last Name", "First Name"],
        &[&["100", "19", "Doe", "Jim"]],
    );
    let records = parse_bytes(&data).unwrap();
    let report = validate_records(&records);
    let text = report.to_string();
    assert!(text.contains("Missing required input column: Sender ID"));
    assert!(text.contains("Row 2: Dependent rows require Subscriber Number"));
}

#[test]
fn test_header_only_sheet_generates_nothing() {
    let data = enrollment_xlsx(HEADERS, &[]);
    assert!(parse_bytes(&data).unwrap().is_empty());
    assert_eq!(transcode_bytes(&data, &stamp()).unwrap(), "");
}
