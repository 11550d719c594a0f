//! XLSX shared strings parsing.

use crate::error::Result;
use quick_xml::events::Event;

/// Shared strings table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedStrings {
    /// All strings in order
    strings: Vec<String>,
}

/// Where a `<t>` element sits inside the current string item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Outside,
    Item,
    Run,
    Phonetic,
}

impl SharedStrings {
    /// Parse shared strings from XML content.
    ///
    /// Each `si` flattens to one string: its direct `t` text followed by the
    /// `t` text of every `r` run, in document order. Phonetic guides (`rPh`)
    /// are not part of the cell text.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut strings = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut scope = Scope::Outside;
        let mut in_t = false;
        let mut current_text = String::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"si" => {
                        scope = Scope::Item;
                        current_text.clear();
                    }
                    b"r" if scope == Scope::Item => scope = Scope::Run,
                    b"rPh" if scope == Scope::Item => scope = Scope::Phonetic,
                    b"t" if matches!(scope, Scope::Item | Scope::Run) => in_t = true,
                    _ => {}
                },
                Event::Empty(e) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Event::Text(e) if in_t => {
                    current_text.push_str(&e.unescape()?);
                }
                Event::CData(e) if in_t => {
                    current_text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
                Event::End(e) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(std::mem::take(&mut current_text));
                        scope = Scope::Outside;
                    }
                    b"r" | b"rPh" if scope != Scope::Outside => scope = Scope::Item,
                    b"t" => in_t = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        tracing::debug!(count = strings.len(), "loaded shared strings");
        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Resolve the raw `<v>` text of an `s`-typed cell.
    ///
    /// A non-numeric or out-of-range index resolves to the empty string.
    pub fn resolve(&self, raw_index: &str) -> &str {
        let Ok(index) = raw_index.trim().parse::<usize>() else {
            tracing::warn!(raw = raw_index, "non-numeric shared string index");
            return "";
        };
        match self.get(index) {
            Some(text) => text,
            None => {
                tracing::warn!(index, len = self.len(), "shared string index out of range");
                ""
            }
        }
    }

    /// Get the count of shared strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_shared_strings() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="5" uniqueCount="3">
    <si><t>Member ID</t></si>
    <si><t>Last Name</t></si>
    <si><t>Doe</t></si>
</sst>"#;

        let ss = SharedStrings::parse(xml).unwrap();
        assert_eq!(ss.len(), 3);
        assert_eq!(ss.get(0), Some("Member ID"));
        assert_eq!(ss.get(1), Some("Last Name"));
        assert_eq!(ss.get(2), Some("Doe"));
        assert_eq!(ss.get(3), None);
    }

    #[test]
    fn test_rich_text_runs_concatenate() {
        let xml = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <si>
        <t>Plan </t>
        <r><rPr><b/></rPr><t>Gold</t></r>
        <r><t xml:space="preserve"> PPO</t></r>
    </si>
</sst>"#;

        let ss = SharedStrings::parse(xml).unwrap();
        assert_eq!(ss.len(), 1);
        assert_eq!(ss.get(0), Some("Plan Gold PPO"));
    }

    #[test]
    fn test_phonetic_runs_ignored() {
        let xml = r#"<sst><si><t>Tokyo</t><rPh sb="0" eb="2"><t>TOUKYOU</t></rPh></si></sst>"#;
        let ss = SharedStrings::parse(xml).unwrap();
        assert_eq!(ss.get(0), Some("Tokyo"));
    }

    #[test]
    fn test_entities_and_empty_items() {
        let xml = r#"<sst><si><t>Smith &amp; Sons</t></si><si/><si><t/></si></sst>"#;
        let ss = SharedStrings::parse(xml).unwrap();
        assert_eq!(ss.len(), 3);
        assert_eq!(ss.get(0), Some("Smith & Sons"));
        assert_eq!(ss.get(1), Some(""));
        assert_eq!(ss.get(2), Some(""));
    }

    #[test]
    fn test_resolve_sentinels() {
        let ss = SharedStrings::parse("<sst><si><t>only</t></si></sst>").unwrap();
        assert_eq!(ss.resolve("0"), "only");
        assert_eq!(ss.resolve("1"), "");
        assert_eq!(ss.resolve("abc"), "");
        assert_eq!(ss.resolve(""), "");
    }

    #[test]
    fn test_malformed_xml() {
        let err = SharedStrings::parse("<sst><si><t>x</si></sst>").unwrap_err();
        assert!(matches!(err, Error::MalformedSheetXml(_)));
    }
}
