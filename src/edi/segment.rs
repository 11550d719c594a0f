//! X12 segments and delimiters.

use std::fmt;

/// The four X12 separator characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    /// Separates elements within a segment (`*`)
    pub element: char,
    /// Terminates a segment (`~`)
    pub segment: char,
    /// Separates components of a composite element (`:`), announced in ISA16
    pub component: char,
    /// Separates repeated elements (`^`), announced in ISA11
    pub repetition: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            element: '*',
            segment: '~',
            component: ':',
            repetition: '^',
        }
    }
}

impl Delimiters {
    /// Check whether `c` would be read as a separator.
    pub fn is_delimiter(&self, c: char) -> bool {
        c == self.element || c == self.segment || c == self.component || c == self.repetition
    }

    /// Replace separator characters and line breaks in a data value with spaces.
    pub fn scrub(&self, value: &str) -> String {
        value
            .chars()
            .map(|c| {
                if self.is_delimiter(c) || c == '\r' || c == '\n' {
                    ' '
                } else {
                    c
                }
            })
            .collect()
    }
}

/// One EDI segment: the segment ID followed by its data elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    elements: Vec<String>,
}

impl Segment {
    /// Build a segment from its ID and data elements.
    pub fn new<I, S>(id: &str, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut all = vec![id.to_string()];
        all.extend(elements.into_iter().map(Into::into));
        Self { elements: all }
    }

    /// Segment ID (`ISA`, `INS`, ...).
    pub fn id(&self) -> &str {
        &self.elements[0]
    }

    /// Data element at an X12 position (1-based; 0 is the segment ID).
    pub fn element(&self, position: usize) -> Option<&str> {
        self.elements.get(position).map(String::as_str)
    }

    /// Number of data elements, excluding the ID.
    pub fn element_count(&self) -> usize {
        self.elements.len() - 1
    }

    /// Render with the given delimiters, including the terminator.
    pub fn render(&self, delimiters: &Delimiters) -> String {
        let mut out = String::new();
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                out.push(delimiters.element);
            }
            out.push_str(element);
        }
        out.push(delimiters.segment);
        out
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Delimiters::default()))
    }
}
