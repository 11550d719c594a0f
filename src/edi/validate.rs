//! Pre-generation checks on enrollment records.

use crate::error::{Error, Result};
use crate::model::Record;
use std::fmt;

use super::fields::*;
use super::options::SUBSCRIBER_RELATIONSHIP_CODE;

const GENDER_CODES: [&str; 3] = ["M", "F", "U"];

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// The records carry no rows at all.
    NoRows,
    /// Header column absent from the first record.
    MissingColumn(String),
    /// Problem on a data row; `row` is the spreadsheet line (header is line 1).
    Row { row: usize, message: String },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::NoRows => write!(f, "Input has no data rows"),
            ValidationIssue::MissingColumn(name) => {
                write!(f, "Missing required input column: {}", name)
            }
            ValidationIssue::Row { row, message } => write!(f, "Row {}: {}", row, message),
        }
    }
}

/// Collected validation findings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// `Err(Error::Validation)` listing every issue, one per line.
    pub fn into_result(self) -> Result<()> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(Error::Validation(self.to_string()))
        }
    }

    fn row(&mut self, row: usize, message: impl Into<String>) {
        self.issues.push(ValidationIssue::Row {
            row,
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

fn present<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).map(str::trim).filter(|v| !v.is_empty())
}

/// Check records for the columns and values a usable enrollment file needs.
///
/// Generation itself never requires this; missing values fall back to
/// defaults. Use it to reject incomplete input up front.
pub fn validate_records(records: &[Record]) -> ValidationReport {
    let mut report = ValidationReport::default();

    let Some(first) = records.first() else {
        report.issues.push(ValidationIssue::NoRows);
        return report;
    };

    for column in REQUIRED_COLUMNS {
        if !first.contains_key(column) {
            report
                .issues
                .push(ValidationIssue::MissingColumn(column.to_string()));
        }
    }

    for (idx, record) in records.iter().enumerate() {
        let row = idx + 2;

        for key in [MEMBER_ID, LAST_NAME, FIRST_NAME, RELATIONSHIP_CODE] {
            if present(record, key).is_none() {
                report.row(row, format!("{} is required", key));
            }
        }

        let gender = present(record, GENDER).unwrap_or("U");
        if !GENDER_CODES.contains(&gender) {
            report.row(row, "Gender must be M/F/U");
        }

        let relationship = present(record, RELATIONSHIP_CODE);
        if relationship != Some(SUBSCRIBER_RELATIONSHIP_CODE)
            && present(record, SUBSCRIBER_NUMBER).is_none()
        {
            report.row(row, "Dependent rows require Subscriber Number");
        }
    }

    tracing::debug!(
        records = records.len(),
        issues = report.len(),
        "validated records"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> Record {
        Record::new()
            .with("Sender ID", "S")
            .with("Receiver ID", "R")
            .with("Group", "G")
            .with("Plan", "P")
            .with("Product", "X")
            .with("Member ID", "100")
            .with("Relationship Code", "18")
            .with("Last Name", "Doe")
            .with("First Name", "Jane")
    }

    #[test]
    fn test_complete_records_pass() {
        let dependent = complete()
            .with("Relationship Code", "19")
            .with("Subscriber Number", "100")
            .with("Gender", "M");
        let report = validate_records(&[complete(), dependent]);
        assert!(report.is_ok(), "{}", report);
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_no_rows() {
        let report = validate_records(&[]);
        assert_eq!(report.issues(), &[ValidationIssue::NoRows]);
    }

    #[test]
    fn test_missing_columns_from_first_record() {
        let record = Record::new()
            .with("Member ID", "1")
            .with("Relationship Code", "18")
            .with("Last Name", "A")
            .with("First Name", "B");
        let report = validate_records(&[record]);
        let missing: Vec<String> = report
            .issues()
            .iter()
            .filter_map(|i| match i {
                ValidationIssue::MissingColumn(c) => Some(c.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            missing,
            vec!["Sender ID", "Receiver ID", "Group", "Plan", "Product"]
        );
    }

    #[test]
    fn test_row_issues_use_spreadsheet_lines() {
        let bad = complete()
            .with("Last Name", "  ")
            .with("Gender", "X")
            .with("Relationship Code", "01");
        let report = validate_records(&[complete(), bad]);
        let text = report.to_string();
        assert_eq!(report.len(), 3);
        assert!(text.contains("Row 3: Last Name is required"));
        assert!(text.contains("Row 3: Gender must be M/F/U"));
        assert!(text.contains("Row 3: Dependent rows require Subscriber Number"));
    }

    #[test]
    fn test_into_result_error() {
        let err = validate_records(&[Record::new().with("Gender", "F")])
            .into_result()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("Row 2: Member ID is required"));
    }
}
