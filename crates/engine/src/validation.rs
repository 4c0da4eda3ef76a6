//! Row validation for student uploads.
//!
//! Rules live in one ordered table. Every rule runs against every row (no
//! short-circuit), and the messages come back in table order, so the output
//! for a row is stable and matches what the portal UI has always shown.
//!
//! Conditional rules (email format, CGPA range) only fire when their field
//! is present. "Present" follows `RawRow::lookup`: any alias with a
//! non-blank value.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::field::Field;
use crate::options::ZeroCgpa;
use crate::row::RawRow;
use crate::value::CellValue;

/// Rows start at spreadsheet line 2: one header line, then 1-based numbering.
pub const FIRST_DATA_LINE: usize = 2;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

// ============================================================================
// Rule table
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Check {
    /// Field must be present.
    Required,
    /// If present, must look like `local@domain.tld`.
    Email,
    /// If present and numeric, must lie within `[min, max]` inclusive.
    Between { min: f64, max: f64 },
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    field: Field,
    check: Check,
    message: &'static str,
}

const RULES: &[Rule] = &[
    Rule { field: Field::FirstName, check: Check::Required, message: "First Name is required" },
    Rule { field: Field::Email, check: Check::Required, message: "Email is required" },
    Rule { field: Field::Department, check: Check::Required, message: "Department is required" },
    Rule { field: Field::RollNumber, check: Check::Required, message: "Roll Number is required" },
    Rule { field: Field::Email, check: Check::Email, message: "Invalid email format" },
    Rule {
        field: Field::Cgpa,
        check: Check::Between { min: 0.0, max: 10.0 },
        message: "CGPA must be between 0 and 10",
    },
];

impl Rule {
    fn passes(&self, row: &RawRow, zero_cgpa: ZeroCgpa) -> bool {
        let value = resolve(row, self.field, zero_cgpa);
        match self.check {
            Check::Required => value.is_some(),
            Check::Email => value.map_or(true, is_email),
            Check::Between { min, max } => match value.and_then(CellValue::as_number) {
                Some(n) => n >= min && n <= max,
                None => true,
            },
        }
    }
}

/// Text cells are matched as typed; surrounding spaces fail the pattern.
fn is_email(value: &CellValue) -> bool {
    match value {
        CellValue::Text(s) => EMAIL_PATTERN.is_match(s),
        other => EMAIL_PATTERN.is_match(&other.as_text()),
    }
}

/// Field lookup with the CGPA-zero reading applied.
pub(crate) fn resolve(row: &RawRow, field: Field, zero_cgpa: ZeroCgpa) -> Option<&CellValue> {
    let value = row.lookup(field)?;
    if field == Field::Cgpa && zero_cgpa == ZeroCgpa::Absent && value.as_number() == Some(0.0) {
        return None;
    }
    Some(value)
}

// ============================================================================
// Results
// ============================================================================

/// Problems found in one uploaded row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Spreadsheet line number (header is line 1).
    pub row: usize,
    /// Messages in rule order.
    pub errors: Vec<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.errors.join(", "))
    }
}

/// Check one row. An empty list means the row is valid.
pub fn validate_row(row: &RawRow, zero_cgpa: ZeroCgpa) -> Vec<String> {
    RULES
        .iter()
        .filter(|rule| !rule.passes(row, zero_cgpa))
        .map(|rule| rule.message.to_string())
        .collect()
}

/// Check every row; only failing rows are reported.
pub fn validate_rows(rows: &[RawRow], zero_cgpa: ZeroCgpa) -> Vec<ValidationError> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let errors = validate_row(row, zero_cgpa);
            if errors.is_empty() {
                None
            } else {
                Some(ValidationError { row: index + FIRST_DATA_LINE, errors })
            }
        })
        .collect()
}
