//! Mapping raw rows onto the canonical student record.
//!
//! Normalization never fails. Whatever a row is missing falls back to an
//! empty string, zero, the default batch year, or an absent optional;
//! flagging unusable rows is the validator's job.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::options::ImportOptions;
use crate::row::RawRow;
use crate::validation::resolve;
use crate::value::CellValue;

/// The record shape the portal's bulk endpoint accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedStudent {
    pub name: StudentName,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub department: String,
    pub batch: i32,
    pub roll_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cgpa: Option<f64>,
    pub backlogs: Backlogs,
    pub skills: Vec<String>,
    pub education: Education,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentName {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backlogs {
    pub active: i32,
    pub history: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub tenth: Score,
    pub twelfth: Score,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

impl StudentName {
    /// "First Last", or whichever half exists.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim()).trim().to_string()
    }
}

/// Build the canonical record for one row.
pub fn normalize_row(row: &RawRow, options: &ImportOptions) -> NormalizedStudent {
    let text = |field: Field| row.lookup(field).map(CellValue::as_text).unwrap_or_default();
    let number = |field: Field| row.lookup(field).and_then(CellValue::as_number);
    let int = |field: Field| row.lookup(field).and_then(CellValue::as_int);

    NormalizedStudent {
        name: StudentName {
            first_name: text(Field::FirstName),
            last_name: text(Field::LastName),
        },
        email: text(Field::Email),
        phone: text(Field::Phone),
        gender: text(Field::Gender).to_lowercase(),
        department: text(Field::Department),
        // A zero batch is as good as none.
        batch: int(Field::Batch)
            .filter(|&year| year != 0)
            .unwrap_or(options.default_batch),
        roll_number: text(Field::RollNumber),
        cgpa: resolve(row, Field::Cgpa, options.zero_cgpa).and_then(CellValue::as_number),
        backlogs: Backlogs {
            active: int(Field::ActiveBacklogs).unwrap_or(0),
            history: int(Field::BacklogHistory).unwrap_or(0),
        },
        skills: split_skills(&text(Field::Skills)),
        education: Education {
            tenth: Score { percentage: number(Field::TenthPercentage) },
            twelfth: Score { percentage: number(Field::TwelfthPercentage) },
        },
    }
}

/// One record per row, same order.
pub fn normalize_rows(rows: &[RawRow], options: &ImportOptions) -> Vec<NormalizedStudent> {
    rows.iter().map(|row| normalize_row(row, options)).collect()
}

/// Comma-separated skills: trimmed, blanks dropped, order and case kept.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
