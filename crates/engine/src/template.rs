//! Contents of the downloadable upload template.
//!
//! The file writers live in `placement-io`; this module only fixes what goes
//! in them so the sample row can be checked against the validator.

use crate::field::Field;
use crate::row::RawRow;
use crate::value::CellValue;

pub const TEMPLATE_FILE_NAME: &str = "student_upload_template.xlsx";

/// Template columns, in order.
pub const HEADERS: [Field; 13] = [
    Field::FirstName,
    Field::LastName,
    Field::Email,
    Field::Phone,
    Field::Gender,
    Field::Department,
    Field::Batch,
    Field::RollNumber,
    Field::Cgpa,
    Field::ActiveBacklogs,
    Field::TenthPercentage,
    Field::TwelfthPercentage,
    Field::Skills,
];

/// Header labels, in column order.
pub fn header_labels() -> Vec<&'static str> {
    HEADERS.iter().map(|f| f.label()).collect()
}

/// Example cells, one per header.
pub fn sample_values() -> Vec<CellValue> {
    vec![
        CellValue::from("John"),
        CellValue::from("Doe"),
        CellValue::from("john.doe@example.com"),
        CellValue::from("9876543210"),
        CellValue::from("Male"),
        CellValue::from("Computer Science"),
        CellValue::Number(2025.0),
        CellValue::from("CS2021001"),
        CellValue::Number(8.5),
        CellValue::Number(0.0),
        CellValue::Number(85.5),
        CellValue::Number(90.2),
        CellValue::from("JavaScript, React, Node.js"),
    ]
}

/// The sample line as a row, as the decoder would return it.
pub fn sample_row() -> RawRow {
    header_labels().into_iter().zip(sample_values()).collect()
}
