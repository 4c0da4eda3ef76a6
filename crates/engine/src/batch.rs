use serde::Serialize;

use crate::normalize::{normalize_rows, NormalizedStudent};
use crate::options::ImportOptions;
use crate::row::RawRow;
use crate::validation::{validate_rows, ValidationError};

/// A decoded upload after both passes: one record per row plus the rows that failed.
///
/// Validation and normalization run independently, so `students` always has
/// one entry per input row, including the invalid ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UploadBatch {
    pub students: Vec<NormalizedStudent>,
    pub errors: Vec<ValidationError>,
}

impl UploadBatch {
    pub fn from_rows(rows: &[RawRow], options: &ImportOptions) -> Self {
        let errors = validate_rows(rows, options.zero_cgpa);
        let students = normalize_rows(rows, options);
        log::debug!(
            "prepared {} student record(s), {} row(s) with validation errors",
            students.len(),
            errors.len()
        );
        Self { students, errors }
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Number of rows that failed at least one rule.
    pub fn invalid_rows(&self) -> usize {
        self.errors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(first: &str, email: &str, roll: &str) -> RawRow {
        let mut row = RawRow::new();
        row.insert("First Name", first);
        row.insert("Email", email);
        row.insert("Department", "CS");
        row.insert("Roll Number", roll);
        row
    }

    #[test]
    fn test_invalid_rows_still_normalized() {
        let rows = vec![row("Ann", "ann@x.com", "CS1"), row("", "bad", "CS2")];
        let batch = UploadBatch::from_rows(&rows, &ImportOptions::new());
        assert_eq!(batch.len(), 2);
        assert!(batch.has_errors());
        assert_eq!(batch.invalid_rows(), 1);
        assert_eq!(batch.errors[0].row, 3);
        assert_eq!(batch.students[1].roll_number, "CS2");
    }

    #[test]
    fn test_empty_upload() {
        let batch = UploadBatch::from_rows(&[], &ImportOptions::new());
        assert!(batch.is_empty());
        assert!(!batch.has_errors());
    }
}
