use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// How a CGPA of exactly zero is read.
///
/// Older portal clients checked CGPA by truthiness, so a numeric 0 was
/// indistinguishable from an empty cell: it skipped the range rule and was
/// dropped from the record. `Absent` keeps that behavior; `Value` treats 0
/// as a real grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroCgpa {
    #[default]
    Absent,
    Value,
}

impl ZeroCgpa {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "absent" => Some(ZeroCgpa::Absent),
            "value" => Some(ZeroCgpa::Value),
            _ => None,
        }
    }
}

/// Knobs shared by validation and normalization of one upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportOptions {
    pub zero_cgpa: ZeroCgpa,
    /// Batch year used when a row has none.
    pub default_batch: i32,
}

impl ImportOptions {
    /// Options with the default batch set to the current calendar year.
    pub fn new() -> Self {
        Self {
            zero_cgpa: ZeroCgpa::default(),
            default_batch: chrono::Local::now().year(),
        }
    }

    pub fn with_zero_cgpa(mut self, zero_cgpa: ZeroCgpa) -> Self {
        self.zero_cgpa = zero_cgpa;
        self
    }

    pub fn with_default_batch(mut self, year: i32) -> Self {
        self.default_batch = year;
        self
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::new()
    }
}
