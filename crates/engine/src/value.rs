use once_cell::sync::Lazy;
use regex::Regex;

/// A single decoded spreadsheet cell.
///
/// Dates arrive as their serial number and error cells as their text form,
/// so four variants cover everything the decoders produce.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

/// Leading numeric prefix: sign, digits with optional fraction, optional exponent.
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("leading number pattern")
});

impl CellValue {
    /// True when the cell carries nothing usable. Whitespace-only text is blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            CellValue::Bool(_) => false,
        }
    }

    /// Text form of the cell, trimmed.
    ///
    /// Integer-valued numbers print without a fractional part so phone
    /// numbers and roll numbers typed as numbers survive (`9876543210`).
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    /// Permissive numeric reading: numeric cells as-is, text by its leading
    /// numeric prefix (`"8.5 CGPA"` reads as 8.5). Anything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => leading_number(s),
            _ => None,
        }
    }

    /// Integer reading, truncated toward zero. Values outside `i32` are `None`.
    pub fn as_int(&self) -> Option<i32> {
        let n = self.as_number()?.trunc();
        if n >= i32::MIN as f64 && n <= i32::MAX as f64 {
            Some(n as i32)
        } else {
            None
        }
    }
}

/// Parse the leading number of `s`, ignoring leading whitespace and any trailing text.
pub fn leading_number(s: &str) -> Option<f64> {
    let m = LEADING_NUMBER.find(s.trim_start())?;
    m.as_str().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}
