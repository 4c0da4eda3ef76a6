// Roster file I/O: decode uploads, write templates

pub mod csv;
pub mod table;
pub mod template;
pub mod xlsx;

use std::path::Path;

use placement_engine::{Field, RawRow};

/// Spreadsheet formats accepted for upload, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Xlsx,
    Xls,
    Csv,
}

impl SourceFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, DecodeError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" => Ok(SourceFormat::Xlsx),
            "xls" => Ok(SourceFormat::Xls),
            "csv" => Ok(SourceFormat::Csv),
            _ => Err(DecodeError::UnsupportedFormat(ext)),
        }
    }
}

/// Why an upload could not be turned into rows. No partial results are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Extension is not .xlsx, .xls or .csv
    UnsupportedFormat(String),
    /// File could not be read
    Io(String),
    /// Bytes are not a readable workbook or table
    Parse(String),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::UnsupportedFormat(ext) if ext.is_empty() => {
                write!(f, "file has no extension (expected .xlsx, .xls or .csv)")
            }
            DecodeError::UnsupportedFormat(ext) => {
                write!(f, "unsupported file type '.{}' (expected .xlsx, .xls or .csv)", ext)
            }
            DecodeError::Io(msg) => write!(f, "I/O error: {}", msg),
            DecodeError::Parse(msg) => write!(f, "Error parsing file: {}", msg),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode an upload from disk. The extension is checked before any bytes are read.
pub fn decode_file(path: &Path) -> Result<Vec<RawRow>, DecodeError> {
    let format = SourceFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|e| DecodeError::Io(e.to_string()))?;
    let rows = decode_bytes(bytes, format)?;
    log::debug!("decoded {} row(s) from {}", rows.len(), path.display());
    let unknown = unknown_headers(&rows);
    if !unknown.is_empty() {
        log::warn!("{}: ignoring unrecognized column(s): {}", path.display(), unknown.join(", "));
    }
    Ok(rows)
}

/// Headers that match no upload field, in first-seen order.
pub fn unknown_headers(rows: &[RawRow]) -> Vec<String> {
    let mut unknown: Vec<String> = Vec::new();
    for header in rows.iter().flat_map(RawRow::headers) {
        if Field::from_header(header).is_none() && !unknown.iter().any(|h| h == header) {
            unknown.push(header.to_string());
        }
    }
    unknown
}

/// Decode an upload already held in memory.
pub fn decode_bytes(bytes: Vec<u8>, format: SourceFormat) -> Result<Vec<RawRow>, DecodeError> {
    match format {
        SourceFormat::Xlsx | SourceFormat::Xls => crate::xlsx::decode(bytes),
        SourceFormat::Csv => crate::csv::decode(&bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SourceFormat::from_path(Path::new("a.xlsx")), Ok(SourceFormat::Xlsx));
        assert_eq!(SourceFormat::from_path(Path::new("a.XLS")), Ok(SourceFormat::Xls));
        assert_eq!(SourceFormat::from_path(Path::new("dir/roster.Csv")), Ok(SourceFormat::Csv));
        assert_eq!(
            SourceFormat::from_path(Path::new("roster.ods")),
            Err(DecodeError::UnsupportedFormat("ods".into()))
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("roster")),
            Err(DecodeError::UnsupportedFormat(String::new()))
        );
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = DecodeError::UnsupportedFormat("txt".into());
        assert_eq!(err.to_string(), "unsupported file type '.txt' (expected .xlsx, .xls or .csv)");
    }

    #[test]
    fn test_unknown_headers() {
        let rows = decode_bytes(
            b"First Name,Notes,email,Hostel\nAnn,late joiner,a@x.com,B\nBo,,b@x.com,C\n".to_vec(),
            SourceFormat::Csv,
        )
        .unwrap();
        assert_eq!(unknown_headers(&rows), vec!["Notes", "Hostel"]);

        let rows = decode_bytes(b"firstName,Roll Number\nAnn,CS1\n".to_vec(), SourceFormat::Csv).unwrap();
        assert!(unknown_headers(&rows).is_empty());
    }

    #[test]
    fn test_decode_file_rejects_extension_before_reading() {
        // Path does not exist; the extension check must fail first.
        let err = decode_file(Path::new("/nonexistent/roster.pdf")).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat(_)));

        let err = decode_file(Path::new("/nonexistent/roster.csv")).unwrap_err();
        assert!(matches!(err, DecodeError::Io(_)));
    }
}
