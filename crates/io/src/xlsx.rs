// Excel roster decoding (xlsx, xls)
//
// Only the first worksheet is read. Cells keep their type: numbers stay
// numbers so "8.5" typed as a number and "8.5" typed as text normalize alike.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use placement_engine::{CellValue, RawRow};

use crate::table::rows_from_grid;
use crate::DecodeError;

/// Decode workbook bytes (xlsx or legacy xls; the container is sniffed, not trusted).
pub fn decode(bytes: Vec<u8>) -> Result<Vec<RawRow>, DecodeError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| DecodeError::Parse(format!("Failed to open Excel file: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| DecodeError::Parse("Excel file contains no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| DecodeError::Parse(format!("Failed to read sheet '{}': {}", first, e)))?;

    if sheet_names.len() > 1 {
        log::debug!("reading sheet '{}', ignoring {} other sheet(s)", first, sheet_names.len() - 1);
    }

    let grid = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect::<Vec<_>>());

    Ok(rows_from_grid(grid))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        // Serial number, as the portal has always received dates
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        // Excel's own spelling: #DIV/0!, #N/A, #REF!
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}
