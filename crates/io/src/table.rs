//! Turning a decoded grid of cells into header-keyed rows.
//!
//! Both decoders produce a plain grid; this is where the header row is
//! picked and every data row is keyed by it.

use placement_engine::{CellValue, RawRow};

/// Build rows from a grid whose first non-blank line is the header row.
///
/// - header labels are trimmed; blank headers drop their column
/// - repeated headers get `_1`, `_2`, ... suffixes so no cell is lost
/// - blank cells become absent keys; cells past the header width are ignored
/// - lines with no populated cell are skipped
pub fn rows_from_grid<I>(grid: I) -> Vec<RawRow>
where
    I: IntoIterator<Item = Vec<CellValue>>,
{
    let mut lines = grid.into_iter();

    let header_line = match lines.by_ref().find(|line| line.iter().any(|c| !c.is_blank())) {
        Some(line) => line,
        None => return Vec::new(),
    };
    let headers = header_labels(&header_line);

    lines
        .filter_map(|line| {
            let row: RawRow = line
                .into_iter()
                .zip(headers.iter())
                .filter_map(|(cell, header)| match header {
                    Some(h) if !cell.is_blank() => Some((h.clone(), cell)),
                    _ => None,
                })
                .collect();
            if row.is_empty() {
                None
            } else {
                Some(row)
            }
        })
        .collect()
}

fn header_labels(line: &[CellValue]) -> Vec<Option<String>> {
    let mut seen: Vec<String> = Vec::new();
    line.iter()
        .map(|cell| {
            let label = cell.as_text();
            if label.is_empty() {
                return None;
            }
            let mut unique = label.clone();
            let mut n = 0;
            while seen.contains(&unique) {
                n += 1;
                unique = format!("{}_{}", label, n);
            }
            seen.push(unique.clone());
            Some(unique)
        })
        .collect()
}
