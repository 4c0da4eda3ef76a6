// CSV roster decoding

use placement_engine::{CellValue, RawRow};

use crate::table::rows_from_grid;
use crate::DecodeError;

/// Decode CSV bytes into rows. Every cell is kept as text; the normalizer
/// does the numeric reading.
pub fn decode(bytes: &[u8]) -> Result<Vec<RawRow>, DecodeError> {
    let content = bytes_to_utf8(bytes);
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let delimiter = sniff_delimiter(content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid: Vec<Vec<CellValue>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| DecodeError::Parse(e.to_string()))?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(rows_from_grid(grid))
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        // Header line must split into >1 field
        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // Lines agreeing with the header's field count, weighted by that count
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// UTF-8 if valid, otherwise Windows-1252 (what Excel writes for "CSV" on Windows).
fn bytes_to_utf8(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            log::warn!("upload is not valid UTF-8; decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_semicolon_delimiter() {
        let content = "First Name;Email;CGPA\nAnn;ann@x.com;8\nBob;bob@x.com;7\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_sniff_comma_delimiter() {
        let content = "First Name,Email,CGPA\nAnn,ann@x.com,8\n";
        assert_eq!(sniff_delimiter(content), b',');
    }

    #[test]
    fn test_sniff_tab_delimiter() {
        let content = "First Name\tEmail\nAnn\tann@x.com\n";
        assert_eq!(sniff_delimiter(content), b'\t');
    }

    #[test]
    fn test_sniff_semicolon_with_commas_in_values() {
        // Skills column holds comma lists inside quotes
        let content = "First Name;Skills;Email\nAnn;\"Java, SQL\";ann@x.com\nBob;\"C, Go\";bob@x.com\n";
        assert_eq!(sniff_delimiter(content), b';');
    }

    #[test]
    fn test_decode_basic() {
        let csv = b"First Name,Email,Skills\nAnn,ann@x.com,\"Java, SQL\"\n";
        let rows = decode(csv).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Skills"), Some(&CellValue::from("Java, SQL")));
    }

    #[test]
    fn test_decode_ragged_rows() {
        let csv = b"First Name,Email,CGPA\nAnn\nBob,bob@x.com,7.5,extra\n";
        let rows = decode(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[1].get("CGPA"), Some(&CellValue::from("7.5")));
    }

    #[test]
    fn test_decode_strips_bom() {
        let csv = "\u{feff}First Name,Email\nAnn,ann@x.com\n";
        let rows = decode(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].get("First Name"), Some(&CellValue::from("Ann")));
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // "José" with é as 0xE9 (Windows-1252), not valid UTF-8
        let mut bytes = b"First Name,Email\nJos".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b",jose@x.com\n");
        let rows = decode(&bytes).unwrap();
        assert_eq!(rows[0].get("First Name"), Some(&CellValue::from("José")));
    }

    #[test]
    fn test_decode_crlf_and_blank_lines() {
        let csv = b"First Name,Email\r\n\r\nAnn,ann@x.com\r\n,\r\n";
        let rows = decode(csv).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode(b"").unwrap().is_empty());
    }
}
