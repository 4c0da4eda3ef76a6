// Upload template export (xlsx or csv): header row plus one sample student

use std::path::Path;

use placement_engine::template::{header_labels, sample_values};
use placement_engine::CellValue;
use rust_xlsxwriter::{Format, Workbook};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Xlsx,
    Csv,
}

impl TemplateFormat {
    /// Infer from the output path; anything that isn't `.csv` gets xlsx.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => TemplateFormat::Csv,
            _ => TemplateFormat::Xlsx,
        }
    }
}

pub fn write_template(path: &Path, format: TemplateFormat) -> Result<(), String> {
    match format {
        TemplateFormat::Xlsx => write_xlsx(path),
        TemplateFormat::Csv => write_csv(path),
    }
}

fn write_xlsx(path: &Path) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name("Students")
        .map_err(|e| format!("Failed to create sheet: {}", e))?;

    let bold = Format::new().set_bold();
    for (col, label) in header_labels().into_iter().enumerate() {
        let col = col as u16;
        worksheet
            .write_string_with_format(0, col, label, &bold)
            .map_err(|e| format!("Failed to write header: {}", e))?;
        worksheet
            .set_column_width(col, (label.len() as f64 + 4.0).max(14.0))
            .map_err(|e| format!("Failed to size column: {}", e))?;
    }

    for (col, value) in sample_values().into_iter().enumerate() {
        let col = col as u16;
        let written = match value {
            CellValue::Number(n) => worksheet.write_number(1, col, n),
            CellValue::Bool(b) => worksheet.write_boolean(1, col, b),
            CellValue::Text(s) => worksheet.write_string(1, col, &s),
            CellValue::Empty => continue,
        };
        written.map_err(|e| format!("Failed to write sample row: {}", e))?;
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))
}

fn write_csv(path: &Path) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;
    writer.write_record(header_labels()).map_err(|e| e.to_string())?;
    writer
        .write_record(sample_values().iter().map(CellValue::as_text))
        .map_err(|e| e.to_string())?;
    writer.flush().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(TemplateFormat::from_path(Path::new("t.csv")), TemplateFormat::Csv);
        assert_eq!(TemplateFormat::from_path(Path::new("t.CSV")), TemplateFormat::Csv);
        assert_eq!(TemplateFormat::from_path(Path::new("t.xlsx")), TemplateFormat::Xlsx);
        assert_eq!(TemplateFormat::from_path(Path::new("template")), TemplateFormat::Xlsx);
    }

    #[test]
    fn test_write_csv_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("template.csv");
        write_template(&path, TemplateFormat::Csv).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("First Name,Last Name,Email,Phone,Gender,Department,Batch,Roll Number,CGPA,Active Backlogs,10th %,12th %,Skills")
        );
        let sample = lines.next().unwrap();
        assert!(sample.starts_with("John,Doe,john.doe@example.com,9876543210,"));
        assert!(sample.ends_with("\"JavaScript, React, Node.js\""));
    }

    #[test]
    fn test_write_xlsx_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("student_upload_template.xlsx");
        write_template(&path, TemplateFormat::Xlsx).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 100);
    }
}
