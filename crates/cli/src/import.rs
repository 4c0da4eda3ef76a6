//! Local roster commands: `placement validate` and `placement normalize`.
//!
//! Neither touches the network. Both share the same decode step as
//! `placement upload`, so a file that validates here decodes identically there.

use std::path::{Path, PathBuf};

use placement_config::Settings;
use placement_engine::{normalize_rows, validate_rows, ImportOptions, RawRow, ValidationError, ZeroCgpa};
use serde::Serialize;

use crate::exit_codes::{decode_error, EXIT_VALIDATION};
use crate::CliError;

/// Decode a roster file, mapping failures onto the exit-code registry.
pub fn load_rows(file: &Path) -> Result<Vec<RawRow>, CliError> {
    let rows = placement_io::decode_file(file).map_err(decode_error)?;
    log::info!("{}: {} data row(s)", file.display(), rows.len());
    Ok(rows)
}

/// Settings-derived options with command-line overrides applied.
pub fn import_options(zero_cgpa: Option<ZeroCgpa>, batch_year: Option<i32>) -> ImportOptions {
    let mut options = Settings::load().import_options();
    if let Some(policy) = zero_cgpa {
        options = options.with_zero_cgpa(policy);
    }
    if let Some(year) = batch_year {
        options = options.with_default_batch(year);
    }
    options
}

/// Print one line per failing row: `Row 5: First Name is required, Invalid email format`.
pub fn print_validation_errors(errors: &[ValidationError]) {
    for error in errors {
        eprintln!("  {}", error);
    }
}

// ── validate ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ValidateReport<'a> {
    file: String,
    rows: usize,
    valid: usize,
    invalid: usize,
    errors: &'a [ValidationError],
}

pub fn cmd_validate(file: PathBuf, json: bool, zero_cgpa: Option<ZeroCgpa>) -> Result<(), CliError> {
    let rows = load_rows(&file)?;
    let options = import_options(zero_cgpa, None);
    let errors = validate_rows(&rows, options.zero_cgpa);

    if json {
        let report = ValidateReport {
            file: file.display().to_string(),
            rows: rows.len(),
            valid: rows.len() - errors.len(),
            invalid: errors.len(),
            errors: &errors,
        };
        let out = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::io(e.to_string()))?;
        println!("{}", out);
    } else {
        for error in &errors {
            println!("{}", error);
        }
        eprintln!(
            "{}: {} row(s), {} with validation errors",
            file.display(),
            rows.len(),
            errors.len()
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CliError::silent(EXIT_VALIDATION))
    }
}

// ── normalize ───────────────────────────────────────────────────────

pub fn cmd_normalize(
    file: PathBuf,
    output: Option<PathBuf>,
    zero_cgpa: Option<ZeroCgpa>,
    batch_year: Option<i32>,
) -> Result<(), CliError> {
    let rows = load_rows(&file)?;
    let options = import_options(zero_cgpa, batch_year);
    let students = normalize_rows(&rows, &options);

    let json = serde_json::to_string_pretty(&students)
        .map_err(|e| CliError::io(e.to_string()))?;

    match output {
        Some(path) => {
            std::fs::write(&path, format!("{}\n", json))
                .map_err(|e| CliError::io(format!("Cannot write {}: {}", path.display(), e)))?;
            eprintln!("Wrote {} record(s) to {}", students.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
