use std::path::{Path, PathBuf};

use pricegrid_engine::Sheet;
use pricegrid_io::{csv, xlsx};

use crate::CliError;

/// Import a document, picking the reader by extension: `.csv` goes through
/// the delimited reader, everything else through the Excel reader.
pub fn import_document(path: &Path, sheet_name: &str) -> Result<Sheet, CliError> {
    if is_csv(path) {
        csv::import(path).map_err(CliError::io)
    } else {
        xlsx::import_sheet(path, sheet_name).map_err(CliError::io)
    }
}

/// Export a document, picking the writer by extension.
pub fn export_document(sheet: &Sheet, path: &Path) -> Result<(), CliError> {
    if is_csv(path) {
        csv::export(sheet, path).map_err(CliError::io)
    } else {
        xlsx::export_sheet(sheet, path)
            .map(|_| ())
            .map_err(CliError::io)
    }
}

pub fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Artifact path for an updated document: the stem gains the configured
/// suffix and the extension becomes xlsx, next to the original.
pub fn derived_output_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    path.with_file_name(format!("{stem}{suffix}.xlsx"))
}
