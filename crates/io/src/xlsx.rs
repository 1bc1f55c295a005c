// Excel document import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import: one worksheet at a time, selected by name. Cell typing follows
// the source file, so text that looks numeric stays text until the
// reconciler classifies it.
// Export: values plus full-row highlights. Highlights are write-only;
// import does not read them back.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Color, Format, Workbook};

use pricegrid_engine::cell::CellValue;
use pricegrid_engine::sheet::Sheet;

// Limits for pathological workbooks
const MAX_CELLS: u64 = 5_000_000;
const MAX_ROWS: usize = 65_536;
const MAX_COLS: usize = 256;

/// Result of an Excel export operation
#[derive(Debug, Default)]
pub struct ExportStats {
    /// Value cells written
    pub cells_exported: usize,
    /// Rows written with a background fill
    pub filled_rows: usize,
}

impl ExportStats {
    pub fn summary(&self) -> String {
        format!(
            "{} cells, {} highlighted rows",
            self.cells_exported, self.filled_rows
        )
    }
}

/// Import a single worksheet from an Excel file.
///
/// The worksheet is selected by name; the error for a missing name lists
/// the names the file actually contains.
pub fn import_sheet(path: &Path, sheet_name: &str) -> Result<Sheet, String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;

    let available = workbook.sheet_names().to_vec();
    if !available.iter().any(|n| n == sheet_name) {
        return Err(format!(
            "Worksheet '{}' not found in {} (available: {})",
            sheet_name,
            path.display(),
            available.join(", ")
        ));
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| format!("Failed to read worksheet '{}': {}", sheet_name, e))?;

    let (height, width) = range.get_size();
    if height > MAX_ROWS {
        return Err(format!(
            "Worksheet '{}' has {} rows (limit {})",
            sheet_name, height, MAX_ROWS
        ));
    }
    if width > MAX_COLS {
        return Err(format!(
            "Worksheet '{}' has {} columns (limit {})",
            sheet_name, width, MAX_COLS
        ));
    }
    if (height as u64) * (width as u64) > MAX_CELLS {
        return Err(format!(
            "Worksheet '{}' exceeds {} cells",
            sheet_name, MAX_CELLS
        ));
    }

    let mut sheet = Sheet::new(sheet_name);
    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));

    for (r, row) in range.rows().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            // calamine positions are 0-based; Sheet addressing is 1-based
            let row_ix = row_offset + r as u32 + 1;
            let col_ix = col_offset + c as u32 + 1;
            let value = match cell {
                Data::Empty => continue,
                Data::String(s) => {
                    if s.is_empty() {
                        continue;
                    }
                    CellValue::Text(s.clone())
                }
                Data::Float(f) => CellValue::Number(*f),
                Data::Int(i) => CellValue::Number(*i as f64),
                Data::Bool(b) => {
                    CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string())
                }
                Data::Error(e) => CellValue::Text(format!("#{:?}", e)),
                Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
                Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            };
            sheet.set_value(row_ix, col_ix, value);
        }
    }

    Ok(sheet)
}

/// Export a [`Sheet`] to an xlsx file.
///
/// Rows carrying a fill are written in full, one formatted cell per column
/// up to the sheet extent, so the highlight spans the whole row. Unfilled
/// rows write only their populated cells.
pub fn export_sheet(sheet: &Sheet, path: &Path) -> Result<ExportStats, String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(&sheet.name)
        .map_err(|e| format!("Failed to name worksheet: {}", e))?;

    let plain = Format::new();
    let mut stats = ExportStats::default();

    for row in 1..=sheet.rows {
        let fill = sheet.row_fill(row);
        let format = match fill {
            Some(f) => Format::new().set_background_color(Color::RGB(f.rgb())),
            None => plain.clone(),
        };
        if fill.is_some() {
            stats.filled_rows += 1;
        }

        for col in 1..=sheet.cols {
            // rust_xlsxwriter addressing is 0-based
            let r = row - 1;
            let c = (col - 1) as u16;
            match sheet.value(row, col) {
                CellValue::Empty => {
                    // A blank cell still carries the row highlight
                    if fill.is_some() {
                        worksheet
                            .write_blank(r, c, &format)
                            .map_err(|e| e.to_string())?;
                    }
                }
                CellValue::Text(s) => {
                    worksheet
                        .write_string_with_format(r, c, s, &format)
                        .map_err(|e| e.to_string())?;
                    stats.cells_exported += 1;
                }
                CellValue::Number(n) => {
                    worksheet
                        .write_number_with_format(r, c, *n, &format)
                        .map_err(|e| e.to_string())?;
                    stats.cells_exported += 1;
                }
            }
        }
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save {}: {}", path.display(), e))?;

    Ok(stats)
}
