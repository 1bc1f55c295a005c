use pricegrid_engine::{CellValue, Sheet};

use crate::error::ReconError;
use crate::model::{PriceValue, Record};

/// Textual tag carried by pinned price cells.
pub const FIXED_MARKER: &str = "[FIXED]";

/// Column positions for one document, resolved once from the job config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFields {
    pub identifier: u32,
    pub price: u32,
}

/// Inclusive 1-based row window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub start: u32,
    pub end: u32,
}

impl RowWindow {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn validate(&self, sheet: &Sheet) -> Result<(), ReconError> {
        if self.start < 1 || self.start > self.end {
            return Err(ReconError::InvalidWindow {
                start: self.start,
                end: self.end,
            });
        }
        if self.end > sheet.rows {
            return Err(ReconError::WindowOutOfBounds {
                start: self.start,
                end: self.end,
                rows: sheet.rows,
            });
        }
        Ok(())
    }

    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// Resolve a column letter ("A", "D", "AA") to its 1-based index.
pub fn column_index(letter: &str) -> Result<u32, ReconError> {
    let trimmed = letter.trim();
    if trimmed.is_empty() {
        return Err(ReconError::InvalidColumn(letter.to_string()));
    }
    let mut index: u32 = 0;
    for c in trimmed.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(ReconError::InvalidColumn(letter.to_string()));
        }
        index = index * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        // XFD is the last column a spreadsheet can address
        if index > 16384 {
            return Err(ReconError::InvalidColumn(letter.to_string()));
        }
    }
    Ok(index)
}

/// Join-key normalization applied everywhere identifiers are read.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Round to 2 decimal places, biased +0.0001 first: text like "19.995"
/// parses to 19.9949…, which must land on 20.0 rather than truncate.
pub fn round_price(value: f64) -> f64 {
    ((value + 0.0001) * 100.0).round() / 100.0
}

/// Pull normalized (identifier, price) records from a window of `sheet`.
/// Rows with a blank identifier cell are skipped. Price cells that fail
/// numeric parsing keep their original text (`PriceValue::Raw`).
pub fn extract(
    sheet: &Sheet,
    fields: &RowFields,
    window: RowWindow,
) -> Result<Vec<Record>, ReconError> {
    window.validate(sheet)?;

    let mut records = Vec::new();
    for row in window.rows() {
        let identifier = normalize_identifier(&sheet.text(row, fields.identifier));
        if identifier.is_empty() {
            continue;
        }
        let price = extract_price(sheet.value(row, fields.price));
        records.push(Record { identifier, price });
    }
    Ok(records)
}

fn extract_price(cell: &CellValue) -> PriceValue {
    match cell {
        CellValue::Number(n) => PriceValue::Numeric(round_price(*n)),
        CellValue::Empty => PriceValue::Raw(String::new()),
        CellValue::Text(s) => {
            let stripped = s.replacen(FIXED_MARKER, "", 1);
            match stripped.trim().parse::<f64>() {
                Ok(n) => PriceValue::Numeric(round_price(n)),
                // Original text preserved, marker included if present.
                Err(_) => PriceValue::Raw(s.clone()),
            }
        }
    }
}
