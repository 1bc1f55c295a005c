//! Price reconciliation against a master sheet.
//!
//! Operates entirely in memory: callers load the target sheet, run
//! [`reconcile`], and save the result to a fresh artifact. Per-row
//! anomalies (identifier not found, sentinel rows, missing anchors,
//! missing legacy twins) are absorbed into the report, never raised.

use pricegrid_engine::{CellValue, Fill, Sheet};

use crate::extract::{normalize_identifier, RowFields, RowWindow, FIXED_MARKER};
use crate::legacy::LegacyRowIndex;
use crate::model::{
    AnchorOutcome, MatchedPair, PriceValue, RowOutcome, RowState, UpdateSummary,
};

/// Sentinel literal marking a product-block header row.
pub const PRODUCT_HEADER: &str = "Product";

/// Everything the reconciler needs to know about the target document.
#[derive(Debug, Clone, Copy)]
pub struct TargetLayout {
    pub fields: RowFields,
    /// Column holding the product-block header sentinel.
    pub header_column: u32,
    pub window: RowWindow,
}

/// Classify a price cell prior to mutation.
pub fn classify_row(cell: &CellValue) -> RowState {
    if cell.is_blank() {
        return RowState::Empty;
    }
    if cell.number() == Some(0.0) {
        return RowState::ZeroSentinel;
    }
    if let CellValue::Text(s) = cell {
        if s.contains(FIXED_MARKER) {
            return RowState::FixedMarker;
        }
    }
    RowState::Plain
}

/// Apply every matched pair to the target sheet. Updated rows (and the
/// anchor / legacy rows touched alongside fixed-marker updates) get a green
/// row fill; sentinel and unfound rows are left exactly as they were.
pub fn reconcile(
    pairs: &[MatchedPair],
    sheet: &mut Sheet,
    layout: &TargetLayout,
    legacy: &LegacyRowIndex,
) -> Vec<RowOutcome> {
    pairs
        .iter()
        .map(|pair| reconcile_pair(pair, sheet, layout, legacy))
        .collect()
}

fn reconcile_pair(
    pair: &MatchedPair,
    sheet: &mut Sheet,
    layout: &TargetLayout,
    legacy: &LegacyRowIndex,
) -> RowOutcome {
    let mut out = RowOutcome {
        identifier: pair.identifier.clone(),
        row: None,
        state: None,
        updated: false,
        legacy_row: None,
        block_anchor: None,
        header_anchor: None,
    };

    // First row in the window carrying the identifier wins; duplicates
    // beyond it are never looked at.
    let found = layout
        .window
        .rows()
        .find(|&row| {
            normalize_identifier(&sheet.text(row, layout.fields.identifier)) == pair.identifier
        });
    let Some(row) = found else {
        return out;
    };
    out.row = Some(row);

    let cell = sheet.value(row, layout.fields.price).clone();
    let state = classify_row(&cell);
    out.state = Some(state);

    // A raw-text new price has no numeric value to write; the row is
    // reported but never mutated.
    let Some(new_price) = pair.new_price.as_numeric() else {
        return out;
    };

    match state {
        // "We do not work with this product": mutation forbidden.
        RowState::Empty | RowState::ZeroSentinel => {}
        RowState::Plain => {
            let differs = match cell.number() {
                Some(old) => old != new_price,
                None => true,
            };
            if differs {
                sheet.set_value(row, layout.fields.price, CellValue::Number(new_price));
                sheet.set_row_fill(row, Fill::GREEN);
                out.updated = true;
            }
        }
        RowState::FixedMarker => {
            let old = marker_stripped_value(&cell);
            if old != Some(new_price) {
                sheet.set_value(
                    row,
                    layout.fields.price,
                    CellValue::Text(format!("{FIXED_MARKER}{new_price:.2}")),
                );
                sheet.set_row_fill(row, Fill::GREEN);
                out.updated = true;

                let block = walk_to_block_boundary(
                    sheet,
                    layout.fields.identifier,
                    row,
                    &pair.identifier,
                );
                out.block_anchor = Some(mark_anchor(sheet, block));
                let header = block
                    .and_then(|from| walk_to_header(sheet, layout.header_column, from));
                out.header_anchor = Some(mark_anchor(sheet, header));

                if let Some(legacy_row) = legacy.legacy_row(&pair.identifier) {
                    sheet.set_value(
                        legacy_row,
                        layout.fields.price,
                        CellValue::Number(new_price),
                    );
                    sheet.set_row_fill(legacy_row, Fill::GREEN);
                    out.legacy_row = Some(legacy_row);
                }
            }
        }
    }

    out
}

/// Numeric value of a fixed-marker cell with the marker removed.
fn marker_stripped_value(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Text(s) => s.replacen(FIXED_MARKER, "", 1).trim().parse().ok(),
        _ => cell.number(),
    }
}

/// Nearest row above `from_row` whose identifier cell differs from the
/// matched identifier, i.e. the edge of this product's row block. Stops
/// at row 1; `None` means the boundary never appeared.
fn walk_to_block_boundary(
    sheet: &Sheet,
    id_column: u32,
    from_row: u32,
    identifier: &str,
) -> Option<u32> {
    let mut row = from_row;
    while row > 1 {
        row -= 1;
        if normalize_identifier(&sheet.text(row, id_column)) != identifier {
            return Some(row);
        }
    }
    None
}

/// Nearest row at-or-above `from_row` whose header cell reads the
/// product-header sentinel. Stops at row 1.
fn walk_to_header(sheet: &Sheet, header_column: u32, from_row: u32) -> Option<u32> {
    let mut row = from_row;
    loop {
        if sheet.text(row, header_column).trim() == PRODUCT_HEADER {
            return Some(row);
        }
        if row == 1 {
            return None;
        }
        row -= 1;
    }
}

fn mark_anchor(sheet: &mut Sheet, row: Option<u32>) -> AnchorOutcome {
    match row {
        Some(row) => {
            sheet.set_row_fill(row, Fill::GREEN);
            AnchorOutcome::Marked(row)
        }
        None => AnchorOutcome::NotFound,
    }
}

/// Roll per-pair outcomes up into run counters. Record counts are filled
/// in by the pipeline.
pub fn summarize(rows: &[RowOutcome]) -> UpdateSummary {
    let mut summary = UpdateSummary {
        matched: rows.len(),
        ..UpdateSummary::default()
    };
    for row in rows {
        match (row.row, row.state) {
            (None, _) => summary.not_found += 1,
            (Some(_), Some(RowState::Empty | RowState::ZeroSentinel)) => {
                summary.skipped_sentinel += 1
            }
            (Some(_), _) => {
                if row.updated {
                    summary.updated += 1;
                } else {
                    summary.unchanged += 1;
                }
            }
        }
        if row.legacy_row.is_some() {
            summary.legacy_updates += 1;
        }
        if row.block_anchor == Some(AnchorOutcome::NotFound)
            || row.header_anchor == Some(AnchorOutcome::NotFound)
        {
            summary.anchors_missing += 1;
        }
    }
    summary
}
