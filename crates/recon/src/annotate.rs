use pricegrid_engine::{Fill, Sheet};

use crate::extract::{normalize_identifier, RowWindow};
use crate::model::RowStatus;

/// Fill for a row status: matched and updated rows go green, unmatched
/// rows yellow.
pub fn fill_for(status: RowStatus) -> Fill {
    match status {
        RowStatus::Matched | RowStatus::Updated => Fill::GREEN,
        RowStatus::Unmatched => Fill::YELLOW,
    }
}

/// Highlight every row in the window according to `status_of` its
/// identifier. Cosmetic only: cell values are never touched. Rows with a
/// blank identifier, or for which `status_of` returns None, are skipped.
pub fn annotate_rows(
    sheet: &mut Sheet,
    id_column: u32,
    window: RowWindow,
    status_of: impl Fn(&str) -> Option<RowStatus>,
) {
    for row in window.rows() {
        let identifier = normalize_identifier(&sheet.text(row, id_column));
        if identifier.is_empty() {
            continue;
        }
        if let Some(status) = status_of(&identifier) {
            sheet.set_row_fill(row, fill_for(status));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_annotate_by_membership() {
        let mut sheet = Sheet::new("info");
        sheet.set_input(2, 1, "SKU1");
        sheet.set_input(3, 1, "SKU2");
        sheet.set_input(4, 1, "SKU3");

        let matched: HashSet<&str> = ["SKU1", "SKU3"].into_iter().collect();
        annotate_rows(&mut sheet, 1, RowWindow::new(2, 4), |id| {
            Some(if matched.contains(id) {
                RowStatus::Matched
            } else {
                RowStatus::Unmatched
            })
        });

        assert_eq!(sheet.row_fill(2), Some(Fill::GREEN));
        assert_eq!(sheet.row_fill(3), Some(Fill::YELLOW));
        assert_eq!(sheet.row_fill(4), Some(Fill::GREEN));
    }

    #[test]
    fn test_annotate_skips_blank_and_none_rows() {
        let mut sheet = Sheet::new("info");
        sheet.set_input(2, 1, "SKU1");
        sheet.set_input(3, 1, " ");
        sheet.set_input(4, 1, "SKU2");

        annotate_rows(&mut sheet, 1, RowWindow::new(2, 4), |id| {
            (id == "SKU2").then_some(RowStatus::Updated)
        });

        assert_eq!(sheet.row_fill(2), None);
        assert_eq!(sheet.row_fill(3), None);
        assert_eq!(sheet.row_fill(4), Some(Fill::GREEN));
    }

    #[test]
    fn test_fill_mapping() {
        assert_eq!(fill_for(RowStatus::Matched), Fill::GREEN);
        assert_eq!(fill_for(RowStatus::Updated), Fill::GREEN);
        assert_eq!(fill_for(RowStatus::Unmatched), Fill::YELLOW);
    }
}
