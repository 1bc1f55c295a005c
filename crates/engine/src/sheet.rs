use rustc_hash::FxHashMap;

use super::cell::{CellValue, Fill};

/// A single worksheet: sparse cell storage keyed by (row, col).
///
/// Rows and columns are 1-based, matching spreadsheet conventions; (1, 1)
/// is the top-left cell. `rows`/`cols` track the populated extent.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    cells: FxHashMap<(u32, u32), CellValue>,
    row_fills: FxHashMap<u32, Fill>,
    pub rows: u32,
    pub cols: u32,
}

impl Sheet {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: FxHashMap::default(),
            row_fills: FxHashMap::default(),
            rows: 0,
            cols: 0,
        }
    }

    pub fn set_value(&mut self, row: u32, col: u32, value: CellValue) {
        debug_assert!(row >= 1 && col >= 1, "cell coordinates are 1-based");
        if matches!(value, CellValue::Empty) {
            self.cells.remove(&(row, col));
        } else {
            self.cells.insert((row, col), value);
        }
        self.rows = self.rows.max(row);
        self.cols = self.cols.max(col);
    }

    /// Parse-and-set convenience for raw textual input.
    pub fn set_input(&mut self, row: u32, col: u32, input: &str) {
        self.set_value(row, col, CellValue::from_input(input));
    }

    pub fn value(&self, row: u32, col: u32) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(&(row, col)).unwrap_or(&EMPTY)
    }

    pub fn text(&self, row: u32, col: u32) -> String {
        self.value(row, col).raw_display()
    }

    pub fn number(&self, row: u32, col: u32) -> Option<f64> {
        self.value(row, col).number()
    }

    pub fn is_blank(&self, row: u32, col: u32) -> bool {
        self.value(row, col).is_blank()
    }

    pub fn set_row_fill(&mut self, row: u32, fill: Fill) {
        self.row_fills.insert(row, fill);
    }

    pub fn row_fill(&self, row: u32) -> Option<Fill> {
        self.row_fills.get(&row).copied()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = ((u32, u32), &CellValue)> {
        self.cells.iter().map(|(&pos, v)| (pos, v))
    }

    pub fn iter_row_fills(&self) -> impl Iterator<Item = (u32, Fill)> + '_ {
        self.row_fills.iter().map(|(&row, &fill)| (row, fill))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut sheet = Sheet::new("info");
        sheet.set_input(2, 1, "SKU1");
        sheet.set_input(2, 4, "19.99");

        assert_eq!(sheet.text(2, 1), "SKU1");
        assert_eq!(sheet.number(2, 4), Some(19.99));
        assert_eq!(sheet.value(3, 1), &CellValue::Empty);
    }

    #[test]
    fn test_extent_tracks_populated_cells() {
        let mut sheet = Sheet::new("info");
        assert_eq!(sheet.rows, 0);
        sheet.set_input(5, 2, "x");
        assert_eq!(sheet.rows, 5);
        assert_eq!(sheet.cols, 2);
        sheet.set_input(3, 7, "y");
        assert_eq!(sheet.rows, 5);
        assert_eq!(sheet.cols, 7);
    }

    #[test]
    fn test_blank_cells() {
        let mut sheet = Sheet::new("info");
        sheet.set_input(2, 1, "   ");
        assert!(sheet.is_blank(2, 1));
        assert!(sheet.is_blank(9, 9));
        sheet.set_input(2, 1, "0");
        assert!(!sheet.is_blank(2, 1));
    }

    #[test]
    fn test_row_fills() {
        let mut sheet = Sheet::new("info");
        sheet.set_row_fill(4, Fill::GREEN);
        sheet.set_row_fill(5, Fill::YELLOW);
        assert_eq!(sheet.row_fill(4), Some(Fill::GREEN));
        assert_eq!(sheet.row_fill(5), Some(Fill::YELLOW));
        assert_eq!(sheet.row_fill(6), None);
        // Re-marking a row replaces the fill.
        sheet.set_row_fill(5, Fill::GREEN);
        assert_eq!(sheet.row_fill(5), Some(Fill::GREEN));
    }
}
