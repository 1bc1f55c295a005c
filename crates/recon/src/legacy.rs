use std::collections::HashMap;

use pricegrid_engine::Sheet;

/// Suffix carried by legacy-layout rows in the identifier column.
pub const LEGACY_SUFFIX: &str = "-OLD";

/// End row of the legacy region for sites whose master sheets still carry
/// one. Sites not listed here have no legacy rows; callers treat the
/// `None` as "legacy handling disabled".
pub fn legacy_bound(site: &str) -> Option<u32> {
    match site.to_ascii_lowercase().as_str() {
        "bigc" => Some(1014),
        "psc" => Some(612),
        _ => None,
    }
}

/// Uppercased identifier → 1-based row, scanned once per run from the
/// legacy region of a master sheet. Read-only after build.
#[derive(Debug, Clone, Default)]
pub struct LegacyRowIndex {
    entries: HashMap<String, u32>,
}

impl LegacyRowIndex {
    /// Empty index: every lookup misses, legacy handling is disabled.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Scan rows [2, bound] of the identifier column. Non-empty identifier
    /// cells are inserted uppercased; a later duplicate overwrites an
    /// earlier one (last row wins).
    pub fn build(sheet: &Sheet, id_column: u32, bound: u32) -> Self {
        let mut entries = HashMap::new();
        for row in 2..=bound.min(sheet.rows) {
            let id = sheet.text(row, id_column);
            let id = id.trim();
            if id.is_empty() {
                continue;
            }
            entries.insert(id.to_uppercase(), row);
        }
        Self { entries }
    }

    /// Row of the legacy twin for `identifier`, i.e. the entry keyed
    /// `<identifier>-OLD`. A miss is normal: not every product has one.
    pub fn legacy_row(&self, identifier: &str) -> Option<u32> {
        self.entries.get(&format!("{identifier}{LEGACY_SUFFIX}")).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn master(rows: &[(u32, &str)]) -> Sheet {
        let mut s = Sheet::new("info");
        for &(row, id) in rows {
            s.set_input(row, 2, id);
        }
        s
    }

    #[test]
    fn test_build_and_lookup() {
        let s = master(&[(2, "SKU1-OLD"), (3, "sku2-old"), (4, "SKU1")]);
        let index = LegacyRowIndex::build(&s, 2, 10);
        assert_eq!(index.len(), 3);
        assert_eq!(index.legacy_row("SKU1"), Some(2));
        assert_eq!(index.legacy_row("SKU2"), Some(3));
        assert_eq!(index.legacy_row("SKU3"), None);
    }

    #[test]
    fn test_duplicate_identifier_last_row_wins() {
        let s = master(&[(2, "SKU1-OLD"), (5, "SKU1-OLD")]);
        let index = LegacyRowIndex::build(&s, 2, 10);
        assert_eq!(index.legacy_row("SKU1"), Some(5));
    }

    #[test]
    fn test_scan_stops_at_bound() {
        let s = master(&[(2, "SKU1-OLD"), (8, "SKU2-OLD")]);
        let index = LegacyRowIndex::build(&s, 2, 5);
        assert_eq!(index.legacy_row("SKU1"), Some(2));
        assert_eq!(index.legacy_row("SKU2"), None);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let s = master(&[(2, "SKU1-OLD"), (3, "  "), (4, "SKU2-OLD")]);
        let index = LegacyRowIndex::build(&s, 2, 10);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_disabled_index_always_misses() {
        let index = LegacyRowIndex::disabled();
        assert!(index.is_empty());
        assert_eq!(index.legacy_row("SKU1"), None);
    }

    #[test]
    fn test_site_policy() {
        assert_eq!(legacy_bound("bigc"), Some(1014));
        assert_eq!(legacy_bound("BigC"), Some(1014));
        assert_eq!(legacy_bound("psc"), Some(612));
        assert_eq!(legacy_bound("unknown-site"), None);
    }
}
