use pricegrid_engine::{CellValue, Sheet};

use crate::extract::{normalize_identifier, RowFields, RowWindow};
use crate::locale::PriceLocale;
use crate::model::{CompareStatus, ComparisonEntry, PriceValue, Record};

/// Master-side sentinel: the price column overflowed its layout.
pub const OVERFLOW_SENTINEL: &str = "*overflow*";
/// Scrape-side sentinel: the competitor listing is sold out.
pub const SOLD_OUT_SENTINEL: &str = "SOLD OUT";
/// Length of the source tag scrape feeds prepend to identifiers.
pub const DEFAULT_SCRAPE_PREFIX: usize = 3;

/// Compare scraped competitor prices against the master sheet and collect
/// the products worth a look: unavailable ones and the ones the master now
/// prices above the competitor. Products qualifying for neither are
/// omitted entirely.
pub fn build_decrease_report(
    scrape: &[Record],
    master: &Sheet,
    fields: &RowFields,
    window: RowWindow,
    locale: &PriceLocale,
    prefix_len: usize,
) -> Vec<ComparisonEntry> {
    scrape
        .iter()
        .filter_map(|record| compare_record(record, master, fields, window, locale, prefix_len))
        .collect()
}

fn compare_record(
    record: &Record,
    master: &Sheet,
    fields: &RowFields,
    window: RowWindow,
    locale: &PriceLocale,
    prefix_len: usize,
) -> Option<ComparisonEntry> {
    let identifier = strip_source_prefix(&record.identifier, prefix_len)?;

    for row in window.rows() {
        if normalize_identifier(&master.text(row, fields.identifier)) != identifier {
            continue;
        }

        // Availability sentinels end the scan for this product.
        if master.text(row, fields.price).trim() == OVERFLOW_SENTINEL {
            return Some(not_available(&identifier));
        }
        if let PriceValue::Raw(raw) = &record.price {
            if raw.trim() == SOLD_OUT_SENTINEL {
                return Some(not_available(&identifier));
            }
        }

        let Some(master_price) = master.number(row, fields.price) else {
            // Non-numeric, non-sentinel master price: this row cannot
            // qualify, keep scanning.
            continue;
        };
        let scrape_price = match &record.price {
            PriceValue::Numeric(n) => Some(*n),
            PriceValue::Raw(s) => locale.parse(s),
        };
        let Some(scrape_price) = scrape_price else {
            continue;
        };

        if master_price > scrape_price {
            return Some(ComparisonEntry {
                identifier,
                status: CompareStatus::PriceDecreased,
                master_price: Some(master_price),
                scrape_price: Some(scrape_price),
            });
        }
        // Matched but did not qualify: a later duplicate row still might.
    }
    None
}

fn not_available(identifier: &str) -> ComparisonEntry {
    ComparisonEntry {
        identifier: identifier.to_string(),
        status: CompareStatus::NotAvailable,
        master_price: None,
        scrape_price: None,
    }
}

/// Drop the leading source tag. Identifiers shorter than the tag cannot
/// name a product and yield None.
fn strip_source_prefix(identifier: &str, prefix_len: usize) -> Option<String> {
    identifier
        .char_indices()
        .nth(prefix_len)
        .map(|(i, _)| identifier[i..].to_string())
}

/// Render comparison entries as a sheet for the report artifact: a header
/// row, then one row per entry. Prices stay numeric so the artifact sorts
/// and filters cleanly.
pub fn report_sheet(entries: &[ComparisonEntry]) -> Sheet {
    let mut sheet = Sheet::new("comparison");

    let headers = ["sku", "status", "master_price", "scrape_price"];
    for (col, header) in headers.iter().enumerate() {
        sheet.set_value(1, col as u32 + 1, CellValue::Text(header.to_string()));
    }

    for (i, entry) in entries.iter().enumerate() {
        let row = i as u32 + 2;
        sheet.set_value(row, 1, CellValue::Text(entry.identifier.clone()));
        sheet.set_value(row, 2, CellValue::Text(entry.status.as_str().to_string()));
        if let Some(price) = entry.master_price {
            sheet.set_value(row, 3, CellValue::Number(price));
        }
        if let Some(price) = entry.scrape_price {
            sheet.set_value(row, 4, CellValue::Number(price));
        }
    }

    sheet
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrape(id: &str, price: &str) -> Record {
        Record {
            identifier: id.to_string(),
            price: match price.parse::<f64>() {
                Ok(n) => PriceValue::Numeric(n),
                Err(_) => PriceValue::Raw(price.to_string()),
            },
        }
    }

    fn master(rows: &[(u32, &str, &str)]) -> Sheet {
        let mut s = Sheet::new("info");
        for &(row, id, price) in rows {
            s.set_input(row, 1, id);
            s.set_input(row, 2, price);
        }
        s
    }

    fn fields() -> RowFields {
        RowFields {
            identifier: 1,
            price: 2,
        }
    }

    fn run(scrape_recs: &[Record], sheet: &Sheet) -> Vec<ComparisonEntry> {
        build_decrease_report(
            scrape_recs,
            sheet,
            &fields(),
            RowWindow::new(2, sheet.rows.max(2)),
            &PriceLocale::EN_US,
            DEFAULT_SCRAPE_PREFIX,
        )
    }

    #[test]
    fn test_price_decrease_detected() {
        let sheet = master(&[(2, "123", "12.00")]);
        let entries = run(&[scrape("XYZ123", "$9.50")], &sheet);
        assert_eq!(
            entries,
            vec![ComparisonEntry {
                identifier: "123".to_string(),
                status: CompareStatus::PriceDecreased,
                master_price: Some(12.0),
                scrape_price: Some(9.5),
            }]
        );
    }

    #[test]
    fn test_master_overflow_is_not_available() {
        let sheet = master(&[(2, "123", "*overflow*")]);
        let entries = run(&[scrape("XYZ123", "$9.50")], &sheet);
        assert_eq!(entries[0].status, CompareStatus::NotAvailable);
        assert_eq!(entries[0].master_price, None);
    }

    #[test]
    fn test_sold_out_is_not_available() {
        let sheet = master(&[(2, "123", "12.00")]);
        let entries = run(&[scrape("XYZ123", "SOLD OUT")], &sheet);
        assert_eq!(entries[0].status, CompareStatus::NotAvailable);
    }

    #[test]
    fn test_cheaper_master_is_omitted() {
        let sheet = master(&[(2, "123", "8.00")]);
        let entries = run(&[scrape("XYZ123", "$9.50")], &sheet);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_unknown_identifier_is_omitted() {
        let sheet = master(&[(2, "999", "12.00")]);
        let entries = run(&[scrape("XYZ123", "$9.50")], &sheet);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_short_identifier_is_omitted() {
        let sheet = master(&[(2, "123", "12.00")]);
        let entries = run(&[scrape("XY", "$9.50")], &sheet);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_first_qualifying_row_wins() {
        // Row 2 matches but does not qualify; row 4 qualifies.
        let sheet = master(&[(2, "123", "9.00"), (3, "456", "1.00"), (4, "123", "11.00")]);
        let entries = run(&[scrape("XYZ123", "$9.50")], &sheet);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].master_price, Some(11.0));
    }

    #[test]
    fn test_report_sheet_layout() {
        let entries = vec![
            ComparisonEntry {
                identifier: "123".to_string(),
                status: CompareStatus::PriceDecreased,
                master_price: Some(12.0),
                scrape_price: Some(9.5),
            },
            ComparisonEntry {
                identifier: "456".to_string(),
                status: CompareStatus::NotAvailable,
                master_price: None,
                scrape_price: None,
            },
        ];

        let sheet = report_sheet(&entries);
        assert_eq!(sheet.text(1, 1), "sku");
        assert_eq!(sheet.text(1, 4), "scrape_price");
        assert_eq!(sheet.text(2, 1), "123");
        assert_eq!(sheet.text(2, 2), "price_decreased");
        assert_eq!(sheet.number(2, 3), Some(12.0));
        assert_eq!(sheet.number(2, 4), Some(9.5));
        assert_eq!(sheet.text(3, 2), "not_available");
        assert!(sheet.is_blank(3, 3));
        assert!(sheet.is_blank(3, 4));
    }

    #[test]
    fn test_locale_governs_scrape_parsing() {
        let sheet = master(&[(2, "123", "1300")]);
        let eu = PriceLocale {
            currency: '€',
            thousands: '.',
            decimal: ',',
        };
        let entries = build_decrease_report(
            &[scrape("XYZ123", "€1.299,50")],
            &sheet,
            &fields(),
            RowWindow::new(2, 2),
            &eu,
            DEFAULT_SCRAPE_PREFIX,
        );
        assert_eq!(entries[0].scrape_price, Some(1299.5));
    }
}
