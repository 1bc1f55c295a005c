use std::collections::HashSet;

use crate::model::{MatchedPair, Record};

/// Membership match: keep every driving record whose identifier appears
/// anywhere in `reference`, in driving order, carrying the driving price.
/// Reference prices are ignored; presence is the only signal.
pub fn match_records(driving: &[Record], reference: &[Record]) -> Vec<MatchedPair> {
    let known: HashSet<&str> = reference.iter().map(|r| r.identifier.as_str()).collect();

    driving
        .iter()
        .filter(|r| known.contains(r.identifier.as_str()))
        .map(|r| MatchedPair {
            identifier: r.identifier.clone(),
            new_price: r.price.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PriceValue;

    fn rec(id: &str, price: f64) -> Record {
        Record {
            identifier: id.to_string(),
            price: PriceValue::Numeric(price),
        }
    }

    #[test]
    fn test_match_preserves_driving_order() {
        let driving = vec![rec("SKU3", 3.0), rec("SKU1", 1.0), rec("SKU2", 2.0)];
        let reference = vec![rec("SKU1", 9.0), rec("SKU2", 9.0), rec("SKU3", 9.0)];
        let pairs = match_records(&driving, &reference);
        let ids: Vec<&str> = pairs.iter().map(|p| p.identifier.as_str()).collect();
        assert_eq!(ids, vec!["SKU3", "SKU1", "SKU2"]);
    }

    #[test]
    fn test_match_uses_driving_prices() {
        let driving = vec![rec("SKU1", 10.0)];
        let reference = vec![rec("SKU1", 5.0)];
        let pairs = match_records(&driving, &reference);
        assert_eq!(pairs[0].new_price, PriceValue::Numeric(10.0));
    }

    #[test]
    fn test_match_ignores_reference_order() {
        let driving = vec![rec("A", 1.0), rec("B", 2.0)];
        let fwd = vec![rec("A", 0.0), rec("B", 0.0), rec("C", 0.0)];
        let rev = vec![rec("C", 0.0), rec("B", 0.0), rec("A", 0.0)];
        assert_eq!(match_records(&driving, &fwd), match_records(&driving, &rev));
    }

    #[test]
    fn test_match_no_overlap_is_empty() {
        let driving = vec![rec("A", 1.0)];
        let reference = vec![rec("B", 2.0)];
        assert!(match_records(&driving, &reference).is_empty());
    }

    #[test]
    fn test_match_keeps_duplicate_driving_records() {
        // Duplicates degrade matching but are not deduplicated here.
        let driving = vec![rec("A", 1.0), rec("A", 2.0)];
        let reference = vec![rec("A", 0.0)];
        let pairs = match_records(&driving, &reference);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].new_price, PriceValue::Numeric(2.0));
    }

    #[test]
    fn test_match_raw_price_rides_through() {
        let driving = vec![Record {
            identifier: "A".to_string(),
            price: PriceValue::Raw("TBD".to_string()),
        }];
        let reference = vec![rec("A", 0.0)];
        let pairs = match_records(&driving, &reference);
        assert_eq!(pairs[0].new_price, PriceValue::Raw("TBD".to_string()));
    }
}
