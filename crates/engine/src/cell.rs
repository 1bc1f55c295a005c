/// Content of a single cell. Values are parsed once on entry; a cell holds
/// either nothing, text, or a finite number.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        if let Ok(num) = trimmed.parse::<f64>() {
            return CellValue::Number(num);
        }

        CellValue::Text(trimmed.to_string())
    }

    pub fn raw_display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }

    /// Numeric view: numbers directly, numeric-looking text parsed.
    pub fn number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Empty => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }
}

/// Full-row highlight fill (RGB), applied by the annotation pass and carried
/// through to exported documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill(pub u32);

impl Fill {
    pub const GREEN: Fill = Fill(0x00FF00);
    pub const YELLOW: Fill = Fill(0xFFFF00);

    pub fn rgb(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input_empty() {
        assert_eq!(CellValue::from_input(""), CellValue::Empty);
        assert_eq!(CellValue::from_input("   "), CellValue::Empty);
    }

    #[test]
    fn test_from_input_number() {
        assert_eq!(CellValue::from_input("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::from_input(" 19.995 "), CellValue::Number(19.995));
        assert_eq!(CellValue::from_input("-3.5"), CellValue::Number(-3.5));
    }

    #[test]
    fn test_from_input_text() {
        assert_eq!(
            CellValue::from_input("SKU1-OLD"),
            CellValue::Text("SKU1-OLD".to_string())
        );
        assert_eq!(
            CellValue::from_input("[FIXED]15.00"),
            CellValue::Text("[FIXED]15.00".to_string())
        );
    }

    #[test]
    fn test_raw_display_integer_number() {
        assert_eq!(CellValue::Number(20.0).raw_display(), "20");
        assert_eq!(CellValue::Number(9.5).raw_display(), "9.5");
        assert_eq!(CellValue::Empty.raw_display(), "");
    }

    #[test]
    fn test_number_view() {
        assert_eq!(CellValue::Number(12.0).number(), Some(12.0));
        assert_eq!(CellValue::Text("0".to_string()).number(), Some(0.0));
        assert_eq!(CellValue::Text("abc".to_string()).number(), None);
        assert_eq!(CellValue::Empty.number(), None);
    }

    #[test]
    fn test_is_blank() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::Text("  ".to_string()).is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(!CellValue::Text("0".to_string()).is_blank());
    }
}
