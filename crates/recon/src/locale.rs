use serde::Deserialize;

/// Numeric text conventions for one locale, passed explicitly wherever
/// price text is parsed. Nothing here touches process-wide state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PriceLocale {
    pub currency: char,
    pub thousands: char,
    pub decimal: char,
}

impl Default for PriceLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

impl PriceLocale {
    pub const EN_US: PriceLocale = PriceLocale {
        currency: '$',
        thousands: ',',
        decimal: '.',
    };

    /// Parse a locale-formatted price string:
    /// - Strip the currency symbol, thousands separators, whitespace
    /// - Normalize the decimal separator to `.`
    /// - Handle `(123.45)` → `-123.45`
    /// - Returns None if non-numeric characters remain after stripping
    pub fn parse(&self, s: &str) -> Option<f64> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return None;
        }

        // Parenthesized negatives: (123.45) → -123.45
        let (is_negative, inner) = if trimmed.starts_with('(') && trimmed.ends_with(')') {
            (true, &trimmed[1..trimmed.len() - 1])
        } else {
            (false, trimmed)
        };

        let cleaned: String = inner
            .chars()
            .filter(|c| *c != self.currency && *c != self.thousands && !c.is_whitespace())
            .map(|c| if c == self.decimal { '.' } else { c })
            .collect();

        if cleaned.is_empty() {
            return None;
        }

        // After stripping, only digits, '.', and a leading sign may remain.
        for (i, c) in cleaned.chars().enumerate() {
            match c {
                '0'..='9' | '.' => {}
                '-' | '+' if i == 0 && !is_negative => {}
                _ => return None,
            }
        }

        let value: f64 = cleaned.parse().ok()?;
        Some(if is_negative { -value } else { value })
    }
}
