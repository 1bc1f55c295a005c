use serde::Serialize;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Price cell content after extraction: numeric when parseable, otherwise
/// the original text carried through unchanged. Extraction is the single
/// point of rounding, so a `Numeric` always holds a 2-decimal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceValue {
    Numeric(f64),
    Raw(String),
}

impl PriceValue {
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Raw(_) => None,
        }
    }
}

impl std::fmt::Display for PriceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Self::Raw(s) => write!(f, "{s}"),
        }
    }
}

/// One normalized (identifier, price) row pulled from a document window.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Trimmed, uppercased join key.
    pub identifier: String,
    pub price: PriceValue,
}

/// A driving-set record whose identifier exists in the reference set.
/// The price always comes from the driving side.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPair {
    pub identifier: String,
    pub new_price: PriceValue,
}

// ---------------------------------------------------------------------------
// Row classification
// ---------------------------------------------------------------------------

/// Classification of a target row's price cell at mutation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowState {
    Empty,
    ZeroSentinel,
    FixedMarker,
    Plain,
}

impl RowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::ZeroSentinel => "zero_sentinel",
            Self::FixedMarker => "fixed_marker",
            Self::Plain => "plain",
        }
    }
}

impl std::fmt::Display for RowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Annotation status for a row, driven purely by match membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Matched,
    Unmatched,
    Updated,
}

// ---------------------------------------------------------------------------
// Comparison report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareStatus {
    NotAvailable,
    PriceDecreased,
}

impl CompareStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAvailable => "not_available",
            Self::PriceDecreased => "price_decreased",
        }
    }
}

impl std::fmt::Display for CompareStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scrape-vs-master finding. Prices are present only for
/// `price_decreased` entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub identifier: String,
    pub status: CompareStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrape_price: Option<f64>,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Outcome of one bounded upward anchor walk from an updated
/// fixed-marker row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorOutcome {
    Marked(u32),
    NotFound,
}

/// Per-pair reconciliation outcome. `row: None` means the identifier never
/// appeared in the target window (skipped, not an error).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowOutcome {
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<RowState>,
    pub updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_row: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_anchor: Option<AnchorOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_anchor: Option<AnchorOutcome>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateSummary {
    pub source_records: usize,
    pub target_records: usize,
    pub matched: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub skipped_sentinel: usize,
    pub not_found: usize,
    pub legacy_updates: usize,
    pub anchors_missing: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub job_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    pub engine_version: String,
    pub run_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub meta: RunMeta,
    pub summary: UpdateSummary,
    pub rows: Vec<RowOutcome>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompareSummary {
    pub scrape_records: usize,
    pub not_available: usize,
    pub price_decreased: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareReport {
    pub meta: RunMeta,
    pub summary: CompareSummary,
    pub entries: Vec<ComparisonEntry>,
}
