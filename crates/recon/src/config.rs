use serde::Deserialize;

use crate::error::ReconError;
use crate::extract::{column_index, RowFields, RowWindow};
use crate::legacy::legacy_bound;
use crate::locale::PriceLocale;

// ---------------------------------------------------------------------------
// Job kind
// ---------------------------------------------------------------------------

/// Which pipeline a job file drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    Update,
    Compare,
}

/// Peek at `kind` without deserializing the whole job. Files that omit it
/// are update jobs.
pub fn probe_kind(input: &str) -> Result<JobKind, ReconError> {
    #[derive(Deserialize)]
    struct Probe {
        #[serde(default)]
        kind: Option<JobKind>,
    }
    let probe: Probe =
        toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
    Ok(probe.kind.unwrap_or(JobKind::Update))
}

// ---------------------------------------------------------------------------
// Document references
// ---------------------------------------------------------------------------

/// One document reference: path plus the column/window layout to read.
/// Paths are resolved relative to the job file by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetRef {
    pub file: String,
    pub sku_column: String,
    pub price_column: String,
    /// Inclusive [start, end] row window.
    pub rows: [u32; 2],
    /// Column carrying the product-header sentinel; defaults to the
    /// identifier column. Only meaningful on update targets.
    #[serde(default)]
    pub header_column: Option<String>,
}

impl SheetRef {
    pub fn fields(&self) -> Result<RowFields, ReconError> {
        Ok(RowFields {
            identifier: column_index(&self.sku_column)?,
            price: column_index(&self.price_column)?,
        })
    }

    pub fn window(&self) -> RowWindow {
        RowWindow::new(self.rows[0], self.rows[1])
    }

    pub fn header_col(&self) -> Result<u32, ReconError> {
        match &self.header_column {
            Some(letter) => column_index(letter),
            None => column_index(&self.sku_column),
        }
    }

    fn validate(&self, table: &str) -> Result<(), ReconError> {
        self.fields()?;
        self.header_col()?;
        if self.file.trim().is_empty() {
            return Err(ReconError::ConfigValidation(format!(
                "[{table}] file must not be empty"
            )));
        }
        let [start, end] = self.rows;
        if start < 1 || start > end {
            return Err(ReconError::ConfigValidation(format!(
                "[{table}] rows [{start}, {end}] is not a valid window"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Update job
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct UpdateJob {
    #[serde(default)]
    pub kind: Option<JobKind>,
    pub name: String,
    /// Site token: selects the legacy-region policy for the master sheet.
    pub site: String,
    #[serde(default = "default_sheet_name")]
    pub sheet: String,
    pub source: SheetRef,
    pub target: SheetRef,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub legacy: Option<LegacyConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Appended to the target's file stem for the saved artifact.
    #[serde(default = "default_suffix")]
    pub suffix: String,
    /// Optional JSON report path.
    #[serde(default)]
    pub json: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            json: None,
        }
    }
}

/// Per-job override of the built-in site policy.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LegacyConfig {
    pub end_row: u32,
}

fn default_sheet_name() -> String {
    "info".to_string()
}

fn default_suffix() -> String {
    "-updated".to_string()
}

impl UpdateJob {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let job: UpdateJob =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        job.validate()?;
        Ok(job)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.kind.is_some() && self.kind != Some(JobKind::Update) {
            return Err(ReconError::ConfigValidation(
                "kind must be \"update\" for an update job".into(),
            ));
        }
        if self.site.trim().is_empty() {
            return Err(ReconError::ConfigValidation("site must not be empty".into()));
        }
        if self.output.suffix.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "[output] suffix must not be empty".into(),
            ));
        }
        self.source.validate("source")?;
        self.target.validate("target")?;
        Ok(())
    }

    /// End of the target's legacy region: the job override first, then the
    /// built-in site table. None disables legacy handling.
    pub fn legacy_end_row(&self) -> Option<u32> {
        self.legacy
            .map(|l| l.end_row)
            .or_else(|| legacy_bound(&self.site))
    }
}

// ---------------------------------------------------------------------------
// Compare job
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CompareJob {
    #[serde(default)]
    pub kind: Option<JobKind>,
    pub name: String,
    #[serde(default = "default_sheet_name")]
    pub sheet: String,
    /// Leading source-tag length stripped from scrape identifiers.
    #[serde(default = "default_prefix_len")]
    pub prefix_len: usize,
    pub scrape: SheetRef,
    pub master: SheetRef,
    pub report: ReportConfig,
    #[serde(default)]
    pub locale: PriceLocale,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Report artifact path; `.xlsx` or `.csv` decides the format.
    pub file: String,
    /// Optional JSON report path.
    #[serde(default)]
    pub json: Option<String>,
}

fn default_prefix_len() -> usize {
    crate::compare::DEFAULT_SCRAPE_PREFIX
}

impl CompareJob {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let job: CompareJob =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        job.validate()?;
        Ok(job)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.kind != Some(JobKind::Compare) {
            return Err(ReconError::ConfigValidation(
                "kind must be \"compare\" for a compare job".into(),
            ));
        }
        if self.report.file.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "[report] file must not be empty".into(),
            ));
        }
        self.scrape.validate("scrape")?;
        self.master.validate("master")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
