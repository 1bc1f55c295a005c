//! `pricegrid-recon` - price reconciliation over tabular documents.
//!
//! Pure engine crate: receives pre-loaded sheets, mutates them in memory,
//! and returns structured reports. No CLI or IO dependencies.

pub mod annotate;
pub mod compare;
pub mod config;
pub mod error;
pub mod extract;
pub mod legacy;
pub mod locale;
pub mod matcher;
pub mod model;
pub mod pipeline;
pub mod reconcile;

pub use config::{probe_kind, CompareJob, JobKind, UpdateJob};
pub use error::ReconError;
pub use locale::PriceLocale;
pub use model::{CompareReport, MatchedPair, Record, UpdateReport};
pub use pipeline::{run_compare, run_update};
