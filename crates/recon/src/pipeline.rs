//! End-to-end job runs over in-memory sheets.
//!
//! Document loading and artifact writing stay with the caller; everything
//! between (extraction, matching, reconciliation, row annotation, report
//! assembly) happens here.

use std::collections::HashSet;

use pricegrid_engine::Sheet;

use crate::annotate::annotate_rows;
use crate::compare::build_decrease_report;
use crate::config::{CompareJob, UpdateJob};
use crate::error::ReconError;
use crate::extract::extract;
use crate::legacy::LegacyRowIndex;
use crate::matcher::match_records;
use crate::model::{
    CompareReport, CompareStatus, CompareSummary, RowStatus, RunMeta, UpdateReport,
};
use crate::reconcile::{reconcile, summarize, TargetLayout};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

fn run_meta(job_name: &str, site: Option<&str>) -> RunMeta {
    RunMeta {
        job_name: job_name.to_string(),
        site: site.map(str::to_string),
        engine_version: ENGINE_VERSION.to_string(),
        run_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Run an update job: push the source sheet's prices into the target sheet
/// and mark both up. The caller saves the mutated sheets.
pub fn run_update(
    job: &UpdateJob,
    source: &mut Sheet,
    target: &mut Sheet,
) -> Result<UpdateReport, ReconError> {
    let source_fields = job.source.fields()?;
    let source_window = job.source.window();
    let target_fields = job.target.fields()?;

    let source_records = extract(source, &source_fields, source_window)?;
    let target_records = extract(target, &target_fields, job.target.window())?;
    let pairs = match_records(&source_records, &target_records);

    let legacy = match job.legacy_end_row() {
        Some(bound) => LegacyRowIndex::build(target, target_fields.identifier, bound),
        None => LegacyRowIndex::disabled(),
    };

    let layout = TargetLayout {
        fields: target_fields,
        header_column: job.target.header_col()?,
        window: job.target.window(),
    };
    let rows = reconcile(&pairs, target, &layout, &legacy);

    let matched: HashSet<&str> = pairs.iter().map(|p| p.identifier.as_str()).collect();
    let updated: HashSet<&str> = rows
        .iter()
        .filter(|r| r.updated)
        .map(|r| r.identifier.as_str())
        .collect();
    annotate_rows(source, source_fields.identifier, source_window, |id| {
        Some(if updated.contains(id) {
            RowStatus::Updated
        } else if matched.contains(id) {
            RowStatus::Matched
        } else {
            RowStatus::Unmatched
        })
    });

    let mut summary = summarize(&rows);
    summary.source_records = source_records.len();
    summary.target_records = target_records.len();

    Ok(UpdateReport {
        meta: run_meta(&job.name, Some(&job.site)),
        summary,
        rows,
    })
}

/// Run a compare job: flag master products that scraped lower or show as
/// unavailable. Neither sheet is mutated.
pub fn run_compare(
    job: &CompareJob,
    scrape: &Sheet,
    master: &Sheet,
) -> Result<CompareReport, ReconError> {
    let scrape_records = extract(scrape, &job.scrape.fields()?, job.scrape.window())?;

    let master_fields = job.master.fields()?;
    let master_window = job.master.window();
    master_window.validate(master)?;

    let entries = build_decrease_report(
        &scrape_records,
        master,
        &master_fields,
        master_window,
        &job.locale,
        job.prefix_len,
    );

    let mut summary = CompareSummary {
        scrape_records: scrape_records.len(),
        ..CompareSummary::default()
    };
    for entry in &entries {
        match entry.status {
            CompareStatus::NotAvailable => summary.not_available += 1,
            CompareStatus::PriceDecreased => summary.price_decreased += 1,
        }
    }

    Ok(CompareReport {
        meta: run_meta(&job.name, None),
        summary,
        entries,
    })
}
