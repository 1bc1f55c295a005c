//! `pgrid validate` - check a job file without touching documents.

use std::path::PathBuf;

use pricegrid_recon::{probe_kind, CompareJob, JobKind, UpdateJob};

use crate::CliError;

pub fn cmd_validate(job_path: PathBuf) -> Result<(), CliError> {
    let job_str = std::fs::read_to_string(&job_path)
        .map_err(|e| CliError::args(format!("cannot read job file: {e}")))?;

    match probe_kind(&job_str).map_err(CliError::recon)? {
        JobKind::Update => {
            let job = UpdateJob::from_toml(&job_str).map_err(CliError::recon)?;
            let legacy = match job.legacy_end_row() {
                Some(end) => format!("legacy rows [2, {end}]"),
                None => "no legacy region".to_string(),
            };
            eprintln!(
                "valid: update job '{}' for site '{}' ({})",
                job.name, job.site, legacy
            );
        }
        JobKind::Compare => {
            let job = CompareJob::from_toml(&job_str).map_err(CliError::recon)?;
            eprintln!(
                "valid: compare job '{}' reporting to {}",
                job.name, job.report.file
            );
        }
    }

    Ok(())
}
