//! `pgrid compare` - flag competitor prices that dropped below the master.

use std::path::{Path, PathBuf};

use pricegrid_recon::compare::report_sheet;
use pricegrid_recon::{run_compare, CompareJob};

use crate::exit_codes::EXIT_DECREASES;
use crate::util::{export_document, import_document};
use crate::CliError;

pub fn cmd_compare(
    job_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    fail_on_decrease: bool,
) -> Result<(), CliError> {
    let job_str = std::fs::read_to_string(&job_path)
        .map_err(|e| CliError::args(format!("cannot read job file: {e}")))?;
    let job = CompareJob::from_toml(&job_str).map_err(CliError::recon)?;

    // Resolve document paths relative to the job file's directory
    let base_dir = job_path.parent().unwrap_or_else(|| Path::new("."));
    let scrape = import_document(&base_dir.join(&job.scrape.file), &job.sheet)?;
    let master = import_document(&base_dir.join(&job.master.file), &job.sheet)?;

    let report = run_compare(&job, &scrape, &master).map_err(CliError::recon)?;

    let artifact_path = base_dir.join(&job.report.file);
    export_document(&report_sheet(&report.entries), &artifact_path)?;
    eprintln!("wrote {}", artifact_path.display());

    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

    let report_path = output_file.or_else(|| job.report.json.as_ref().map(|p| base_dir.join(p)));
    if let Some(ref path) = report_path {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::io(format!("cannot write report: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "{}: {} scraped, {} price decreases, {} not available",
        report.meta.job_name, s.scrape_records, s.price_decreased, s.not_available,
    );

    if fail_on_decrease && s.price_decreased > 0 {
        return Err(CliError {
            code: EXIT_DECREASES,
            message: format!("{} price decrease(s) found", s.price_decreased),
            hint: None,
        });
    }

    Ok(())
}
