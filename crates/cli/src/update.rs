//! `pgrid update` - apply a price-increase sheet to a master document.

use std::path::{Path, PathBuf};

use pricegrid_io::xlsx;
use pricegrid_recon::{run_update, UpdateJob};

use crate::util::{derived_output_path, import_document, is_csv};
use crate::CliError;

pub fn cmd_update(
    job_path: PathBuf,
    dry_run: bool,
    json_output: bool,
    output_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let job_str = std::fs::read_to_string(&job_path)
        .map_err(|e| CliError::args(format!("cannot read job file: {e}")))?;
    let job = UpdateJob::from_toml(&job_str).map_err(CliError::recon)?;

    // Resolve document paths relative to the job file's directory
    let base_dir = job_path.parent().unwrap_or_else(|| Path::new("."));
    let source_path = base_dir.join(&job.source.file);
    let target_path = base_dir.join(&job.target.file);

    let mut source = import_document(&source_path, &job.sheet)?;
    let mut target = import_document(&target_path, &job.sheet)?;

    let report = run_update(&job, &mut source, &mut target).map_err(CliError::recon)?;

    if !dry_run {
        let target_out = derived_output_path(&target_path, &job.output.suffix);
        let stats = xlsx::export_sheet(&target, &target_out).map_err(CliError::io)?;
        eprintln!("wrote {} ({})", target_out.display(), stats.summary());

        // The annotated source needs fills, so a csv source saves as a
        // derived xlsx instead of in place.
        let source_out = if is_csv(&source_path) {
            derived_output_path(&source_path, &job.output.suffix)
        } else {
            source_path.clone()
        };
        let stats = xlsx::export_sheet(&source, &source_out).map_err(CliError::io)?;
        eprintln!("wrote {} ({})", source_out.display(), stats.summary());
    }

    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;

    let report_path = output_file.or_else(|| job.output.json.as_ref().map(|p| base_dir.join(p)));
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
        "{}: {} matched, {} updated, {} unchanged, {} sentinel, {} legacy, {} anchors missing",
        report.meta.job_name,
        s.matched,
        s.updated,
        s.unchanged,
        s.skipped_sentinel,
        s.legacy_updates,
        s.anchors_missing,
    );
    if dry_run {
        eprintln!("dry run: no documents written");
    }

    Ok(())
}
