// PriceGrid CLI - headless price reconciliation jobs

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use pricegrid_cli::exit_codes::EXIT_SUCCESS;
use pricegrid_cli::{compare, update, validate, CliError};

#[derive(Parser)]
#[command(name = "pgrid")]
#[command(about = "Spreadsheet price reconciliation (headless)")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a price-increase sheet to a master document
    #[command(after_help = "\
The target document is never overwritten: the updated copy lands next to
it with the configured suffix. Exit code 5 means a rows window reaches
past the end of a document; fix the job file rather than the sheet.

Examples:
  pgrid update june-increase.toml
  pgrid update june-increase.toml --dry-run --json
  pgrid update june-increase.toml -o report.json")]
    Update {
        /// Path to the update job file (TOML)
        job: PathBuf,

        /// Run the reconciliation but write no documents
        #[arg(long)]
        dry_run: bool,

        /// Print the run report as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON run report to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Compare scraped competitor prices against the master document
    #[command(after_help = "\
Examples:
  pgrid compare weekly-scrape.toml
  pgrid compare weekly-scrape.toml --json
  pgrid compare weekly-scrape.toml --fail-on-decrease")]
    Compare {
        /// Path to the compare job file (TOML)
        job: PathBuf,

        /// Print the comparison report as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Write the JSON comparison report to a file
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Exit 6 when any price decrease is found
        #[arg(long)]
        fail_on_decrease: bool,
    },

    /// Validate a job file without touching any documents
    #[command(after_help = "\
Examples:
  pgrid validate june-increase.toml")]
    Validate {
        /// Path to the job file (TOML)
        job: PathBuf,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  pricegrid-recon ",
            env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nengine:  pricegrid-recon ",
            env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            // No subcommand = show usage
            eprintln!("Usage: pgrid <command> [options]");
            eprintln!("       pgrid --help for more information");
            Ok(())
        }
        Some(Commands::Update {
            job,
            dry_run,
            json,
            output,
        }) => update::cmd_update(job, dry_run, json, output),
        Some(Commands::Compare {
            job,
            json,
            output,
            fail_on_decrease,
        }) => compare::cmd_compare(job, json, output, fail_on_decrease),
        Some(Commands::Validate { job }) => validate::cmd_validate(job),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
