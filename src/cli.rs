//! Command-line interface definitions for titulares.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The output directory can also come from the environment.

use crate::outputs::retention::DEFAULT_RETENTION_DAYS;
use crate::scrapers::fetch::DEFAULT_TIMEOUT_SECS;
use clap::Parser;

/// Command-line arguments for the titulares application.
///
/// # Examples
///
/// ```sh
/// # Write today's report to the current directory
/// titulares
///
/// # Custom source table, JSON snapshot, four fetches at a time
/// titulares -o ./reports -c sources.yaml --json --concurrency 4
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory the report is written to and swept for old reports
    #[arg(short, long, env = "TITULARES_OUTPUT_DIR", default_value = ".")]
    pub output_dir: String,

    /// Optional YAML source table replacing the built-in one
    #[arg(short, long)]
    pub config: Option<String>,

    /// Also write a JSON snapshot next to the HTML report
    #[arg(long)]
    pub json: bool,

    /// Maximum number of pages fetched at the same time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Reports older than this many days are deleted before the run
    #[arg(long, default_value_t = DEFAULT_RETENTION_DAYS)]
    pub retention_days: i64,

    /// Skip deleting old reports
    #[arg(long)]
    pub no_sweep: bool,
}
