//! # titulares
//!
//! Collects the top front-page headlines of several Spanish newspapers and
//! the latest article of each of their data-desk authors, flags which of
//! those articles look like they were published today, and renders it all
//! into one static HTML report.
//!
//! ## Usage
//!
//! ```sh
//! titulares -o ./reports
//! ```
//!
//! ## Architecture
//!
//! 1. **Sweep**: Delete reports older than the retention window
//! 2. **Collect**: Run each front page through its selector cascade and
//!    resolve each configured author page
//! 3. **Output**: Write the HTML report (and optionally a JSON snapshot)
//!
//! A source or author that cannot be fetched or matched only leaves a gap in
//! the report. Only an unusable output directory, a bad source table or a
//! failed report write stop the run.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use outputs::{html, json, retention};
use scrapers::fetch::HttpFetcher;
use utils::{REPORT_PREFIX, ensure_writable_dir};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("titulares starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Early check: ensure the output dir is writable
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Source table ----
    let sources = match &args.config {
        Some(path) => config::load_sources(path).await?,
        None => config::default_sources(),
    };
    info!(count = sources.len(), "Source table ready");

    let now = Local::now().naive_local();

    // ---- Retention sweep ----
    if args.no_sweep {
        info!("Retention sweep disabled");
    } else {
        retention::sweep(&args.output_dir, REPORT_PREFIX, now, args.retention_days).await;
    }

    // ---- Collect ----
    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs))?;
    let report = pipeline::collect(&fetcher, &sources, now, usize::from(args.concurrency)).await;

    for section in &report.sections {
        info!(
            source = %section.source,
            headlines = section.headlines.len(),
            author_articles = section.author_articles.len(),
            new_articles = section.new_article_count(),
            "Source summary"
        );
    }

    // ---- Output ----
    let report_path = match html::write_html_report(&report, &args.output_dir).await {
        Ok(path) => path,
        Err(e) => {
            error!(dir = %args.output_dir, error = %e, "Failed to write HTML report");
            return Err(e);
        }
    };

    if args.json {
        if let Err(e) = json::write_snapshot(&report, &args.output_dir).await {
            error!(dir = %args.output_dir, error = %e, "Failed to write JSON snapshot");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        path = %report_path.display(),
        headlines = report.headline_count(),
        author_articles = report.author_article_count(),
        "Execution complete"
    );

    Ok(())
}
