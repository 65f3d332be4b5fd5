//! JSON snapshot of a run.
//!
//! Written next to the HTML report when `--json` is given, with the same
//! timestamped name and a `.json` extension:
//! ```text
//! output_dir/
//! ├── titulares_20250620_100509.html
//! └── titulares_20250620_100509.json
//! ```

use crate::models::RunReport;
use crate::utils::report_path;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize a [`RunReport`] to `titulares_YYYYMMDD_HHMMSS.json` in `dir`.
#[instrument(level = "info", skip_all, fields(%dir))]
pub async fn write_snapshot(report: &RunReport, dir: &str) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(report)?;
    let path = report_path(dir, report.generated_at, "json");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON snapshot");
    Ok(path)
}
