//! Utility functions for report naming, log truncation, and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Timestamped report file names (`titulares_YYYYMMDD_HHMMSS.html`)
//! - String truncation for logging
//! - File system validation for the output directory

use chrono::NaiveDateTime;
use std::error::Error;
use std::fs as stdfs;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// File name prefix shared by every report this tool writes.
pub const REPORT_PREFIX: &str = "titulares";

/// Timestamp layout embedded in report file names.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Build the file name of a report created at `now`.
///
/// # Arguments
///
/// * `prefix` - File name prefix, normally [`REPORT_PREFIX`]
/// * `now` - Creation time embedded in the name
/// * `ext` - Extension without the dot
///
/// # Returns
///
/// `<prefix>_YYYYMMDD_HHMMSS.<ext>`.
///
/// # Examples
///
/// ```ignore
/// // 2025-06-20 10:05:09
/// assert_eq!(report_file_name("titulares", now, "html"), "titulares_20250620_100509.html");
/// ```
pub fn report_file_name(prefix: &str, now: NaiveDateTime, ext: &str) -> String {
    format!("{}_{}.{}", prefix, now.format(REPORT_TIMESTAMP_FORMAT), ext)
}

/// Full path of a report inside `dir`.
pub fn report_path(dir: &str, now: NaiveDateTime, ext: &str) -> PathBuf {
    Path::new(dir).join(report_file_name(REPORT_PREFIX, now, ext))
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a byte
/// count indicator appended. Cuts always land on a character boundary.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of characters to keep
///
/// # Returns
///
/// The original string if it has at most `max` characters, otherwise the
/// first `max` characters followed by `"…(+N bytes)"`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Arguments
///
/// * `path` - Output directory to create and check
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = Path::new(path).join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 20)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name(REPORT_PREFIX, at(10, 5, 9), "html"),
            "titulares_20250620_100509.html"
        );
        assert_eq!(
            report_file_name("x", at(23, 59, 59), "json"),
            "x_20250620_235959.json"
        );
    }

    #[test]
    fn test_report_path_joins_dir() {
        let path = report_path("/tmp/out", at(0, 0, 0), "html");
        assert_eq!(path, PathBuf::from("/tmp/out/titulares_20250620_000000.html"));
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("Última hora: España", 3);
        assert_eq!(result, "Últ…(+17 bytes)");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a/b");
        let nested = nested.to_str().unwrap();
        ensure_writable_dir(nested).await.unwrap();
        assert!(Path::new(nested).is_dir());
        assert!(!Path::new(nested).join("..__probe_write__").exists());
    }
}
