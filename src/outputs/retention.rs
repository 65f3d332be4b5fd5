//! Retention sweep over previously written reports.
//!
//! Reports carry their creation time in the file name
//! (`titulares_YYYYMMDD_HHMMSS.html`). Files older than the retention window
//! are deleted. Names that look like reports but do not parse are left alone.
//! Nothing here ever aborts a run.

use crate::utils::REPORT_TIMESTAMP_FORMAT;
use chrono::NaiveDateTime;
use itertools::{Either, Itertools};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Reports older than this many whole days are removed.
pub const DEFAULT_RETENTION_DAYS: i64 = 2;

const REPORT_EXTENSIONS: [&str; 2] = ["html", "json"];

static REPORT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<prefix>.+)_(?P<stamp>\d{8}_\d{6})\.(?P<ext>[a-z]+)$")
        .expect("valid report name regex")
});

/// How a directory entry relates to the reports written with a given prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportName {
    /// A report and the time it was created.
    Report(NaiveDateTime),
    /// Carries the prefix and a report extension but no valid timestamp.
    Malformed,
    /// Not one of ours.
    Unrelated,
}

/// Classify a file name against `prefix`.
pub fn parse_report_name(name: &str, prefix: &str) -> ReportName {
    let ours = name.starts_with(&format!("{prefix}_"))
        && REPORT_EXTENSIONS
            .iter()
            .any(|ext| name.ends_with(&format!(".{ext}")));
    if !ours {
        return ReportName::Unrelated;
    }

    let Some(caps) = REPORT_NAME.captures(name) else {
        return ReportName::Malformed;
    };
    if &caps["prefix"] != prefix {
        return ReportName::Malformed;
    }
    match NaiveDateTime::parse_from_str(&caps["stamp"], REPORT_TIMESTAMP_FORMAT) {
        Ok(created) => ReportName::Report(created),
        Err(_) => ReportName::Malformed,
    }
}

/// Outcome of one sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepSummary {
    /// Report files whose timestamp parsed.
    pub scanned: usize,
    pub deleted: usize,
    /// Report-like names whose timestamp did not parse.
    pub skipped: usize,
    /// Expired reports that could not be removed.
    pub failed: usize,
}

/// Delete reports in `dir` created more than `max_age_days` whole days before `now`.
///
/// # Arguments
///
/// * `dir` - Directory holding previous reports
/// * `prefix` - Report file name prefix
/// * `now` - Reference time for the age of each report
/// * `max_age_days` - Reports at most this many whole days old are kept
///
/// # Returns
///
/// Counts of parsed, deleted, skipped and undeletable files. An unreadable
/// directory yields an empty summary.
#[instrument(level = "info", skip(now))]
pub async fn sweep(dir: &str, prefix: &str, now: NaiveDateTime, max_age_days: i64) -> SweepSummary {
    let mut summary = SweepSummary::default();

    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "Cannot read report directory; skipping sweep");
            return summary;
        }
    };

    let mut candidates = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Error while listing report directory");
                break;
            }
        };
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        match parse_report_name(&name, prefix) {
            ReportName::Unrelated => {}
            parsed => candidates.push((entry.path(), name, parsed)),
        }
    }

    let (reports, malformed): (Vec<(PathBuf, NaiveDateTime)>, Vec<String>) =
        candidates
            .into_iter()
            .partition_map(|(path, name, parsed)| match parsed {
                ReportName::Report(created) => Either::Left((path, created)),
                _ => Either::Right(name),
            });

    for name in &malformed {
        debug!(file = %name, "Report name has no valid timestamp; skipping");
    }
    summary.skipped = malformed.len();
    summary.scanned = reports.len();

    for (path, created) in reports {
        if (now - created).num_days() <= max_age_days {
            continue;
        }
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), %created, "Deleted old report");
                summary.deleted += 1;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to delete old report");
                summary.failed += 1;
            }
        }
    }

    info!(
        scanned = summary.scanned,
        deleted = summary.deleted,
        skipped = summary.skipped,
        failed = summary.failed,
        "Retention sweep done"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::Path;

    fn at(day: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "x").unwrap();
    }

    #[test]
    fn test_parse_report_name() {
        assert_eq!(
            parse_report_name("titulares_20250620_100509.html", "titulares"),
            ReportName::Report(
                NaiveDate::from_ymd_opt(2025, 6, 20)
                    .unwrap()
                    .and_hms_opt(10, 5, 9)
                    .unwrap()
            )
        );
        assert!(matches!(
            parse_report_name("titulares_20250620_100509.json", "titulares"),
            ReportName::Report(_)
        ));
    }

    #[test]
    fn test_parse_report_name_malformed() {
        assert_eq!(parse_report_name("titulares_hoy.html", "titulares"), ReportName::Malformed);
        assert_eq!(
            parse_report_name("titulares_20251399_100509.html", "titulares"),
            ReportName::Malformed
        );
        assert_eq!(
            parse_report_name("titulares_extra_20250620_100509.html", "titulares"),
            ReportName::Malformed
        );
    }

    #[test]
    fn test_parse_report_name_unrelated() {
        assert_eq!(parse_report_name("notas.html", "titulares"), ReportName::Unrelated);
        assert_eq!(
            parse_report_name("titulares_20250620_100509.txt", "titulares"),
            ReportName::Unrelated
        );
        assert_eq!(
            parse_report_name("otros_20250620_100509.html", "titulares"),
            ReportName::Unrelated
        );
    }

    #[tokio::test]
    async fn test_sweep_deletes_only_expired_reports() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        // now = 2025-06-20 12:00
        touch(dir, "titulares_20250620_080000.html"); // same day
        touch(dir, "titulares_20250618_080000.html"); // 2 days 4 hours: kept
        touch(dir, "titulares_20250617_130000.html"); // 2 days 23 hours: kept
        touch(dir, "titulares_20250617_110000.html"); // 3 days 1 hour: deleted
        touch(dir, "titulares_20250601_000000.json"); // deleted
        touch(dir, "titulares_roto.html");
        touch(dir, "README.md");

        let summary = sweep(dir.to_str().unwrap(), "titulares", at(20, 12), 2).await;

        assert_eq!(
            summary,
            SweepSummary {
                scanned: 5,
                deleted: 2,
                skipped: 1,
                failed: 0,
            }
        );
        assert!(dir.join("titulares_20250620_080000.html").exists());
        assert!(dir.join("titulares_20250618_080000.html").exists());
        assert!(dir.join("titulares_20250617_130000.html").exists());
        assert!(!dir.join("titulares_20250617_110000.html").exists());
        assert!(!dir.join("titulares_20250601_000000.json").exists());
        assert!(dir.join("titulares_roto.html").exists());
        assert!(dir.join("README.md").exists());
    }

    #[tokio::test]
    async fn test_sweep_ignores_directories() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("titulares_20200101_000000.html")).unwrap();
        let summary = sweep(tmp.path().to_str().unwrap(), "titulares", at(20, 12), 2).await;
        assert_eq!(summary, SweepSummary::default());
        assert!(tmp.path().join("titulares_20200101_000000.html").is_dir());
    }

    #[tokio::test]
    async fn test_sweep_missing_directory_is_not_fatal() {
        let summary = sweep("/definitely/not/a/dir", "titulares", at(20, 12), 2).await;
        assert_eq!(summary, SweepSummary::default());
    }
}
