//! Error types for page fetching and source configuration.
//!
//! Fetch errors never escape a single source or author: callers log them
//! and degrade to an empty result. Config errors are fatal at startup.

use thiserror::Error;

/// Failure to retrieve a page body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("transport error fetching {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// The URL the failed request was made against.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Timeout { url }
            | FetchError::UnexpectedStatus { url, .. }
            | FetchError::Transport { url, .. } => url,
        }
    }
}

/// Failure to load or validate a source table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read source config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse source config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("source {source_name} has an empty base URL")]
    EmptyBaseUrl { source_name: String },

    #[error("source {source_name} has an invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl {
        source_name: String,
        base_url: String,
        reason: String,
    },

    #[error("source {source_name} has an invalid selector \"{selector}\": {reason}")]
    InvalidSelector {
        source_name: String,
        selector: String,
        reason: String,
    },
}
