//! Data models for scraped headlines and author articles.
//!
//! This module defines the records produced by a single run:
//! - [`Source`]: The newspapers the scraper knows about
//! - [`Headline`]: A front-page title/link pair
//! - [`AuthorArticle`]: The latest article of a data-desk author, tagged with freshness
//! - [`SourceSection`] and [`RunReport`]: The per-source grouping handed to the outputs
//!
//! Nothing here is persisted across runs apart from the optional JSON snapshot.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A newspaper the scraper collects from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    ElMundo,
    ElConfidencial,
    ElDiario,
}

impl Source {
    /// Human readable name used in the report and in logs.
    pub fn display_name(self) -> &'static str {
        match self {
            Source::ElMundo => "El Mundo",
            Source::ElConfidencial => "El Confidencial",
            Source::ElDiario => "El Diario",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A front-page headline.
///
/// The title is never empty after trimming and the link is always absolute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Headline {
    /// The trimmed display text of the headline link.
    pub title: String,
    /// The absolute article URL.
    pub link: String,
    /// The newspaper the headline was scraped from.
    pub source: Source,
}

/// The most recent article of one configured author.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorArticle {
    pub title: String,
    pub link: String,
    /// Display name of the author, as configured.
    pub author: String,
    /// Whether the article looks like it was published today.
    pub is_new: bool,
}

/// Everything collected for one source during a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceSection {
    pub source: Source,
    /// Up to four front-page headlines, possibly empty.
    pub headlines: Vec<Headline>,
    /// One entry per author whose page resolved, in configuration order.
    pub author_articles: Vec<AuthorArticle>,
    /// Whether the source has any authors configured at all.
    pub has_authors: bool,
}

impl SourceSection {
    /// Number of author articles classified as new.
    pub fn new_article_count(&self) -> usize {
        self.author_articles.iter().filter(|a| a.is_new).count()
    }
}

/// The output of one run, grouped by source in configuration order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunReport {
    /// Local time the run started.
    pub generated_at: NaiveDateTime,
    pub sections: Vec<SourceSection>,
}

impl RunReport {
    /// Total front-page headlines across all sources.
    pub fn headline_count(&self) -> usize {
        self.sections.iter().map(|s| s.headlines.len()).sum()
    }

    /// Total author articles across all sources.
    pub fn author_article_count(&self) -> usize {
        self.sections.iter().map(|s| s.author_articles.len()).sum()
    }
}
