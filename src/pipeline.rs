//! One collection run across every configured source.
//!
//! Each front page and each author page is an independent unit of work. Units
//! go through a `buffered` stream so at most `concurrency` fetches are in
//! flight, while results keep their submission order. With a concurrency of
//! one the run is strictly sequential.

use crate::config::{AuthorConfig, SourceConfig};
use crate::models::{AuthorArticle, Headline, RunReport, SourceSection};
use crate::scrapers::author::resolve_author;
use crate::scrapers::cascade::{HEADLINE_LIMIT, match_headlines};
use crate::scrapers::fetch::PageFetcher;
use chrono::NaiveDateTime;
use futures::stream::{self, StreamExt};
use scraper::Html;
use tracing::{error, info, instrument};

/// Collect headlines and author articles for every source.
///
/// # Arguments
///
/// * `fetcher` - Page source shared by every unit of work
/// * `sources` - Source table, in report order
/// * `now` - Reference time for freshness verdicts and the report stamp
/// * `concurrency` - Maximum fetches in flight; values below 1 count as 1
///
/// # Returns
///
/// One [`SourceSection`] per source in table order. Sources or authors that
/// failed contribute empty lists.
#[instrument(level = "info", skip_all, fields(sources = sources.len(), concurrency = concurrency))]
pub async fn collect<F: PageFetcher>(
    fetcher: &F,
    sources: &[SourceConfig],
    now: NaiveDateTime,
    concurrency: usize,
) -> RunReport {
    let concurrency = concurrency.max(1);

    let headlines: Vec<Vec<Headline>> = stream::iter(sources)
        .map(|source| scrape_front_page(fetcher, source))
        .buffered(concurrency)
        .collect()
        .await;

    let author_units: Vec<(usize, &SourceConfig, &AuthorConfig)> = sources
        .iter()
        .enumerate()
        .flat_map(|(index, source)| source.authors.iter().map(move |a| (index, source, a)))
        .collect();
    let resolved: Vec<(usize, Option<AuthorArticle>)> = stream::iter(author_units)
        .map(|(index, source, author)| async move {
            (index, resolve_author(fetcher, source, author, now).await)
        })
        .buffered(concurrency)
        .collect()
        .await;

    let mut author_articles: Vec<Vec<AuthorArticle>> = vec![Vec::new(); sources.len()];
    for (index, article) in resolved {
        if let Some(article) = article {
            author_articles[index].push(article);
        }
    }

    let sections: Vec<SourceSection> = sources
        .iter()
        .zip(headlines)
        .zip(author_articles)
        .map(|((source, headlines), author_articles)| SourceSection {
            source: source.id,
            headlines,
            author_articles,
            has_authors: !source.authors.is_empty(),
        })
        .collect();

    let report = RunReport {
        generated_at: now,
        sections,
    };
    info!(
        headlines = report.headline_count(),
        author_articles = report.author_article_count(),
        "Collection run complete"
    );
    report
}

/// Fetch a source's front page and run its headline cascade.
#[instrument(level = "info", skip_all, fields(source = %source.id))]
pub async fn scrape_front_page<F: PageFetcher>(fetcher: &F, source: &SourceConfig) -> Vec<Headline> {
    let body = match fetcher.fetch_page(&source.base_url).await {
        Ok(body) => body,
        Err(e) => {
            error!(url = %e.url(), error = %e, "Front page fetch failed");
            return Vec::new();
        }
    };

    let document = Html::parse_document(&body);
    let headlines = match_headlines(&document, source, HEADLINE_LIMIT);
    info!(count = headlines.len(), "Extracted headlines");
    headlines
}
