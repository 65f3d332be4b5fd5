//! Latest article of a data-desk author.
//!
//! An author page lists that author's articles newest first. The source's
//! author cascade picks the first usable link on it, which is then tagged with
//! the freshness verdict. A page that cannot be fetched or matched yields no
//! article for this run; sibling authors are unaffected.

use crate::config::{AuthorConfig, SourceConfig};
use crate::models::AuthorArticle;
use crate::scrapers::cascade::{collapse_whitespace, element_text, resolve_link};
use crate::scrapers::fetch::PageFetcher;
use crate::scrapers::freshness::is_fresh;
use crate::utils::truncate_for_log;
use chrono::NaiveDateTime;
use scraper::{Html, Selector};
use tracing::{debug, error, info, instrument, warn};

/// Fetch an author page and pick its latest article.
///
/// # Arguments
///
/// * `fetcher` - Page source for the author URL
/// * `source` - Newspaper whose author cascade and base URL apply
/// * `author` - Author page to resolve
/// * `now` - Reference time for the freshness verdict
///
/// # Returns
///
/// The first article accepted by the author cascade, or `None` when the page
/// cannot be fetched or nothing on it matches. Failures are logged here.
#[instrument(level = "info", skip_all, fields(source = %source.id, author = %author.name))]
pub async fn resolve_author<F: PageFetcher>(
    fetcher: &F,
    source: &SourceConfig,
    author: &AuthorConfig,
    now: NaiveDateTime,
) -> Option<AuthorArticle> {
    let body = match fetcher.fetch_page(&author.url).await {
        Ok(body) => body,
        Err(e) => {
            error!(url = %e.url(), error = %e, "Author page fetch failed");
            return None;
        }
    };

    let document = Html::parse_document(&body);
    let article = select_author_article(&document, source, author, now);
    match &article {
        Some(a) => info!(title = %truncate_for_log(&a.title, 80), is_new = a.is_new, "Resolved author article"),
        None => warn!(url = %author.url, "No article matched on author page"),
    }
    article
}

/// Apply the source's author cascade to an already parsed author page.
///
/// Returns on the first element, across selectors in order, whose text and
/// link pass the source's author filter.
pub fn select_author_article(
    document: &Html,
    source: &SourceConfig,
    author: &AuthorConfig,
    now: NaiveDateTime,
) -> Option<AuthorArticle> {
    let cascade = &source.author_cascade;

    for raw_selector in &cascade.selectors {
        let selector = match Selector::parse(raw_selector) {
            Ok(selector) => selector,
            Err(e) => {
                warn!(source = %source.id, selector = %raw_selector, error = %e, "Skipping unparsable selector");
                continue;
            }
        };

        for element in document.select(&selector) {
            let title = element_text(&element);
            let href = element.value().attr("href").unwrap_or_default();
            if !cascade.filter.accept(&title, href) {
                continue;
            }

            let link = resolve_link(&source.base_url, href);
            let title = collapse_whitespace(&title);
            let is_new = is_fresh(&link, &title, now);
            debug!(selector = %raw_selector, %link, "Author cascade matched");
            return Some(AuthorArticle {
                title,
                link,
                author: author.name.clone(),
                is_new,
            });
        }
    }

    None
}
