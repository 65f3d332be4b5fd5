//! Front-page selector cascade.
//!
//! Candidates are tried in priority order. Each one contributes matching
//! elements (in document order) that pass its filter, until the limit is
//! reached. Once the limit is hit no further element or candidate is looked
//! at. A page that matches nothing produces an empty list.

use crate::config::{SelectorCandidate, SourceConfig};
use crate::models::{Headline, Source};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Front-page headlines kept per source.
pub const HEADLINE_LIMIT: usize = 4;

/// Run a source's headline cascade against its parsed front page.
pub fn match_headlines(document: &Html, source: &SourceConfig, limit: usize) -> Vec<Headline> {
    match_candidates(
        document,
        source.id,
        &source.base_url,
        &source.headline_candidates,
        limit,
        |candidate, title, link| candidate.filter.accept(title, link),
    )
}

/// Walk `candidates` in order and collect at most `limit` headlines.
///
/// `accept` is consulted once per element with non-empty text, with the
/// trimmed title and the raw `href`.
///
/// # Arguments
///
/// * `document` - Parsed front page
/// * `source` - Newspaper stamped on every headline
/// * `base_url` - Absolute URL relative links are resolved against
/// * `candidates` - Selectors in priority order
/// * `limit` - Maximum number of headlines to return
/// * `accept` - Filter called with the candidate, title and raw link
///
/// # Returns
///
/// Accepted headlines in candidate order, then document order, never more
/// than `limit`. Candidates whose selector does not parse are skipped.
pub fn match_candidates<F>(
    document: &Html,
    source: Source,
    base_url: &str,
    candidates: &[SelectorCandidate],
    limit: usize,
    mut accept: F,
) -> Vec<Headline>
where
    F: FnMut(&SelectorCandidate, &str, &str) -> bool,
{
    let mut headlines = Vec::with_capacity(limit);
    if limit == 0 {
        return headlines;
    }

    for candidate in candidates {
        let selector = match Selector::parse(&candidate.selector) {
            Ok(selector) => selector,
            Err(e) => {
                warn!(%source, selector = %candidate.selector, error = %e, "Skipping unparsable selector");
                continue;
            }
        };

        let before = headlines.len();
        for element in document.select(&selector) {
            let title = element_text(&element);
            if title.is_empty() {
                continue;
            }
            let href = element.value().attr("href").unwrap_or_default();
            if !accept(candidate, &title, href) {
                continue;
            }

            headlines.push(Headline {
                title: collapse_whitespace(&title),
                link: resolve_link(base_url, href),
                source,
            });
            if headlines.len() >= limit {
                break;
            }
        }

        debug!(
            %source,
            selector = %candidate.selector,
            accepted = headlines.len() - before,
            "Selector candidate done"
        );
        if headlines.len() >= limit {
            break;
        }
    }

    headlines
}

/// All descendant text of an element, trimmed at both ends.
///
/// Inner whitespace is kept as found, so length and prefix rules see the
/// text exactly as the page has it.
pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Collapse whitespace runs to single spaces for display.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

/// Make a scraped `href` absolute.
///
/// Links starting with `http` are returned untouched; anything else is
/// resolved against `base_url`.
pub fn resolve_link(base_url: &str, raw: &str) -> String {
    if raw.starts_with("http") {
        return raw.to_string();
    }
    match Url::parse(base_url).and_then(|base| base.join(raw)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => format!("{base_url}{raw}"),
    }
}
