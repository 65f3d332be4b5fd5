//! Static source tables: where to scrape and which selectors to try.
//!
//! The built-in table covers the three newspapers. A YAML file with the same
//! shape can replace it at startup (`--config`). Tables are validated once and
//! never mutated afterwards.

use crate::error::ConfigError;
use crate::models::Source;
use crate::scrapers::filter::{AuthorFilter, HeadlineFilter, StrictFilter};
use scraper::Selector;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use url::Url;

/// One entry of a front-page selector cascade.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectorCandidate {
    /// CSS selector matching the headline `<a>` elements.
    pub selector: String,
    #[serde(default)]
    pub filter: HeadlineFilter,
}

impl SelectorCandidate {
    pub fn new(selector: &str, filter: HeadlineFilter) -> Self {
        Self {
            selector: selector.to_string(),
            filter,
        }
    }
}

/// A data-desk author and the page listing their articles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorConfig {
    pub url: String,
    pub name: String,
}

/// Ordered selectors tried on an author page until one yields a usable link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthorCascade {
    pub selectors: Vec<String>,
    #[serde(default)]
    pub filter: AuthorFilter,
}

/// Everything needed to scrape one newspaper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    pub id: Source,
    /// Scheme and host, used as the front page and to resolve relative links.
    pub base_url: String,
    #[serde(default)]
    pub authors: Vec<AuthorConfig>,
    pub headline_candidates: Vec<SelectorCandidate>,
    #[serde(default)]
    pub author_cascade: AuthorCascade,
}

impl SourceConfig {
    /// Reject tables that could never scrape anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl {
                source_name: self.id.to_string(),
            });
        }
        let invalid_base = |reason: String| ConfigError::InvalidBaseUrl {
            source_name: self.id.to_string(),
            base_url: self.base_url.clone(),
            reason,
        };
        let base = Url::parse(&self.base_url).map_err(|e| invalid_base(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid_base(format!("unsupported scheme {}", base.scheme())));
        }

        let selectors = self
            .headline_candidates
            .iter()
            .map(|c| c.selector.as_str())
            .chain(self.author_cascade.selectors.iter().map(String::as_str));
        for selector in selectors {
            if let Err(e) = Selector::parse(selector) {
                return Err(ConfigError::InvalidSelector {
                    source_name: self.id.to_string(),
                    selector: selector.to_string(),
                    reason: e.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SourceTable {
    sources: Vec<SourceConfig>,
}

/// Parse and validate a YAML source table.
///
/// `origin` only appears in error messages.
pub fn parse_sources(yaml: &str, origin: &str) -> Result<Vec<SourceConfig>, ConfigError> {
    let table: SourceTable = serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
        path: origin.to_string(),
        source,
    })?;
    for source in &table.sources {
        source.validate()?;
    }
    Ok(table.sources)
}

/// Load a YAML source table from disk.
#[instrument(level = "info")]
pub async fn load_sources(path: &str) -> Result<Vec<SourceConfig>, ConfigError> {
    let yaml = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
    let sources = parse_sources(&yaml, path)?;
    info!(count = sources.len(), "Loaded source table");
    Ok(sources)
}

/// The built-in table for El Mundo, El Confidencial and El Diario.
pub fn default_sources() -> Vec<SourceConfig> {
    vec![el_mundo(), el_confidencial(), el_diario()]
}

fn author(url: &str, name: &str) -> AuthorConfig {
    AuthorConfig {
        url: url.to_string(),
        name: name.to_string(),
    }
}

fn el_mundo() -> SourceConfig {
    let strict = HeadlineFilter::Strict(StrictFilter {
        author_prefixes: vec!["CARLOS".to_string()],
        section_prefixes: vec!["MUNDIAL".to_string()],
        excluded_substrings: vec!["comentarios".to_string()],
        excluded_link_suffixes: vec![".html#ancla_comentarios".to_string()],
        ..StrictFilter::default()
    });
    let selectors = [
        ".ue-c-cover-content__headline a",
        ".ue-c-cover-content__title a",
        ".ue-c-cover-content__link",
        "h1 a",
        "h2 a",
        "h3 a",
        ".headline a",
        ".title a",
    ];

    SourceConfig {
        id: Source::ElMundo,
        base_url: "https://www.elmundo.es".to_string(),
        authors: vec![
            author("https://www.elmundo.es/autor/maria-alcantara.html", "María Alcántara"),
            author("https://www.elmundo.es/autor/emilio-amade.html", "Emilio Amade"),
            author("https://www.elmundo.es/autor/javier-aguirre.html", "Javier Aguirre"),
            author("https://www.elmundo.es/autor/alberto-hernandez.html", "Alberto Hernández"),
        ],
        headline_candidates: selectors
            .iter()
            .map(|s| SelectorCandidate::new(s, strict.clone()))
            .collect(),
        author_cascade: AuthorCascade {
            selectors: vec![".ue-c-cover-content a[href]".to_string()],
            filter: AuthorFilter::default(),
        },
    }
}

fn el_confidencial() -> SourceConfig {
    let selectors = [
        ".gac-principal__titleLink",
        ".m-principal a",
        ".m-fotoCentral__titleSide a",
        ".c-85__titleSide a",
        ".article-title a",
        ".headline-title a",
        "h2 a",
        "h3 a",
        ".headline a",
        ".title a",
    ];

    SourceConfig {
        id: Source::ElConfidencial,
        base_url: "https://www.elconfidencial.com".to_string(),
        authors: vec![
            author(
                "https://www.elconfidencial.com/autores/miguel-angel-gavilanes-5390/",
                "Miguel Ángel Gavilanes",
            ),
            author("https://www.elconfidencial.com/autores/marta-ley-4163/", "Marta Ley"),
        ],
        headline_candidates: selectors
            .iter()
            .map(|s| SelectorCandidate::new(s, HeadlineFilter::Any))
            .collect(),
        author_cascade: AuthorCascade {
            selectors: vec![".archive-article-top-tit a".to_string()],
            filter: AuthorFilter::default(),
        },
    }
}

fn el_diario() -> SourceConfig {
    let selectors = [
        "h2 a",
        "h3 a",
        ".headline a",
        ".title a",
        ".article-title a",
        ".headline-title a",
    ];
    let nav_labels = ["euskadi", "economía", "política", "sociedad", "internacional"];

    SourceConfig {
        id: Source::ElDiario,
        base_url: "https://www.eldiario.es".to_string(),
        authors: vec![
            author("https://www.eldiario.es/autores/raul_sanchez/", "Raúl Sánchez"),
            author("https://www.eldiario.es/autores/victoria_oliveres/", "Victoria Oliveres"),
        ],
        headline_candidates: selectors
            .iter()
            .map(|s| SelectorCandidate::new(s, HeadlineFilter::Any))
            .collect(),
        author_cascade: AuthorCascade {
            selectors: vec![
                ".article-author-cont h2 a".to_string(),
                ".article-author-cont h3 a".to_string(),
                ".article-author-cont .title a".to_string(),
                ".article-author-cont a[href*=\"/\"]".to_string(),
                ".article-author-cont a".to_string(),
            ],
            filter: AuthorFilter {
                nav_labels: nav_labels.iter().map(|l| l.to_string()).collect(),
                ..AuthorFilter::default()
            },
        },
    }
}
