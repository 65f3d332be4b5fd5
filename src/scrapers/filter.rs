//! Acceptance rules applied to each candidate element before it becomes a record.
//!
//! Filters are plain data so a source table can carry them in YAML. Every
//! `accept` method is pure: it only reads its arguments.

use serde::{Deserialize, Serialize};

/// Minimum number of characters a title must exceed to count as a story.
pub const MIN_TITLE_CHARS: usize = 10;

/// Per-candidate headline filter.
///
/// `Any` leans on selector specificity and accepts every element with text.
/// `Strict` applies the full rule set of [`StrictFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeadlineFilter {
    #[default]
    Any,
    Strict(StrictFilter),
}

impl HeadlineFilter {
    /// Decide whether a trimmed title and its raw link form a headline.
    pub fn accept(&self, title: &str, link: &str) -> bool {
        match self {
            HeadlineFilter::Any => true,
            HeadlineFilter::Strict(strict) => strict.accept(title, link),
        }
    }
}

/// Rule set for front pages whose generic selectors also match bylines,
/// section banners and comment counters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StrictFilter {
    /// Titles must have strictly more characters than this.
    pub min_title_chars: usize,
    /// Reject titles written entirely in upper case (section banners).
    pub reject_upper_case: bool,
    /// Bylines that share a selector with real headlines.
    pub author_prefixes: Vec<String>,
    /// Section markers such as a sports banner.
    pub section_prefixes: Vec<String>,
    /// Matched case-insensitively anywhere in the title.
    pub excluded_substrings: Vec<String>,
    /// Links ending with one of these point at a comment anchor.
    pub excluded_link_suffixes: Vec<String>,
}

impl Default for StrictFilter {
    fn default() -> Self {
        Self {
            min_title_chars: MIN_TITLE_CHARS,
            reject_upper_case: true,
            author_prefixes: Vec::new(),
            section_prefixes: Vec::new(),
            excluded_substrings: Vec::new(),
            excluded_link_suffixes: Vec::new(),
        }
    }
}

impl StrictFilter {
    pub fn accept(&self, title: &str, link: &str) -> bool {
        let lowered = title.to_lowercase();

        title.chars().count() > self.min_title_chars
            && !(self.reject_upper_case && is_upper_case(title))
            && !self.author_prefixes.iter().any(|p| title.starts_with(p.as_str()))
            && !self
                .excluded_substrings
                .iter()
                .any(|s| lowered.contains(&s.to_lowercase()))
            && !self.section_prefixes.iter().any(|p| title.starts_with(p.as_str()))
            && !link.is_empty()
            && !self
                .excluded_link_suffixes
                .iter()
                .any(|s| link.ends_with(s.as_str()))
    }
}

/// Relevance rules for the single result taken from an author page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthorFilter {
    pub min_title_chars: usize,
    /// Navigation category labels, compared against the lower-cased title.
    pub nav_labels: Vec<String>,
}

impl Default for AuthorFilter {
    fn default() -> Self {
        Self {
            min_title_chars: MIN_TITLE_CHARS,
            nav_labels: Vec::new(),
        }
    }
}

impl AuthorFilter {
    pub fn accept(&self, title: &str, link: &str) -> bool {
        let lowered = title.to_lowercase();

        !title.is_empty()
            && title.chars().count() > self.min_title_chars
            && link.contains('/')
            && !link.starts_with('#')
            && !self.nav_labels.iter().any(|label| label.to_lowercase() == lowered)
    }
}

/// True when the text has at least one cased character and none in lower case.
fn is_upper_case(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el_mundo_filter() -> StrictFilter {
        StrictFilter {
            author_prefixes: vec!["CARLOS".to_string()],
            section_prefixes: vec!["MUNDIAL".to_string()],
            excluded_substrings: vec!["comentarios".to_string()],
            excluded_link_suffixes: vec![".html#ancla_comentarios".to_string()],
            ..StrictFilter::default()
        }
    }

    const LINK: &str = "/espana/2025/06/20/noticia.html";

    #[test]
    fn test_strict_accepts_regular_headline() {
        let f = el_mundo_filter();
        assert!(f.accept("El Gobierno aprueba los presupuestos", LINK));
    }

    #[test]
    fn test_strict_rejects_short_titles() {
        let f = el_mundo_filter();
        assert!(!f.accept("Directo", LINK));
        // exactly ten characters is still too short
        assert!(!f.accept("Diez letra", LINK));
        assert!(f.accept("Once letras", LINK));
    }

    #[test]
    fn test_strict_counts_characters_not_bytes() {
        let f = el_mundo_filter();
        // nine characters, eighteen bytes
        assert!(!f.accept("ñññññññññ", LINK));
    }

    #[test]
    fn test_strict_rejects_upper_case_banners() {
        let f = el_mundo_filter();
        assert!(!f.accept("ELECCIONES GENERALES 2025", LINK));
        assert!(f.accept("OTAN aprueba el nuevo gasto", LINK));
    }

    #[test]
    fn test_strict_upper_case_check_can_be_disabled() {
        let f = StrictFilter {
            reject_upper_case: false,
            ..el_mundo_filter()
        };
        assert!(f.accept("ELECCIONES GENERALES 2025", LINK));
    }

    #[test]
    fn test_strict_rejects_bylines_and_sections() {
        let f = el_mundo_filter();
        assert!(!f.accept("CARLOS Segovia escribe sobre el Congreso", LINK));
        assert!(!f.accept("MUNDIAL de Clubes: el Madrid gana", LINK));
    }

    #[test]
    fn test_strict_rejects_comment_widgets() {
        let f = el_mundo_filter();
        assert!(!f.accept("Ver 123 Comentarios de lectores", LINK));
        assert!(!f.accept(
            "El Gobierno aprueba los presupuestos",
            "/espana/2025/06/20/noticia.html#ancla_comentarios"
        ));
    }

    #[test]
    fn test_strict_requires_link() {
        let f = el_mundo_filter();
        assert!(!f.accept("El Gobierno aprueba los presupuestos", ""));
    }

    #[test]
    fn test_accept_is_pure() {
        let f = HeadlineFilter::Strict(el_mundo_filter());
        let title = String::from("El Gobierno aprueba los presupuestos");
        let link = String::from(LINK);
        let first = f.accept(&title, &link);
        for _ in 0..5 {
            assert_eq!(f.accept(&title, &link), first);
        }
        assert_eq!(title, "El Gobierno aprueba los presupuestos");
        assert_eq!(link, LINK);
    }

    #[test]
    fn test_any_accepts_everything() {
        let f = HeadlineFilter::Any;
        assert!(f.accept("x", ""));
        assert!(f.accept("MUNDIAL", "#"));
    }

    #[test]
    fn test_author_filter_rules() {
        let f = AuthorFilter {
            nav_labels: vec!["Economía".to_string(), "política".to_string()],
            ..AuthorFilter::default()
        };
        assert!(f.accept("La desigualdad en datos", "/economia/desigualdad_1_100.html"));
        assert!(!f.accept("Corto", "/economia/a.html"));
        assert!(!f.accept("Un título largo sin ruta", "articulo"));
        assert!(!f.accept("Un título largo con ancla", "#/ancla"));
        assert!(!f.accept("", "/economia/"));
    }

    #[test]
    fn test_author_filter_nav_labels_ignore_case() {
        let f = AuthorFilter {
            min_title_chars: 0,
            nav_labels: vec!["economía".to_string(), "Política".to_string()],
        };
        assert!(!f.accept("ECONOMÍA", "/economia/"));
        assert!(!f.accept("política", "/politica/"));
        assert!(f.accept("Economía del dato", "/economia/dato"));
    }

    #[test]
    fn test_headline_filter_yaml_shape() {
        let yaml = "kind: strict\nauthor_prefixes: [CARLOS]\n";
        let f: HeadlineFilter = serde_yaml::from_str(yaml).unwrap();
        match f {
            HeadlineFilter::Strict(s) => {
                assert_eq!(s.author_prefixes, vec!["CARLOS".to_string()]);
                assert_eq!(s.min_title_chars, MIN_TITLE_CHARS);
                assert!(s.reject_upper_case);
            }
            HeadlineFilter::Any => panic!("expected strict filter"),
        }
        let any: HeadlineFilter = serde_yaml::from_str("kind: any").unwrap();
        assert_eq!(any, HeadlineFilter::Any);
    }
}
