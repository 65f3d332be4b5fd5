//! "Published today" heuristic for author articles.
//!
//! Two independent checks, either one sufficient:
//! 1. the link contains today's date in one of the URL layouts newspapers use
//! 2. the title contains an urgency word
//!
//! An urgency word in an old article still reads as fresh. That is accepted.

use chrono::NaiveDateTime;

/// Lower-case urgency words: today, current, latest, breaking, now.
const URGENCY_KEYWORDS: [&str; 5] = ["hoy", "actual", "última hora", "breaking", "ahora"];

/// Date layouts looked up verbatim inside article links.
const URL_DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d", "%Y/%m"];

/// Classify an article as published on the day of `now`.
pub fn is_fresh(link: &str, title: &str, now: NaiveDateTime) -> bool {
    link_has_date(link, now) || title_has_urgency(title)
}

fn link_has_date(link: &str, now: NaiveDateTime) -> bool {
    URL_DATE_FORMATS
        .iter()
        .any(|fmt| link.contains(&now.format(fmt).to_string()))
}

fn title_has_urgency(title: &str) -> bool {
    let lowered = title.to_lowercase();
    URGENCY_KEYWORDS.iter().any(|word| lowered.contains(word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn june_20() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 20)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_dashed_date_in_link() {
        assert!(is_fresh(
            "https://example.com/news/2025-06-20/story",
            "Local council meeting",
            june_20()
        ));
    }

    #[test]
    fn test_all_date_layouts() {
        let now = june_20();
        assert!(is_fresh("https://x.es/20250620/a.html", "Sin palabras clave", now));
        assert!(is_fresh("https://x.es/espana/2025/06/20/a.html", "Sin palabras clave", now));
        // month-level path counts as today
        assert!(is_fresh("https://x.es/espana/2025/06/a.html", "Sin palabras clave", now));
    }

    #[test]
    fn test_no_date_no_keyword_is_stale() {
        assert!(!is_fresh(
            "https://example.com/news/123",
            "Local council meeting",
            june_20()
        ));
    }

    #[test]
    fn test_other_day_is_stale() {
        assert!(!is_fresh(
            "https://x.es/espana/2025/05/19/a.html",
            "Local council meeting",
            june_20()
        ));
    }

    #[test]
    fn test_keyword_only() {
        let now = june_20();
        assert!(is_fresh("https://example.com/news/123", "Breaking: storm hits coast", now));
        assert!(is_fresh("https://x.es/a", "ÚLTIMA HORA del temporal", now));
        assert!(is_fresh("https://x.es/a", "Lo que sabemos hoy del juicio", now));
        assert!(is_fresh("https://x.es/a", "La situación actual del paro", now));
    }

    #[test]
    fn test_deterministic_for_injected_now() {
        let link = "https://x.es/2025/06/20/a.html";
        let a = is_fresh(link, "Titular", june_20());
        let b = is_fresh(link, "Titular", june_20());
        assert_eq!(a, b);
        let next_year = NaiveDate::from_ymd_opt(2026, 6, 20)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert!(!is_fresh(link, "Titular", next_year));
    }
}
