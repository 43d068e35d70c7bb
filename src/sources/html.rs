// src/sources/html.rs

//! Shared helpers for the HTML-scraped boards.

use scraper::{ElementRef, Selector};

use crate::error::{AppError, Result};
use crate::utils::{normalize_whitespace, truncate_chars};

/// Parse a CSS selector, mapping failures to [`AppError::Selector`].
pub(super) fn selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// All text below an element, whitespace-collapsed.
pub(super) fn element_text(element: &ElementRef) -> String {
    normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Text of the first descendant matching `sel`, if any.
pub(super) fn find_text(element: &ElementRef, sel: &Selector) -> Option<String> {
    element
        .select(sel)
        .next()
        .map(|e| element_text(&e))
        .filter(|t| !t.is_empty())
}

/// Texts of every descendant matching `sel`, blanks dropped.
pub(super) fn all_texts(element: &ElementRef, sel: &Selector) -> Vec<String> {
    element
        .select(sel)
        .map(|e| element_text(&e))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Card text used as a stand-in description.
pub(super) fn card_summary(element: &ElementRef, max_chars: usize) -> String {
    truncate_chars(&element_text(element), max_chars)
}

/// The element's own `href`, or the first linked descendant's.
pub(super) fn card_href(element: &ElementRef, link_sel: &Selector) -> Option<String> {
    element
        .value()
        .attr("href")
        .or_else(|| {
            element
                .select(link_sel)
                .next()
                .and_then(|a| a.value().attr("href"))
        })
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_parse_selector_valid() {
        assert!(selector("div.class").is_ok());
        assert!(selector(r#"a[class*="job-card"]"#).is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(selector("[[invalid").is_err());
    }

    #[test]
    fn test_text_helpers() {
        let doc = Html::parse_fragment(
            r#"<div id="card"><h2>  AI
                Engineer </h2><span class="badge">Full-Time</span><span class="badge"> </span></div>"#,
        );
        let card = doc.select(&selector("#card").unwrap()).next().unwrap();

        assert_eq!(
            find_text(&card, &selector("h2").unwrap()),
            Some("AI Engineer".to_string())
        );
        assert_eq!(find_text(&card, &selector("h3").unwrap()), None);
        assert_eq!(
            all_texts(&card, &selector(".badge").unwrap()),
            vec!["Full-Time"]
        );
        assert_eq!(card_summary(&card, 5), "AI En");
    }

    #[test]
    fn test_card_href_prefers_own_attribute() {
        let doc = Html::parse_fragment(
            r#"<a id="own" href="/jobs/1"><span>x</span></a><div id="nested"><a href="/jobs/2">y</a></div>"#,
        );
        let link = selector("a[href]").unwrap();

        let nested = doc.select(&selector("#nested").unwrap()).next().unwrap();
        assert_eq!(card_href(&nested, &link), Some("/jobs/2".to_string()));

        let own = doc.select(&selector("#own").unwrap()).next().unwrap();
        assert_eq!(card_href(&own, &link), Some("/jobs/1".to_string()));
    }
}
