// src/sources/remote_co.rs

//! Remote.co category pages (HTML, no public API).

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use super::html::{all_texts, card_href, card_summary, find_text, selector};
use super::{JobSource, SourceContext, get_html};
use crate::error::Result;
use crate::models::NormalizedJob;
use crate::utils::{http, resolve};

const NAME: &str = "Remote.co";
const SITE_URL: &str = "https://remote.co";

const CATEGORIES: [&str; 4] = [
    "software-development-jobs",
    "data-science-jobs",
    "artificial-intelligence-jobs",
    "machine-learning-jobs",
];
const MAX_PAGES: u32 = 5;
const PAGE_DELAY_MS: u64 = 2000;
const SUMMARY_CHARS: usize = 500;

pub struct RemoteCo;

/// Compiled selectors for a listing page.
struct CardSelectors {
    cards: Selector,
    fallback_cards: Selector,
    title: Selector,
    company: Selector,
    fallback_company: Selector,
    link: Selector,
    location: Selector,
    fallback_location: Selector,
    date: Selector,
    badges: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            cards: selector(r#"a[class*="job-item"]"#)?,
            fallback_cards: selector(r#"div[class*="job-card"]"#)?,
            title: selector("h2, h3, strong")?,
            company: selector(r#"span[class*="company"]"#)?,
            fallback_company: selector(r#"div[class*="company"]"#)?,
            link: selector("a[href]")?,
            location: selector(r#"span[class*="location"]"#)?,
            fallback_location: selector(r#"div[class*="location"]"#)?,
            date: selector(r#"span[class*="date"]"#)?,
            badges: selector(r#"span[class*="badge"], span[class*="tag"]"#)?,
        })
    }

    fn card(&self, card: &ElementRef) -> NormalizedJob {
        let url = card_href(card, &self.link)
            .map(|href| resolve(SITE_URL, &href).unwrap_or(href))
            .unwrap_or_default();

        NormalizedJob {
            title: find_text(card, &self.title).unwrap_or_default(),
            company: find_text(card, &self.company)
                .or_else(|| find_text(card, &self.fallback_company))
                .unwrap_or_default(),
            location: find_text(card, &self.location)
                .or_else(|| find_text(card, &self.fallback_location))
                .unwrap_or_default(),
            url,
            date_posted: find_text(card, &self.date).unwrap_or_default(),
            description: card_summary(card, SUMMARY_CHARS),
            tags: all_texts(card, &self.badges),
        }
    }
}

/// Extract every job card on a category page.
fn parse_page(html: &str) -> Result<Vec<NormalizedJob>> {
    let selectors = CardSelectors::new()?;
    let document = Html::parse_document(html);

    let mut cards: Vec<ElementRef> = document.select(&selectors.cards).collect();
    if cards.is_empty() {
        cards = document.select(&selectors.fallback_cards).collect();
    }

    Ok(cards.iter().map(|card| selectors.card(card)).collect())
}

#[async_trait]
impl JobSource for RemoteCo {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, ctx: &SourceContext) -> Result<Vec<NormalizedJob>> {
        let mut collector = ctx.collector();

        'categories: for category in CATEGORIES {
            for page in 1..=MAX_PAGES {
                if collector.is_full() {
                    break 'categories;
                }

                let url = format!("{SITE_URL}/remote-jobs/{category}?page={page}");
                let html = get_html(NAME, &ctx.client, &url).await?;
                let candidates = parse_page(&html)?;
                if candidates.is_empty() {
                    break;
                }

                for job in candidates {
                    if collector.is_full() {
                        break;
                    }
                    collector.offer(job);
                }

                http::pause(PAGE_DELAY_MS).await;
            }
        }

        Ok(collector.finish(NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <a class="card job-item" href="/job-details/ml-engineer-1">
            <h3>Machine Learning Engineer</h3>
            <span class="company-name">Acme AI</span>
            <span class="job-location">Worldwide</span>
            <span class="posted-date">2 days ago</span>
            <span class="badge">Full-Time</span>
            <span class="tag-item">Python</span>
          </a>
          <a class="card job-item" href="https://remote.co/job-details/2">
            <h3>Data Scientist</h3>
            <div class="company">Beta Corp</div>
          </a>
        </body></html>
    "#;

    #[test]
    fn test_parse_job_items() {
        let jobs = parse_page(PAGE).unwrap();
        assert_eq!(jobs.len(), 2);

        let first = &jobs[0];
        assert_eq!(first.title, "Machine Learning Engineer");
        assert_eq!(first.company, "Acme AI");
        assert_eq!(first.location, "Worldwide");
        assert_eq!(first.url, "https://remote.co/job-details/ml-engineer-1");
        assert_eq!(first.date_posted, "2 days ago");
        assert_eq!(first.tags, vec!["Full-Time", "Python"]);
        assert!(first.description.starts_with("Machine Learning Engineer Acme AI"));

        let second = &jobs[1];
        assert_eq!(second.company, "Beta Corp");
        assert_eq!(second.url, "https://remote.co/job-details/2");
        assert_eq!(second.clone().normalized().location, "Remote");
    }

    #[test]
    fn test_fallback_card_selector() {
        let html = r#"<div class="job-card"><strong>AI Engineer</strong>
            <span class="company">Acme</span><a href="/job/9">Apply</a></div>"#;
        let jobs = parse_page(html).unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "AI Engineer");
        assert_eq!(jobs[0].url, "https://remote.co/job/9");
    }

    #[test]
    fn test_page_without_cards() {
        assert!(parse_page("<html><body><p>No jobs</p></body></html>").unwrap().is_empty());
    }
}
