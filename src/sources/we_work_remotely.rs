// src/sources/we_work_remotely.rs

//! We Work Remotely category pages (HTML, no public API).

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};

use super::html::{all_texts, card_summary, find_text, selector};
use super::{JobSource, SourceContext, get_html};
use crate::error::Result;
use crate::models::NormalizedJob;
use crate::utils::{http, resolve};

const NAME: &str = "We Work Remotely";
const SITE_URL: &str = "https://weworkremotely.com";

const CATEGORIES: [&str; 3] = [
    "remote-software-development-jobs",
    "remote-devops-jobs",
    "remote-data-science-jobs",
];
const PAGE_DELAY_MS: u64 = 2000;
const SUMMARY_CHARS: usize = 500;

pub struct WeWorkRemotely;

struct CardSelectors {
    cards: Selector,
    fallback_cards: Selector,
    title: Selector,
    company: Selector,
    fallback_company: Selector,
    date: Selector,
    badges: Selector,
    location: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            cards: selector(r#"a[class*="job-card"]"#)?,
            fallback_cards: selector(r#"a[href*="/remote-jobs/"]"#)?,
            title: selector("h2, h3, strong")?,
            company: selector(r#"span[class*="company"]"#)?,
            fallback_company: selector("strong")?,
            date: selector(r#"span[class*="date"]"#)?,
            badges: selector(r#"span[class*="badge"]"#)?,
            location: selector(r#"span[class*="location"], span[class*="region"]"#)?,
        })
    }

    fn card(&self, card: &ElementRef) -> NormalizedJob {
        let url = card
            .value()
            .attr("href")
            .map(|href| resolve(SITE_URL, href).unwrap_or_else(|| href.to_string()))
            .unwrap_or_default();

        NormalizedJob {
            title: find_text(card, &self.title).unwrap_or_default(),
            company: find_text(card, &self.company)
                .or_else(|| find_text(card, &self.fallback_company))
                .unwrap_or_default(),
            location: find_text(card, &self.location).unwrap_or_default(),
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
impl JobSource for WeWorkRemotely {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, ctx: &SourceContext) -> Result<Vec<NormalizedJob>> {
        let mut collector = ctx.collector();

        for category in CATEGORIES {
            if collector.is_full() {
                break;
            }

            let url = format!("{SITE_URL}/categories/{category}");
            let html = get_html(NAME, &ctx.client, &url).await?;

            for job in parse_page(&html)? {
                if collector.is_full() {
                    break;
                }
                collector.offer(job);
            }

            http::pause(PAGE_DELAY_MS).await;
        }

        Ok(collector.finish(NAME))
    }
}
