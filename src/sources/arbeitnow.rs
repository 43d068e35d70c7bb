// src/sources/arbeitnow.rs

//! Arbeitnow job board API, remote listings only.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{JobSource, SourceContext, decode_items, get_json};
use crate::error::Result;
use crate::models::NormalizedJob;
use crate::utils::{http, json_text};

const NAME: &str = "Arbeitnow";
const API_URL: &str = "https://arbeitnow.com/api/job-board-api";

/// One broad term; the local filter does the precise matching.
const SEARCH_TERM: &str = "AI engineer";
/// The API rate-limits aggressively beyond a few pages.
const MAX_PAGES: u32 = 3;
const PAGE_DELAY_MS: u64 = 1000;

pub struct Arbeitnow;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Page {
    data: Vec<Value>,
    links: Links,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Links {
    next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Listing {
    slug: Option<String>,
    title: Option<String>,
    company_name: Option<String>,
    location: Option<String>,
    description: Option<String>,
    url: Option<String>,
    created_at: Option<Value>,
    tags: Vec<String>,
    remote: bool,
}

impl Listing {
    fn into_job(self) -> NormalizedJob {
        NormalizedJob {
            title: self.title.unwrap_or_default(),
            company: self.company_name.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            date_posted: self.created_at.as_ref().map(json_text).unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            tags: self.tags,
        }
    }
}

#[async_trait]
impl JobSource for Arbeitnow {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, ctx: &SourceContext) -> Result<Vec<NormalizedJob>> {
        let mut collector = ctx.collector();

        for page in 1..=MAX_PAGES {
            if collector.is_full() {
                break;
            }

            let request = ctx.client.get(API_URL).query(&[
                ("search", SEARCH_TERM.to_string()),
                ("remote", "true".to_string()),
                ("page", page.to_string()),
            ]);
            let body: Page = get_json(NAME, format!("page {page}"), request).await?;
            http::pause(PAGE_DELAY_MS).await;

            if body.data.is_empty() {
                break;
            }

            for listing in decode_items::<Listing>(NAME, body.data) {
                if collector.is_full() {
                    break;
                }
                if !listing.remote {
                    continue;
                }
                if !collector.first_sighting(listing.slug.as_deref().unwrap_or_default()) {
                    continue;
                }
                collector.offer(listing.into_job());
            }

            if body.links.next.is_none() {
                break;
            }
        }

        Ok(collector.finish(NAME))
    }
}
