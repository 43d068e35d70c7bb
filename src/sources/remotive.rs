// src/sources/remotive.rs

//! Remotive remote jobs API with a server-side search pre-filter.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{JobSource, SourceContext, decode_items, first_text, get_json};
use crate::error::Result;
use crate::models::NormalizedJob;

const NAME: &str = "Remotive";
const API_URL: &str = "https://remotive.com/api/remote-jobs";
const SEARCH: &str = "AI OR machine learning OR LLM OR GenAI";
const CATEGORY: &str = "software-dev";
/// Over-fetch so the local filter still has enough candidates.
const OVERFETCH: usize = 3;

pub struct Remotive;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Page {
    jobs: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Listing {
    title: Option<String>,
    company_name: Option<String>,
    location: Option<String>,
    candidate_required_location: Option<String>,
    description: Option<String>,
    category: Option<String>,
    sub_category: Option<String>,
    url: Option<String>,
    publication_date: Option<String>,
    published_at: Option<String>,
    created_at: Option<String>,
}

impl Listing {
    fn into_job(self) -> NormalizedJob {
        let tags = [self.category, self.sub_category]
            .into_iter()
            .flatten()
            .collect();

        NormalizedJob {
            title: self.title.unwrap_or_default(),
            company: self.company_name.unwrap_or_default(),
            location: first_text([self.location, self.candidate_required_location]),
            url: self.url.unwrap_or_default(),
            date_posted: first_text([self.publication_date, self.published_at, self.created_at]),
            description: self.description.unwrap_or_default(),
            tags,
        }
    }
}

/// Listings to request for a per-board cap.
fn request_limit(cap: usize) -> usize {
    cap.saturating_mul(OVERFETCH)
}

#[async_trait]
impl JobSource for Remotive {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, ctx: &SourceContext) -> Result<Vec<NormalizedJob>> {
        let limit = request_limit(ctx.config.max_results_per_board);
        let request = ctx.client.get(API_URL).query(&[
            ("limit", limit.to_string()),
            ("search", SEARCH.to_string()),
            ("category", CATEGORY.to_string()),
        ]);
        let body: Page = get_json(NAME, API_URL, request).await?;

        let mut collector = ctx.collector();
        for listing in decode_items::<Listing>(NAME, body.jobs) {
            if collector.is_full() {
                break;
            }
            collector.offer(listing.into_job());
        }

        Ok(collector.finish(NAME))
    }
}
