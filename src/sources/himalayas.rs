// src/sources/himalayas.rs

//! Himalayas public jobs API, paged by offset with a keyword query.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{JobSource, SourceContext, decode_items, first_text, get_json};
use crate::error::Result;
use crate::models::NormalizedJob;
use crate::utils::{http, json_text};

const NAME: &str = "Himalayas";
const API_URL: &str = "https://himalayas.app/jobs/api";

/// Largest page the API serves.
const PAGE_SIZE: usize = 20;
const MAX_PAGES: usize = 10;
const PAGE_DELAY_MS: u64 = 500;
/// Job keywords folded into the API-side query.
const QUERY_KEYWORDS: usize = 5;

pub struct Himalayas;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Page {
    jobs: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Listing {
    title: Option<String>,
    company_name: Option<String>,
    location_restrictions: Vec<Value>,
    description: Option<String>,
    excerpt: Option<String>,
    categories: Vec<String>,
    seniority: Vec<String>,
    employment_type: Option<String>,
    application_link: Option<String>,
    pub_date: Option<Value>,
}

impl Listing {
    fn is_restricted(&self) -> bool {
        !self.location_restrictions.is_empty()
    }

    fn into_job(self) -> NormalizedJob {
        let location = self
            .location_restrictions
            .iter()
            .map(json_text)
            .collect::<Vec<_>>()
            .join(", ");

        let mut tags = self.categories;
        tags.extend(self.seniority);
        tags.extend(self.employment_type);

        NormalizedJob {
            title: self.title.unwrap_or_default(),
            company: self.company_name.unwrap_or_default(),
            location,
            url: self.application_link.unwrap_or_default(),
            date_posted: self.pub_date.as_ref().map(json_text).unwrap_or_default(),
            description: first_text([self.description, self.excerpt]),
            tags,
        }
    }
}

/// API-side pre-filter built from the first few job keywords.
fn search_query(job_keywords: &[String]) -> String {
    let terms: Vec<&str> = job_keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .take(QUERY_KEYWORDS)
        .collect();

    if terms.is_empty() {
        "AI".to_string()
    } else {
        terms.join(" OR ")
    }
}

#[async_trait]
impl JobSource for Himalayas {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, ctx: &SourceContext) -> Result<Vec<NormalizedJob>> {
        let query = search_query(&ctx.config.filter.job_keywords);
        let worldwide_only = ctx.config.worldwide_only;
        let mut collector = ctx.collector();

        for page in 0..MAX_PAGES {
            if collector.is_full() {
                break;
            }

            let offset = page * PAGE_SIZE;
            let request = ctx.client.get(API_URL).query(&[
                ("limit", PAGE_SIZE.to_string()),
                ("offset", offset.to_string()),
                ("q", query.clone()),
            ]);
            let body: Page = get_json(NAME, format!("offset {offset}"), request).await?;
            if body.jobs.is_empty() {
                break;
            }

            for listing in decode_items::<Listing>(NAME, body.jobs) {
                if collector.is_full() {
                    break;
                }
                if worldwide_only && listing.is_restricted() {
                    continue;
                }
                collector.offer(listing.into_job());
            }

            http::pause(PAGE_DELAY_MS).await;
        }

        Ok(collector.finish(NAME))
    }
}
