// src/sources/remoteok.rs

//! RemoteOK public API (single JSON array, first entry is a legal notice).

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{JobSource, SourceContext, decode_items, first_text, get_json};
use crate::error::Result;
use crate::models::NormalizedJob;
use crate::utils::resolve;

const NAME: &str = "RemoteOK";
const API_URL: &str = "https://remoteok.com/api";
const SITE_URL: &str = "https://remoteok.com";

pub struct RemoteOk;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Listing {
    id: Option<Value>,
    position: Option<String>,
    title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    location_text: Option<String>,
    description: Option<String>,
    tags_text: Option<String>,
    tags: Vec<String>,
    url: Option<String>,
    link: Option<String>,
    date: Option<String>,
    date_posted: Option<String>,
}

impl Listing {
    /// The metadata entry carries none of the listing identifiers.
    fn is_metadata(&self) -> bool {
        self.id.is_none() && self.company.is_none() && self.position.is_none()
    }

    fn into_job(self) -> Option<NormalizedJob> {
        if self.is_metadata() {
            return None;
        }

        let url = first_text([self.url, self.link]);
        let url = if url.starts_with('/') {
            resolve(SITE_URL, &url).unwrap_or(url)
        } else {
            url
        };

        Some(NormalizedJob {
            title: first_text([self.position, self.title]),
            company: self.company.unwrap_or_default(),
            location: first_text([self.location, self.location_text]),
            url,
            date_posted: first_text([self.date, self.date_posted]),
            description: first_text([self.description, self.tags_text]),
            tags: self.tags,
        })
    }
}

#[async_trait]
impl JobSource for RemoteOk {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, ctx: &SourceContext) -> Result<Vec<NormalizedJob>> {
        let items: Vec<Value> = get_json(NAME, API_URL, ctx.client.get(API_URL)).await?;

        let mut collector = ctx.collector();
        for listing in decode_items::<Listing>(NAME, items) {
            if collector.is_full() {
                break;
            }
            if let Some(job) = listing.into_job() {
                collector.offer(job);
            }
        }

        Ok(collector.finish(NAME))
    }
}
