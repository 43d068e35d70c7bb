// src/sources/greenhouse.rs

//! Greenhouse job boards of AI/ML companies.
//!
//! Each company exposes `boards-api.greenhouse.io/v1/boards/<slug>/jobs`
//! without authentication. Boards list office roles too, so only remote
//! locations are kept. Descriptions need a second request per job and are
//! left empty.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{JobSource, SourceContext, decode_items, first_text, get_json, id_text};
use crate::error::Result;
use crate::models::NormalizedJob;
use crate::utils::{http, location};

const NAME: &str = "Greenhouse";
const API_BASE: &str = "https://boards-api.greenhouse.io/v1/boards";
const BOARD_DELAY_MS: u64 = 300;

pub struct Greenhouse;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Board {
    jobs: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Listing {
    id: Option<Value>,
    title: Option<String>,
    company_name: Option<String>,
    location: Option<Location>,
    absolute_url: Option<String>,
    first_published: Option<String>,
    updated_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Location {
    name: Option<String>,
}

impl Listing {
    fn location_name(&self) -> &str {
        self.location
            .as_ref()
            .and_then(|l| l.name.as_deref())
            .unwrap_or_default()
    }

    fn into_job(self, board: &str) -> NormalizedJob {
        let location = self.location_name().to_string();
        NormalizedJob {
            title: self.title.unwrap_or_default(),
            company: first_text([self.company_name, Some(board.to_string())]),
            location,
            url: self.absolute_url.unwrap_or_default(),
            date_posted: first_text([self.first_published, self.updated_at]),
            description: String::new(),
            tags: Vec::new(),
        }
    }
}

#[async_trait]
impl JobSource for Greenhouse {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, ctx: &SourceContext) -> Result<Vec<NormalizedJob>> {
        let worldwide_only = ctx.config.worldwide_only;
        let mut collector = ctx.collector();

        for board in &ctx.config.greenhouse_boards {
            if collector.is_full() {
                break;
            }

            let url = format!("{API_BASE}/{board}/jobs");
            let body: Board =
                get_json(NAME, format!("board {board:?}"), ctx.client.get(&url)).await?;
            http::pause(BOARD_DELAY_MS).await;

            for listing in decode_items::<Listing>(NAME, body.jobs) {
                if collector.is_full() {
                    break;
                }
                if !collector.first_sighting(&id_text(listing.id.as_ref())) {
                    continue;
                }
                if !location::accepts_remote_location(listing.location_name(), worldwide_only) {
                    continue;
                }
                collector.offer(listing.into_job(board));
            }
        }

        Ok(collector.finish(NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_falls_back_to_board_slug() {
        let listing: Listing = serde_json::from_value(json!({
            "id": 4001,
            "title": "Research Engineer",
            "location": {"name": "Remote"},
            "absolute_url": "https://job-boards.greenhouse.io/acme/jobs/4001",
            "updated_at": "2025-03-01T00:00:00-05:00"
        }))
        .unwrap();

        assert_eq!(listing.location_name(), "Remote");
        let job = listing.into_job("acme");
        assert_eq!(job.company, "acme");
        assert_eq!(job.date_posted, "2025-03-01T00:00:00-05:00");
        assert!(job.description.is_empty());
    }

    #[test]
    fn test_missing_location_is_blank() {
        let listing: Listing =
            serde_json::from_value(json!({"title": "Engineer", "location": null})).unwrap();
        assert_eq!(listing.location_name(), "");
        assert!(!location::accepts_remote_location(listing.location_name(), true));
    }
}
