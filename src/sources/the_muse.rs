// src/sources/the_muse.rs

//! The Muse public jobs API, walked per category and seniority level.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{JobSource, SourceContext, decode_items, get_json, id_text};
use crate::error::Result;
use crate::models::NormalizedJob;
use crate::utils::location;

const NAME: &str = "The Muse";
const API_URL: &str = "https://www.themuse.com/api/public/jobs";

const CATEGORIES: [&str; 2] = ["Data Science", "Software Engineer"];
const LEVELS: [&str; 2] = ["Senior Level", "Manager"];
const MAX_PAGES: u32 = 3;

pub struct TheMuse;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Page {
    results: Vec<Value>,
    page_count: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Named {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Refs {
    landing_page: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Listing {
    id: Option<Value>,
    name: Option<String>,
    company: Option<Named>,
    locations: Vec<Named>,
    contents: Option<String>,
    refs: Option<Refs>,
    publication_date: Option<String>,
    categories: Vec<Named>,
}

impl Listing {
    fn location_names(&self) -> Vec<String> {
        self.locations
            .iter()
            .filter_map(|l| l.name.clone())
            .filter(|n| !n.trim().is_empty())
            .collect()
    }

    /// The board is not remote-only: keep listings without a location or
    /// with a remote/flexible one.
    fn is_remote(&self) -> bool {
        location::any_remote_or_flexible(&self.location_names())
    }

    fn into_job(self) -> NormalizedJob {
        let location = self.location_names().join(", ");
        NormalizedJob {
            title: self.name.unwrap_or_default(),
            company: self.company.and_then(|c| c.name).unwrap_or_default(),
            location,
            url: self.refs.and_then(|r| r.landing_page).unwrap_or_default(),
            date_posted: self.publication_date.unwrap_or_default(),
            description: self.contents.unwrap_or_default(),
            tags: self.categories.into_iter().filter_map(|c| c.name).collect(),
        }
    }
}

#[async_trait]
impl JobSource for TheMuse {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, ctx: &SourceContext) -> Result<Vec<NormalizedJob>> {
        let mut collector = ctx.collector();

        'combos: for category in CATEGORIES {
            for level in LEVELS {
                for page in 0..MAX_PAGES {
                    if collector.is_full() {
                        break 'combos;
                    }

                    let request = ctx.client.get(API_URL).query(&[
                        ("category", category.to_string()),
                        ("level", level.to_string()),
                        ("page", page.to_string()),
                    ]);
                    let context = format!("category {category:?} level {level:?} page {page}");
                    let body: Page = get_json(NAME, context, request).await?;
                    if body.results.is_empty() {
                        break;
                    }

                    for listing in decode_items::<Listing>(NAME, body.results) {
                        if collector.is_full() {
                            break;
                        }
                        if !collector.first_sighting(&id_text(listing.id.as_ref())) {
                            continue;
                        }
                        if !listing.is_remote() {
                            continue;
                        }
                        collector.offer(listing.into_job());
                    }

                    if page + 1 >= body.page_count.max(1) {
                        break;
                    }
                }
            }
        }

        Ok(collector.finish(NAME))
    }
}
