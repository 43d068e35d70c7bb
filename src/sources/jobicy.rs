// src/sources/jobicy.rs

//! Jobicy remote jobs API, queried once per search tag.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{JobSource, OneOrMany, SourceContext, decode_items, first_text, get_json, id_text};
use crate::error::Result;
use crate::models::NormalizedJob;
use crate::utils::decode_entities;

const NAME: &str = "Jobicy";
const API_URL: &str = "https://jobicy.com/api/v2/remote-jobs";
const PAGE_SIZE: &str = "50";

/// The `tag` parameter accepts one term per request.
const SEARCH_TAGS: [&str; 3] = ["machine learning", "artificial intelligence", "generative AI"];

pub struct Jobicy;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Page {
    jobs: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Listing {
    id: Option<Value>,
    job_title: Option<String>,
    company_name: Option<String>,
    job_geo: Option<String>,
    job_excerpt: Option<String>,
    job_description: Option<String>,
    url: Option<String>,
    pub_date: Option<String>,
    job_industry: Option<OneOrMany>,
    job_type: Option<OneOrMany>,
}

impl Listing {
    fn into_job(self) -> NormalizedJob {
        let mut tags = self.job_industry.map(OneOrMany::into_vec).unwrap_or_default();
        tags.extend(self.job_type.map(OneOrMany::into_vec).unwrap_or_default());

        NormalizedJob {
            title: decode_entities(&self.job_title.unwrap_or_default()),
            company: decode_entities(&self.company_name.unwrap_or_default()),
            location: self.job_geo.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            date_posted: self.pub_date.unwrap_or_default(),
            description: decode_entities(&first_text([self.job_excerpt, self.job_description])),
            tags: tags.iter().map(|t| decode_entities(t)).collect(),
        }
    }
}

#[async_trait]
impl JobSource for Jobicy {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn fetch(&self, ctx: &SourceContext) -> Result<Vec<NormalizedJob>> {
        let mut collector = ctx.collector();

        for tag in SEARCH_TAGS {
            if collector.is_full() {
                break;
            }

            let request = ctx
                .client
                .get(API_URL)
                .query(&[("count", PAGE_SIZE), ("tag", tag)]);
            let body: Page = get_json(NAME, format!("tag {tag:?}"), request).await?;

            for listing in decode_items::<Listing>(NAME, body.jobs) {
                if collector.is_full() {
                    break;
                }
                if !collector.first_sighting(&id_text(listing.id.as_ref())) {
                    continue;
                }
                collector.offer(listing.into_job());
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
    fn test_maps_and_unescapes_fields() {
        let listing: Listing = serde_json::from_value(json!({
            "id": 99,
            "jobTitle": "AI &amp; ML Engineer",
            "companyName": "R&amp;D Labs",
            "jobGeo": "Anywhere",
            "jobExcerpt": "Build &quot;agents&quot;",
            "url": "https://jobicy.com/jobs/99",
            "pubDate": "2025-02-01 10:00:00",
            "jobIndustry": ["Engineering &amp; Tech"],
            "jobType": "full-time"
        }))
        .unwrap();

        let job = listing.into_job();
        assert_eq!(job.title, "AI & ML Engineer");
        assert_eq!(job.company, "R&D Labs");
        assert_eq!(job.description, "Build \"agents\"");
        assert_eq!(job.location, "Anywhere");
        assert_eq!(job.tags, vec!["Engineering & Tech", "full-time"]);
    }

    #[test]
    fn test_description_falls_back_to_full_text() {
        let listing: Listing = serde_json::from_value(json!({
            "jobTitle": "ML Engineer",
            "companyName": "Acme",
            "jobExcerpt": "",
            "jobDescription": "Full description"
        }))
        .unwrap();

        assert_eq!(listing.into_job().description, "Full description");
    }
}
