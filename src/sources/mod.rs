// src/sources/mod.rs

//! Job board adapters.
//!
//! Every board implements [`JobSource`]: given the shared [`SourceContext`],
//! produce listings that already passed the keyword filter. Pagination,
//! rate limiting and field mapping stay inside each adapter; nothing is
//! shared between adapters except the read-only context.

mod arbeitnow;
mod greenhouse;
mod himalayas;
mod html;
mod jobicy;
mod remote_co;
mod remoteok;
mod remotive;
mod the_muse;
mod we_work_remotely;

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Config, NormalizedJob, SourceKind};
use crate::services::{JobCollector, KeywordFilter};
use crate::utils::http;

pub use arbeitnow::Arbeitnow;
pub use greenhouse::Greenhouse;
pub use himalayas::Himalayas;
pub use jobicy::Jobicy;
pub use remote_co::RemoteCo;
pub use remoteok::RemoteOk;
pub use remotive::Remotive;
pub use the_muse::TheMuse;
pub use we_work_remotely::WeWorkRemotely;

/// A job board that yields filtered listings.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Display name used in logs and run summaries.
    fn name(&self) -> &'static str;

    /// Fetch, map and filter listings. Any failed request aborts the whole
    /// source; malformed individual listings are skipped.
    async fn fetch(&self, ctx: &SourceContext) -> Result<Vec<NormalizedJob>>;
}

/// Read-only state shared by all adapters during a run.
pub struct SourceContext {
    pub client: Client,
    pub config: Arc<Config>,
    pub filter: Arc<KeywordFilter>,
}

impl SourceContext {
    /// Compile the filter and wrap the client for a run.
    pub fn new(config: Arc<Config>, client: Client) -> Result<Self> {
        let filter = Arc::new(KeywordFilter::new(&config.filter)?);
        Ok(Self {
            client,
            config,
            filter,
        })
    }

    /// Start a collector capped at `max_results_per_board`.
    pub fn collector(&self) -> JobCollector<'_> {
        JobCollector::new(&self.filter, self.config.max_results_per_board)
    }
}

/// Instantiate the adapter for a board.
pub fn build_source(kind: SourceKind) -> Box<dyn JobSource> {
    match kind {
        SourceKind::Remoteok => Box::new(RemoteOk),
        SourceKind::Himalayas => Box::new(Himalayas),
        SourceKind::Jobicy => Box::new(Jobicy),
        SourceKind::Arbeitnow => Box::new(Arbeitnow),
        SourceKind::Greenhouse => Box::new(Greenhouse),
        SourceKind::TheMuse => Box::new(TheMuse),
        SourceKind::RemoteCo => Box::new(RemoteCo),
        SourceKind::Remotive => Box::new(Remotive),
        SourceKind::WeWorkRemotely => Box::new(WeWorkRemotely),
    }
}

/// Instantiate adapters for every configured board, in configuration order.
pub fn build_sources(kinds: &[SourceKind]) -> Vec<Box<dyn JobSource>> {
    kinds.iter().copied().map(build_source).collect()
}

/// Send a JSON request, tagging failures with the board and request context.
async fn get_json<T: DeserializeOwned>(
    board: &str,
    context: impl Display,
    request: RequestBuilder,
) -> Result<T> {
    http::fetch_json(request)
        .await
        .map_err(|e| AppError::fetch(board, format!("{context}: {e}")))
}

/// Fetch an HTML page, tagging failures with the board name.
async fn get_html(board: &str, client: &Client, url: &str) -> Result<String> {
    http::fetch_html(client, url)
        .await
        .map_err(|e| AppError::fetch(board, format!("{url}: {e}")))
}

/// Decode listings one at a time so a malformed entry only loses itself.
fn decode_items<T: DeserializeOwned>(board: &str, items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                log::debug!("Skipping listing: {}", AppError::parse(board, e));
                None
            }
        })
        .collect()
}

/// First non-blank value, or an empty string.
fn first_text<const N: usize>(candidates: [Option<String>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
}

/// Listing ID as text, whatever JSON type the board uses for it.
fn id_text(id: Option<&Value>) -> String {
    id.map(crate::utils::json_text).unwrap_or_default()
}

/// A field some boards send as a single string and others as a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}
