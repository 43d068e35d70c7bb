// src/pipeline/scrape.rs

//! One pull, filter and dedupe pass over the configured boards.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::models::NormalizedJob;
use crate::services::dedupe;
use crate::sources::{JobSource, SourceContext};
use crate::storage::JobExporter;

/// How one source invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Fetched { count: usize },
    Failed { reason: String },
}

/// Per-source line of the run summary.
#[derive(Debug, Clone)]
pub struct SourceOutcome {
    pub source: &'static str,
    pub status: SourceStatus,
    pub elapsed: Duration,
}

impl SourceOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, SourceStatus::Failed { .. })
    }
}

impl fmt::Display for SourceOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed.as_secs_f32();
        match &self.status {
            SourceStatus::Fetched { count } => {
                write!(f, "{}: {} jobs ({:.1}s)", self.source, count, secs)
            }
            SourceStatus::Failed { reason } => {
                write!(f, "{}: failed after {:.1}s ({})", self.source, secs, reason)
            }
        }
    }
}

/// Result of a full run.
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    /// One entry per source, in configuration order.
    pub outcomes: Vec<SourceOutcome>,
    /// Filtered listings of all sources, deduplicated.
    pub jobs: Vec<NormalizedJob>,
    /// Listings before deduplication.
    pub collected: usize,
}

impl ScrapeReport {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    pub fn duplicates(&self) -> usize {
        self.collected - self.jobs.len()
    }
}

/// Run every source, isolating failures, and merge the results.
///
/// Sources run at most `http.max_concurrent` at a time. Results are consumed
/// in input order so the merged list, and therefore which duplicate survives,
/// does not depend on timing.
pub async fn run_scraper(sources: &[Box<dyn JobSource>], ctx: &SourceContext) -> ScrapeReport {
    let concurrency = ctx.config.http.max_concurrent.max(1);
    log::info!(
        "Scraping {} sources (concurrency {})",
        sources.len(),
        concurrency
    );

    let mut results = stream::iter(sources)
        .map(|source| async move {
            let started = Instant::now();
            log::info!("Fetching {}...", source.name());
            let result = source.fetch(ctx).await;
            (source.name(), result, started.elapsed())
        })
        .buffered(concurrency);

    let mut report = ScrapeReport::default();
    let mut collected = Vec::new();

    while let Some((name, result, elapsed)) = results.next().await {
        let status = match result {
            Ok(jobs) => {
                log::info!("{}: {} matching jobs", name, jobs.len());
                let count = jobs.len();
                collected.extend(jobs);
                SourceStatus::Fetched { count }
            }
            Err(e) => {
                log::warn!("Failed to scrape {}: {}", name, e);
                SourceStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };

        report.outcomes.push(SourceOutcome {
            source: name,
            status,
            elapsed,
        });
    }

    report.collected = collected.len();
    report.jobs = dedupe(collected);
    log::info!(
        "Collected {} jobs, {} after removing duplicates",
        report.collected,
        report.jobs.len()
    );

    report
}

/// Export the report's listings.
///
/// An empty report writes no file and yields `None`, so callers can tell
/// "nothing matched" apart from a successful export.
pub async fn finish(report: &ScrapeReport, exporter: &dyn JobExporter) -> Result<Option<PathBuf>> {
    if report.jobs.is_empty() {
        return Ok(None);
    }

    let path = exporter.export(&report.jobs).await?;
    Ok(Some(path))
}
