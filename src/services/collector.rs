// src/services/collector.rs

//! Per-source accumulation of filtered listings.

use std::collections::HashSet;

use crate::models::NormalizedJob;
use crate::services::KeywordFilter;

/// Gathers the listings of one source invocation.
///
/// Normalizes each candidate, drops incomplete ones, applies the keyword
/// filter and stops accepting once the per-board cap is reached. The seen-ID
/// set lives only as long as the collector, so repeats are tracked within a
/// single source run and never across sources or runs.
pub struct JobCollector<'a> {
    filter: &'a KeywordFilter,
    limit: usize,
    seen_ids: HashSet<String>,
    jobs: Vec<NormalizedJob>,
    incomplete: usize,
    rejected: usize,
}

impl<'a> JobCollector<'a> {
    /// Create a collector keeping at most `limit` listings.
    pub fn new(filter: &'a KeywordFilter, limit: usize) -> Self {
        Self {
            filter,
            limit,
            seen_ids: HashSet::new(),
            jobs: Vec::new(),
            incomplete: 0,
            rejected: 0,
        }
    }

    /// True once the cap is reached; callers stop paginating.
    pub fn is_full(&self) -> bool {
        self.jobs.len() >= self.limit
    }

    /// Record a board-specific listing ID. Returns false if it was already
    /// seen in this run. Blank IDs are never treated as repeats.
    pub fn first_sighting(&mut self, id: &str) -> bool {
        let id = id.trim();
        if id.is_empty() {
            return true;
        }
        self.seen_ids.insert(id.to_string())
    }

    /// Offer a candidate. Returns true if it was kept.
    pub fn offer(&mut self, job: NormalizedJob) -> bool {
        if self.is_full() {
            return false;
        }

        let job = job.normalized();
        if !job.is_complete() {
            self.incomplete += 1;
            return false;
        }

        if !self.filter.matches(&job) {
            self.rejected += 1;
            return false;
        }

        self.jobs.push(job);
        true
    }

    /// Finish the run, logging how many candidates were dropped.
    pub fn finish(self, source: &str) -> Vec<NormalizedJob> {
        log::debug!(
            "{}: kept {}, filtered out {}, incomplete {}",
            source,
            self.jobs.len(),
            self.rejected,
            self.incomplete
        );
        self.jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FilterConfig;

    fn filter() -> KeywordFilter {
        KeywordFilter::new(&FilterConfig {
            job_keywords: vec!["ai".into()],
            role_keywords: vec!["engineer".into()],
            location_keywords: vec!["anywhere".into()],
            ..FilterConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_offer_filters_and_normalizes() {
        let filter = filter();
        let mut collector = JobCollector::new(&filter, 10);

        assert!(collector.offer(NormalizedJob::new("  AI Engineer ", " Acme ")));
        assert!(!collector.offer(NormalizedJob::new("Email Engineer", "Acme")));

        let jobs = collector.finish("test");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "AI Engineer");
        assert_eq!(jobs[0].company, "Acme");
        assert_eq!(jobs[0].location, "Remote");
    }

    #[test]
    fn test_offer_discards_incomplete_records() {
        let filter = filter();
        let mut collector = JobCollector::new(&filter, 10);

        assert!(!collector.offer(NormalizedJob::new("AI Engineer", "   ")));
        assert!(!collector.offer(NormalizedJob::new("", "Acme")));
        assert!(collector.finish("test").is_empty());
    }

    #[test]
    fn test_cap_stops_accepting() {
        let filter = filter();
        let mut collector = JobCollector::new(&filter, 2);

        for i in 0..5 {
            collector.offer(NormalizedJob::new(format!("AI Engineer {i}"), "Acme"));
        }

        assert!(collector.is_full());
        let jobs = collector.finish("test");
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].title, "AI Engineer 1");
    }

    #[test]
    fn test_first_sighting_tracks_ids() {
        let filter = filter();
        let mut collector = JobCollector::new(&filter, 10);

        assert!(collector.first_sighting("123"));
        assert!(!collector.first_sighting("123"));
        assert!(!collector.first_sighting(" 123 "));
        assert!(collector.first_sighting(""));
        assert!(collector.first_sighting(""));
    }
}
