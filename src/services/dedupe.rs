// src/services/dedupe.rs

//! Cross-source deduplication.

use std::collections::HashSet;

use crate::models::NormalizedJob;

/// Collapse listings sharing a case-folded `(company, title)` key.
///
/// Order-preserving: the first occurrence of a key survives, so sources
/// queried earlier win ties.
pub fn dedupe(jobs: Vec<NormalizedJob>) -> Vec<NormalizedJob> {
    let mut seen = HashSet::new();
    let mut deduped = Vec::with_capacity(jobs.len());
    for job in jobs {
        if seen.insert(job.dedup_key()) {
            deduped.push(job);
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, company: &str, url: &str) -> NormalizedJob {
        NormalizedJob {
            url: url.to_string(),
            ..NormalizedJob::new(title, company)
        }
    }

    #[test]
    fn test_first_seen_wins_across_sources() {
        let jobs = vec![
            job("ML Engineer", "Acme", "https://remoteok.com/1"),
            job("ml engineer", "ACME", "https://himalayas.app/1"),
        ];

        let deduped = dedupe(jobs);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].url, "https://remoteok.com/1");
    }

    #[test]
    fn test_preserves_order_of_distinct_keys() {
        let jobs = vec![
            job("B", "x", ""),
            job("A", "x", ""),
            job("b", "X", ""),
            job("C", "y", ""),
            job("A", "y", ""),
        ];

        let titles: Vec<_> = dedupe(jobs).into_iter().map(|j| j.title).collect();
        assert_eq!(titles, vec!["B", "A", "C", "A"]);
    }

    #[test]
    fn test_many_repeats_keep_first() {
        let mut jobs = vec![job("Data Scientist", "Acme", "first")];
        for i in 0..10 {
            jobs.push(job("Data Scientist", "Acme", &format!("dup-{i}")));
        }

        let deduped = dedupe(jobs);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].url, "first");
    }

    #[test]
    fn test_idempotent() {
        let jobs = vec![
            job("A", "x", "1"),
            job("a", "X", "2"),
            job("B", "x", "3"),
            job("A", "y", "4"),
        ];

        let once = dedupe(jobs);
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_near_duplicates_are_kept() {
        let jobs = vec![
            job("ML Engineer", "Acme", ""),
            job("ML Engineer II", "Acme", ""),
            job("ML  Engineer", "Acme", ""),
        ];
        assert_eq!(dedupe(jobs).len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
