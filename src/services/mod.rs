//! Service layer for the scraper application.
//!
//! This module contains the business logic for:
//! - Keyword matching (`KeywordFilter`)
//! - Per-source accumulation (`JobCollector`)
//! - Cross-source deduplication (`dedupe`)

mod collector;
mod dedupe;
mod filter;

pub use collector::JobCollector;
pub use dedupe::dedupe;
pub use filter::{ANYWHERE, KeywordFilter, Verdict, WordMatcher, matches};
