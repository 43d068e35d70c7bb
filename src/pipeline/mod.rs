//! Pipeline entry points.
//!
//! - `run_scraper`: fetch every configured board, then merge and dedupe
//! - `finish`: export the merged listings, or nothing when none survived

pub mod scrape;

pub use scrape::{ScrapeReport, SourceOutcome, SourceStatus, finish, run_scraper};
