// src/models/mod.rs

//! Domain models for the scraper application.
//!
//! This module contains the data structures shared by the sources, the
//! filter engine and the exporter.

mod config;
mod job;

// Re-export all public types
pub use config::{Config, FilterConfig, FilterPolicy, HttpConfig, MAX_RESULTS_LIMIT, SourceKind};
pub use job::{DEFAULT_LOCATION, MAX_DESCRIPTION_CHARS, NormalizedJob};
