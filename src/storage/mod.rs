//! Persistence of a run's results.
//!
//! A run ends with one tabular file per invocation:
//!
//! ```text
//! outputs/
//! ├── ai_jobs_2025-01-15.csv                # first run of the day
//! ├── ai_jobs_2025-01-15_18-42-07.csv       # later runs the same day
//! └── ai_jobs_2025-01-15_18-42-07_2.csv     # same second, still distinct
//! ```

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::NormalizedJob;

pub use local::CsvExporter;

/// Trait for result writers.
#[async_trait]
pub trait JobExporter: Send + Sync {
    /// Write every job as one row and return the created file's path.
    /// Existing files are never overwritten.
    async fn export(&self, jobs: &[NormalizedJob]) -> Result<PathBuf>;
}
