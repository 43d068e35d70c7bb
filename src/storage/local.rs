//! Local filesystem CSV exporter.
//!
//! Files are named after the run date. A second run on the same day gets the
//! full timestamp, and a clash on that too gets a numeric counter. Every file
//! is opened with `create_new`, so a prior run's output survives even when
//! two runs race for the same name.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::NormalizedJob;
use crate::storage::JobExporter;

const FILE_PREFIX: &str = "ai_jobs";
const MAX_COUNTER: u32 = 1000;

/// Writes results as CSV under an output directory.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    /// Create an exporter writing into `output_dir` (created on first export).
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Export as if the run happened at `timestamp`.
    pub async fn export_at(
        &self,
        jobs: &[NormalizedJob],
        timestamp: NaiveDateTime,
    ) -> Result<PathBuf> {
        let bytes = render(jobs)?;
        tokio::fs::create_dir_all(&self.output_dir).await?;

        for name in candidate_names(timestamp) {
            let path = self.output_dir.join(name);
            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    log::debug!("{} exists, trying next name", path.display());
                    continue;
                }
                Err(e) => return Err(AppError::Io(e)),
            };

            file.write_all(&bytes).await?;
            file.flush().await?;
            log::info!("Wrote {} jobs to {}", jobs.len(), path.display());
            return Ok(path);
        }

        Err(AppError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!(
                "no free output file name in {} for {}",
                self.output_dir.display(),
                timestamp
            ),
        )))
    }
}

#[async_trait]
impl JobExporter for CsvExporter {
    async fn export(&self, jobs: &[NormalizedJob]) -> Result<PathBuf> {
        self.export_at(jobs, Local::now().naive_local()).await
    }
}

/// File names to try, in order: date, full timestamp, timestamp with counter.
fn candidate_names(timestamp: NaiveDateTime) -> impl Iterator<Item = String> {
    let date = timestamp.format("%Y-%m-%d").to_string();
    let stamp = timestamp.format("%Y-%m-%d_%H-%M-%S").to_string();

    let first = [
        format!("{FILE_PREFIX}_{date}.csv"),
        format!("{FILE_PREFIX}_{stamp}.csv"),
    ];
    let numbered = (2..=MAX_COUNTER).map(move |n| format!("{FILE_PREFIX}_{stamp}_{n}.csv"));

    first.into_iter().chain(numbered)
}

/// Serialize jobs to CSV bytes, header first.
fn render(jobs: &[NormalizedJob]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(NormalizedJob::COLUMNS)?;
    for job in jobs {
        writer.write_record(job.to_row())?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn sample_jobs() -> Vec<NormalizedJob> {
        vec![
            NormalizedJob {
                title: "ML Engineer".into(),
                company: "Acme, Inc.".into(),
                location: "Remote".into(),
                url: "https://example.com/1".into(),
                date_posted: "2025-01-14".into(),
                description: "Build \"models\"".into(),
                tags: vec!["python".into(), "llm".into()],
            },
            NormalizedJob {
                title: "Data Scientist".into(),
                company: "Beta".into(),
                location: "Worldwide".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_candidate_names() {
        let names: Vec<_> = candidate_names(at(18, 42, 7)).take(3).collect();
        assert_eq!(
            names,
            vec![
                "ai_jobs_2025-01-15.csv",
                "ai_jobs_2025-01-15_18-42-07.csv",
                "ai_jobs_2025-01-15_18-42-07_2.csv",
            ]
        );
    }

    #[test]
    fn test_render_header_and_rows() {
        let bytes = render(&sample_jobs()).unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());

        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, NormalizedJob::COLUMNS);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Acme, Inc.");
        assert_eq!(&rows[0][5], "Build \"models\"");
        assert_eq!(&rows[0][6], "python, llm");
        assert_eq!(&rows[1][3], "");
    }

    #[tokio::test]
    async fn test_export_creates_output_dir() {
        let temp = TempDir::new().unwrap();
        let exporter = CsvExporter::new(temp.path().join("nested/outputs"));

        let path = exporter.export_at(&sample_jobs(), at(9, 0, 0)).await.unwrap();

        assert_eq!(path, temp.path().join("nested/outputs/ai_jobs_2025-01-15.csv"));
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.starts_with("title,company,location,url,date_posted,description,tags"));
        assert_eq!(content.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_same_day_exports_never_overwrite() {
        let temp = TempDir::new().unwrap();
        let exporter = CsvExporter::new(temp.path());

        let first = exporter.export_at(&sample_jobs(), at(9, 0, 0)).await.unwrap();
        let second = exporter.export_at(&sample_jobs()[..1], at(18, 42, 7)).await.unwrap();
        let third = exporter.export_at(&sample_jobs()[..1], at(18, 42, 7)).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(
            second.file_name().unwrap(),
            "ai_jobs_2025-01-15_18-42-07.csv"
        );
        assert_eq!(
            third.file_name().unwrap(),
            "ai_jobs_2025-01-15_18-42-07_2.csv"
        );

        let original = tokio::fs::read_to_string(&first).await.unwrap();
        assert_eq!(original.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_export_trait_uses_current_date() {
        let temp = TempDir::new().unwrap();
        let exporter: Box<dyn JobExporter> = Box::new(CsvExporter::new(temp.path()));

        let path = exporter.export(&sample_jobs()).await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("ai_jobs_"));
        assert!(name.ends_with(".csv"));
    }
}
