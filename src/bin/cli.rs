//! ai-job-scraper CLI
//!
//! One pull, filter, dedupe and export pass per invocation.

use std::path::PathBuf;
use std::sync::Arc;

use ai_job_scraper::{
    error::Result,
    models::{Config, SourceKind},
    pipeline,
    sources::{self, SourceContext},
    storage::CsvExporter,
    utils::http,
};
use clap::Parser;

/// Aggregate remote AI/ML job listings into a CSV file
#[derive(Parser, Debug)]
#[command(name = "ai-job-scraper", version, about = "Remote AI/ML job aggregator")]
struct Cli {
    /// Path to the configuration file (JSON, or TOML by extension)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Override the output directory from the configuration
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Only query these sources (repeatable, e.g. --source remoteok)
    #[arg(short, long = "source", value_parser = parse_source)]
    sources: Vec<SourceKind>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_source(value: &str) -> std::result::Result<SourceKind, String> {
    SourceKind::from_key(value).ok_or_else(|| {
        let known: Vec<_> = SourceKind::ALL.iter().map(|k| k.key()).collect();
        format!("unknown source '{}' (expected one of: {})", value, known.join(", "))
    })
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("ai-job-scraper starting...");

    let mut config = Config::load(&cli.config).inspect_err(|e| {
        log::error!("Failed to load {}: {}", cli.config.display(), e);
    })?;
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if !cli.sources.is_empty() {
        config.sources = cli.sources;
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }
    for warning in config.warnings() {
        log::warn!("{}", warning);
    }
    log::info!("Loaded configuration from {}", cli.config.display());

    let client = http::create_client(&config.http)?;
    let config = Arc::new(config);
    let ctx = SourceContext::new(Arc::clone(&config), client)?;
    let sources = sources::build_sources(&config.sources);

    let report = pipeline::run_scraper(&sources, &ctx).await;

    log::info!("Summary:");
    for outcome in &report.outcomes {
        log::info!("  {}", outcome);
    }
    if report.failures() > 0 {
        log::warn!(
            "{} of {} sources failed",
            report.failures(),
            report.outcomes.len()
        );
    }

    let exporter = CsvExporter::new(&config.output_dir);
    let exported = pipeline::finish(&report, &exporter).await.inspect_err(|e| {
        log::error!("Export failed: {}", e);
    })?;

    match exported {
        Some(path) => log::info!(
            "Saved {} jobs ({} duplicates removed) to {}",
            report.jobs.len(),
            report.duplicates(),
            path.display()
        ),
        None => log::info!(
            "No jobs found. Try relaxing your filters in {}.",
            cli.config.display()
        ),
    }

    Ok(())
}
