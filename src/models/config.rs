//! Application configuration structures.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Upper bound for `max_results_per_board`.
pub const MAX_RESULTS_LIMIT: usize = 1000;

/// Root application configuration.
///
/// The filter criteria sit at the top level of the document so that a plain
/// `config.json` with only keyword lists is a complete configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Keyword criteria consumed by the filter engine
    #[serde(flatten)]
    pub filter: FilterConfig,

    /// Per-source cap applied by the adapters
    #[serde(default = "defaults::max_results_per_board")]
    pub max_results_per_board: usize,

    /// Only keep listings open to applicants anywhere
    #[serde(default = "defaults::worldwide_only")]
    pub worldwide_only: bool,

    /// Sources to query, in the order their results are concatenated
    #[serde(default = "defaults::sources")]
    pub sources: Vec<SourceKind>,

    /// Greenhouse company board slugs
    #[serde(default = "defaults::greenhouse_boards")]
    pub greenhouse_boards: Vec<String>,

    /// Directory receiving the exported files
    #[serde(default = "defaults::output_dir")]
    pub output_dir: PathBuf,

    /// HTTP behavior settings
    #[serde(default)]
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from a JSON or TOML file (chosen by extension).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read {}: {}", path.display(), e))
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    /// Parse a JSON configuration document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| AppError::config(format!("invalid JSON: {e}")))
    }

    /// Parse a TOML configuration document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AppError::config(format!("invalid TOML: {e}")))
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.max_results_per_board == 0 {
            return Err(AppError::validation("max_results_per_board must be > 0"));
        }
        if self.max_results_per_board > MAX_RESULTS_LIMIT {
            return Err(AppError::validation(format!(
                "max_results_per_board must be <= {MAX_RESULTS_LIMIT}"
            )));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.max_concurrent == 0 {
            return Err(AppError::validation("http.max_concurrent must be > 0"));
        }
        if self.sources.is_empty() {
            return Err(AppError::validation("No sources configured"));
        }
        Ok(())
    }

    /// Non-fatal configuration smells worth surfacing before a run.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.filter.job_keywords.is_empty() {
            warnings.push("job_keywords is empty: no listing can match".to_string());
        }
        if self.filter.role_keywords.is_empty() {
            warnings.push("role_keywords is empty: no listing can match".to_string());
        }
        if self.filter.location_keywords.is_empty() {
            warnings.push(
                "location_keywords is empty: add \"anywhere\" to disable the location check"
                    .to_string(),
            );
        }
        warnings
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            max_results_per_board: defaults::max_results_per_board(),
            worldwide_only: defaults::worldwide_only(),
            sources: defaults::sources(),
            greenhouse_boards: defaults::greenhouse_boards(),
            output_dir: defaults::output_dir(),
            http: HttpConfig::default(),
        }
    }
}

/// Keyword criteria for deciding whether a listing is of interest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Subject-matter terms (e.g. "AI", "machine learning")
    #[serde(default)]
    pub job_keywords: Vec<String>,

    /// Role terms that must appear in the title (e.g. "engineer")
    #[serde(default)]
    pub role_keywords: Vec<String>,

    /// Disqualifying terms checked against title and description
    #[serde(default)]
    pub exclude_keywords: Vec<String>,

    /// Required location signal; "anywhere" disables the check
    #[serde(default)]
    pub location_keywords: Vec<String>,

    /// How the job-subject step is evaluated
    #[serde(default)]
    pub filter_policy: FilterPolicy,
}

/// Job-subject matching policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPolicy {
    /// Job keyword in title or tags, or in the description when the title
    /// also carries a role keyword.
    #[default]
    TitleTagsFallback,

    /// Job keyword in the title only.
    TitleOnly,
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for API requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Number of sources queried at the same time
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Known job boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Remoteok,
    Himalayas,
    Jobicy,
    Arbeitnow,
    Greenhouse,
    TheMuse,
    RemoteCo,
    Remotive,
    WeWorkRemotely,
}

impl SourceKind {
    /// Every board, in default query order.
    pub const ALL: [SourceKind; 9] = [
        SourceKind::Remoteok,
        SourceKind::Himalayas,
        SourceKind::Jobicy,
        SourceKind::Arbeitnow,
        SourceKind::Greenhouse,
        SourceKind::TheMuse,
        SourceKind::RemoteCo,
        SourceKind::Remotive,
        SourceKind::WeWorkRemotely,
    ];

    /// Configuration key for this board.
    pub fn key(self) -> &'static str {
        match self {
            SourceKind::Remoteok => "remoteok",
            SourceKind::Himalayas => "himalayas",
            SourceKind::Jobicy => "jobicy",
            SourceKind::Arbeitnow => "arbeitnow",
            SourceKind::Greenhouse => "greenhouse",
            SourceKind::TheMuse => "the_muse",
            SourceKind::RemoteCo => "remote_co",
            SourceKind::Remotive => "remotive",
            SourceKind::WeWorkRemotely => "we_work_remotely",
        }
    }

    /// Look a board up by its configuration key.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

mod defaults {
    use std::path::PathBuf;

    use super::SourceKind;

    pub fn max_results_per_board() -> usize {
        50
    }
    pub fn worldwide_only() -> bool {
        true
    }
    pub fn sources() -> Vec<SourceKind> {
        SourceKind::ALL.to_vec()
    }
    pub fn output_dir() -> PathBuf {
        PathBuf::from("outputs")
    }

    // AI/ML companies with public Greenhouse boards
    pub fn greenhouse_boards() -> Vec<String> {
        [
            "anthropic",
            "xai",
            "databricks",
            "runwayml",
            "dataiku",
            "vercel",
            "snorkelai",
            "typeface",
            "comet",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "ai-job-scraper/1.0".into()
    }
    pub fn timeout() -> u64 {
        15
    }
    pub fn max_concurrent() -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.http.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_cap() {
        let mut config = Config::default();
        config.max_results_per_board = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_with_only_keywords_uses_defaults() {
        let config = Config::from_json_str(
            r#"{
                "job_keywords": ["AI", "machine learning"],
                "role_keywords": ["engineer"],
                "location_keywords": ["anywhere"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.filter.job_keywords, vec!["AI", "machine learning"]);
        assert!(config.filter.exclude_keywords.is_empty());
        assert_eq!(config.max_results_per_board, 50);
        assert!(config.worldwide_only);
        assert_eq!(config.filter.filter_policy, FilterPolicy::TitleTagsFallback);
        assert_eq!(config.sources, SourceKind::ALL.to_vec());
        assert_eq!(config.http.timeout_secs, 15);
    }

    #[test]
    fn json_overrides_optional_keys() {
        let config = Config::from_json_str(
            r#"{
                "max_results_per_board": 10,
                "worldwide_only": false,
                "filter_policy": "title_only",
                "sources": ["greenhouse", "remoteok"],
                "http": { "max_concurrent": 3 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.max_results_per_board, 10);
        assert!(!config.worldwide_only);
        assert_eq!(config.filter.filter_policy, FilterPolicy::TitleOnly);
        assert_eq!(
            config.sources,
            vec![SourceKind::Greenhouse, SourceKind::Remoteok]
        );
        assert_eq!(config.http.max_concurrent, 3);
        assert_eq!(config.http.timeout_secs, 15);
    }

    #[test]
    fn toml_document_is_accepted() {
        let config = Config::from_toml_str(
            r#"
            job_keywords = ["LLM"]
            role_keywords = ["engineer"]
            location_keywords = ["anywhere"]
            output_dir = "out"

            [http]
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.filter.job_keywords, vec!["LLM"]);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.http.timeout_secs, 5);
    }

    #[test]
    fn malformed_document_is_a_config_error() {
        let err = Config::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn unknown_source_is_rejected() {
        assert!(Config::from_json_str(r#"{ "sources": ["monster"] }"#).is_err());
    }

    #[test]
    fn load_missing_file_is_a_config_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = Config::load(tmp.path().join("config.json")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn load_picks_format_by_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "role_keywords = [\"scientist\"]\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.filter.role_keywords, vec!["scientist"]);
    }

    #[test]
    fn warnings_flag_empty_keyword_lists() {
        let warnings = Config::default().warnings();
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn source_kind_keys_round_trip() {
        for kind in SourceKind::ALL {
            assert_eq!(SourceKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(SourceKind::from_key(" The_Muse "), Some(SourceKind::TheMuse));
        assert_eq!(SourceKind::from_key("monster"), None);
    }

    #[test]
    fn bundled_sample_config_is_valid() {
        let config = Config::from_json_str(include_str!("../../config.json")).unwrap();
        assert!(config.validate().is_ok());
        assert!(config.warnings().is_empty());
        assert_eq!(config.sources, SourceKind::ALL.to_vec());
        assert_eq!(config.filter.filter_policy, FilterPolicy::TitleTagsFallback);
    }

    #[test]
    fn validate_rejects_oversized_cap() {
        let mut config = Config::default();
        config.max_results_per_board = usize::MAX;
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));

        config.max_results_per_board = MAX_RESULTS_LIMIT;
        assert!(config.validate().is_ok());
    }
}
