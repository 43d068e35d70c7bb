// src/services/filter.rs

//! Keyword filter engine.
//!
//! Decides whether a [`NormalizedJob`] fits a [`FilterConfig`]. The decision
//! short-circuits through four checks in order:
//!
//! 1. **Exclusion**: no `exclude_keywords` entry in title + description.
//! 2. **Location**: some `location_keywords` entry in title, company,
//!    description, tags and location, unless the list contains "anywhere".
//! 3. **Subject**: some `job_keywords` entry in title + tags, or (fallback)
//!    in the description while the title carries a role keyword.
//! 4. **Role**: some `role_keywords` entry in the title.
//!
//! All matching is whole-word and case-insensitive: "AI" matches "AI-powered"
//! and "(ai)" but never "mail" or "paid".

use regex::Regex;

use crate::error::Result;
use crate::models::{FilterConfig, FilterPolicy, NormalizedJob};

/// Location keyword that disables the location check.
pub const ANYWHERE: &str = "anywhere";

/// A single keyword compiled for whole-word, case-insensitive search.
#[derive(Debug, Clone)]
pub struct WordMatcher {
    pattern: Regex,
}

impl WordMatcher {
    /// Compile a keyword. Returns `None` for blank keywords, which never match.
    pub fn new(keyword: &str) -> Result<Option<Self>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(None);
        }

        // Neighbours must be a string edge or a non-word character. Spelled
        // out instead of `\b` so keywords that start or end with punctuation
        // ("c++", ".net") are bounded the same way.
        let pattern = Regex::new(&format!(
            r"(?i)(?:^|\W){}(?:\W|$)",
            regex::escape(keyword)
        ))?;

        Ok(Some(Self { pattern }))
    }

    /// True if the keyword occurs in `text` as a whole word.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Compile a keyword list, dropping blank entries.
fn compile_all(keywords: &[String]) -> Result<Vec<WordMatcher>> {
    let mut matchers = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        if let Some(matcher) = WordMatcher::new(keyword)? {
            matchers.push(matcher);
        }
    }
    Ok(matchers)
}

fn any_match(matchers: &[WordMatcher], text: &str) -> bool {
    matchers.iter().any(|m| m.is_match(text))
}

/// Outcome of evaluating a job, naming the check that rejected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// Title or company is blank
    Incomplete,
    /// An exclude keyword appears in title or description
    Excluded,
    /// No location keyword found
    Location,
    /// No job keyword in the places the policy allows
    Subject,
    /// No role keyword in the title
    Role,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }
}

/// Compiled filter built once per run from a [`FilterConfig`].
///
/// Holds no per-record state, so one instance can be shared by every source.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    job: Vec<WordMatcher>,
    role: Vec<WordMatcher>,
    exclude: Vec<WordMatcher>,
    /// `None` when the location check is disabled
    location: Option<Vec<WordMatcher>>,
    policy: FilterPolicy,
}

impl KeywordFilter {
    /// Compile every keyword list of the configuration.
    pub fn new(config: &FilterConfig) -> Result<Self> {
        let anywhere = config
            .location_keywords
            .iter()
            .any(|k| k.trim().eq_ignore_ascii_case(ANYWHERE));

        let location = if anywhere {
            None
        } else {
            Some(compile_all(&config.location_keywords)?)
        };

        Ok(Self {
            job: compile_all(&config.job_keywords)?,
            role: compile_all(&config.role_keywords)?,
            exclude: compile_all(&config.exclude_keywords)?,
            location,
            policy: config.filter_policy,
        })
    }

    /// True if the job passes every check.
    pub fn matches(&self, job: &NormalizedJob) -> bool {
        self.evaluate(job).is_accepted()
    }

    /// Run the checks in order and report the first one that fails.
    pub fn evaluate(&self, job: &NormalizedJob) -> Verdict {
        if !job.is_complete() {
            return Verdict::Incomplete;
        }

        let title = job.title.as_str();
        let description = job.description.as_str();
        let tags = job.tags_text();

        let title_and_description = format!("{title} {description}");
        if any_match(&self.exclude, &title_and_description) {
            return Verdict::Excluded;
        }

        if let Some(location) = &self.location {
            let combined = format!(
                "{} {} {} {} {}",
                title, job.company, description, tags, job.location
            );
            if !any_match(location, &combined) {
                return Verdict::Location;
            }
        }

        let title_has_role = any_match(&self.role, title);

        let subject = match self.policy {
            FilterPolicy::TitleTagsFallback => {
                let title_and_tags = format!("{title} {tags}");
                any_match(&self.job, &title_and_tags)
                    || (any_match(&self.job, description) && title_has_role)
            }
            FilterPolicy::TitleOnly => any_match(&self.job, title),
        };
        if !subject {
            return Verdict::Subject;
        }

        if !title_has_role {
            return Verdict::Role;
        }

        Verdict::Accepted
    }
}

/// Decide whether `job` fits `config`.
///
/// Convenience form that compiles the configuration on every call; sources
/// filtering many records should build a [`KeywordFilter`] once instead.
pub fn matches(job: &NormalizedJob, config: &FilterConfig) -> bool {
    match KeywordFilter::new(config) {
        Ok(filter) => filter.matches(job),
        Err(e) => {
            log::warn!("Keyword filter could not be compiled: {}", e);
            false
        }
    }
}
