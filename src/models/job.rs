//! Normalized job record.

use serde::{Deserialize, Serialize};

use crate::utils::truncate_chars;

/// Longest description kept on a record, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Location used when a board gives none.
pub const DEFAULT_LOCATION: &str = "Remote";

/// A job listing in the common shape every source produces.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedJob {
    /// Job title
    pub title: String,

    /// Hiring company
    pub company: String,

    /// Free-text location (defaults to "Remote")
    pub location: String,

    /// Application or listing link (may be empty)
    pub url: String,

    /// Posting date as reported by the board, unparsed
    pub date_posted: String,

    /// Description text, truncated to [`MAX_DESCRIPTION_CHARS`]
    pub description: String,

    /// Board-specific category and skill labels
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NormalizedJob {
    /// Column names in field order, used as the export header.
    pub const COLUMNS: [&'static str; 7] = [
        "title",
        "company",
        "location",
        "url",
        "date_posted",
        "description",
        "tags",
    ];

    /// Create a record with only title and company set.
    pub fn new(title: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    /// Apply the conventions shared by all sources: trimmed title and company,
    /// "Remote" for a blank location, and a bounded description.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.company = self.company.trim().to_string();

        let location = self.location.trim();
        self.location = if location.is_empty() {
            DEFAULT_LOCATION.to_string()
        } else {
            location.to_string()
        };

        self.url = self.url.trim().to_string();
        self.date_posted = self.date_posted.trim().to_string();
        self.description = truncate_chars(self.description.trim(), MAX_DESCRIPTION_CHARS);
        self.tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    /// True when both title and company carry text.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.company.trim().is_empty()
    }

    /// Identity used to collapse the same listing across boards.
    pub fn dedup_key(&self) -> (String, String) {
        (self.company.to_lowercase(), self.title.to_lowercase())
    }

    /// Tags joined into a single line of text.
    pub fn tags_text(&self) -> String {
        self.tags.join(" ")
    }

    /// Project the record onto [`Self::COLUMNS`].
    pub fn to_row(&self) -> [String; 7] {
        [
            self.title.clone(),
            self.company.clone(),
            self.location.clone(),
            self.url.clone(),
            self.date_posted.clone(),
            self.description.clone(),
            self.tags.join(", "),
        ]
    }
}
