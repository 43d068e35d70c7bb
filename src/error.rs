// src/error.rs

//! Unified error handling for the scraper application.

use std::fmt;

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSV writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Keyword pattern could not be compiled
    #[error("Pattern error: {0}")]
    Regex(#[from] regex::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration values are out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// A job board could not be fetched or its response was unusable
    #[error("Source error for {board}: {message}")]
    Source { board: String, message: String },

    /// A single listing inside a board response was malformed
    #[error("Parse error for {board}: {message}")]
    Parse { board: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a source fetch error with the board name as context.
    pub fn fetch(board: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Source {
            board: board.into(),
            message: message.to_string(),
        }
    }

    /// Create a per-listing parse error.
    pub fn parse(board: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            board: board.into(),
            message: message.to_string(),
        }
    }
}
