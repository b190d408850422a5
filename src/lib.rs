//! Thread-Harvest: a forum thread acquisition toolkit
//!
//! This crate downloads every page of a forum discussion thread, locates the
//! individual posts in the rendered markup and returns them as a single,
//! deduplicated, ordered list.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod model;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Thread-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status_code} for {url}")]
    Http { url: String, status_code: u16 },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarvestError {
    /// Returns true if a caller may reasonably retry the failed operation
    ///
    /// Only transport failures qualify. HTTP status errors and bad input are
    /// final as far as this crate is concerned.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// The HTTP status code, if this is an HTTP status error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Thread-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, HttpFetcher, PageSource, SavedPages, ThreadCrawler};
pub use extract::{extract_page, PageExtraction};
pub use model::{Post, ThreadResult};
pub use crate::url::{page_url, resolve_thread_url, ThreadLocator};
