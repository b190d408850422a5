use crate::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// Default browser-like identification sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept header
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Default Accept-Language header
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Main configuration structure for Thread-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub crawl: CrawlConfig,
    pub extract: ExtractConfig,
    pub output: OutputConfig,
}

/// HTTP transport settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// Request timeout (seconds)
    pub timeout_secs: u64,

    /// Pause after every page fetch (seconds)
    pub delay_secs: f64,

    pub user_agent: String,

    pub accept: String,

    pub accept_language: String,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Pause between page requests
    ///
    /// Fails for negative, non-finite or out-of-range values.
    pub fn delay(&self) -> Result<Duration, ConfigError> {
        Duration::try_from_secs_f64(self.delay_secs).map_err(|_| {
            ConfigError::Validation(format!(
                "delay-secs must be a non-negative number of seconds, got {}",
                self.delay_secs
            ))
        })
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            delay_secs: 1.5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

/// Crawl-level settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlConfig {
    /// Upper bound on pages fetched, regardless of what the thread reports
    pub max_pages: Option<u32>,

    /// Number of body characters compared when merging posts across pages
    pub dedup_body_prefix: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: None,
            dedup_body_prefix: 200,
        }
    }
}

/// Post extraction tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ExtractConfig {
    /// Posts the forum renders per page; used to infer the page count
    pub posts_per_page: u32,

    /// Longer link texts are not accepted as author names
    pub max_author_len: usize,

    /// Ancestor levels searched above a boundary marker
    pub marker_walk_depth: usize,

    /// Ancestor levels searched above an author link
    pub author_walk_depth: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            posts_per_page: 20,
            max_author_len: 50,
            marker_walk_depth: 20,
            author_walk_depth: 15,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving `thread_<id>.json` files
    pub output_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: "data".to_string(),
        }
    }
}
