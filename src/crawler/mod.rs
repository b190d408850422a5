//! Crawler module for thread acquisition
//!
//! This module contains the core crawling logic, including:
//! - The `PageSource` seam and its implementations (HTTP, saved pages)
//! - HTTP fetching with fixed identification headers
//! - The page-by-page coordinator that assembles a whole thread

mod coordinator;
mod fetcher;
mod source;

pub use coordinator::ThreadCrawler;
pub use fetcher::{build_http_client, HttpFetcher};
pub use source::{PageSource, SavedPages};

use crate::config::Config;
use crate::model::ThreadResult;
use crate::url::resolve_thread_url;
use crate::Result;
use std::path::Path;

/// Crawls a thread over HTTP
///
/// This is the main entry point for a live crawl. It will:
/// 1. Resolve the thread id from the URL (no request is made if that fails)
/// 2. Build the HTTP client from `config.fetch`
/// 3. Fetch page 1 and work out the page count
/// 4. Fetch the remaining pages in order, pausing `config.fetch.delay_secs`
///    between requests
/// 5. Return the merged, deduplicated posts
///
/// # Example
///
/// ```no_run
/// use thread_harvest::config::Config;
/// use thread_harvest::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let thread = crawl(
///     "https://www.tibia.com/forum/?action=thread&threadid=4992269",
///     &config,
/// )
/// .await?;
/// println!("{} posts", thread.posts.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(thread_url: &str, config: &Config) -> Result<ThreadResult> {
    // No client is built and no request made for an unresolvable URL.
    resolve_thread_url(thread_url)?;
    let fetcher = HttpFetcher::new(&config.fetch)?;
    ThreadCrawler::new(fetcher, config)?.crawl(thread_url).await
}

/// Assembles a thread from page files saved beforehand
///
/// `files[0]` is page 1, `files[1]` page 2, and so on. No network access
/// happens, but the configured delay still separates consecutive pages. If
/// page 1 advertises more pages than were supplied, the crawl fails with
/// HTTP 404 for the first missing page unless `max_pages` caps it.
pub async fn crawl_saved<P: AsRef<Path>>(
    thread_url: &str,
    files: &[P],
    config: &Config,
) -> Result<ThreadResult> {
    let locator = resolve_thread_url(thread_url)?;
    let pages = SavedPages::from_files(&locator, files)?;
    ThreadCrawler::new(pages, config)?.crawl(thread_url).await
}
