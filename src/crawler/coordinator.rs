//! Crawler coordinator - page-by-page thread acquisition
//!
//! The coordinator drives one crawl from start to finish:
//! - Resolving the thread URL
//! - Fetching page 1 and deciding how many pages the thread has
//! - Fetching the remaining pages strictly in order, pausing between requests
//! - Merging posts across pages and dropping repeats
//!
//! Requests are never issued concurrently. Any fetch failure aborts the
//! whole crawl and discards what was collected so far.

use crate::config::{Config, CrawlConfig, ExtractConfig};
use crate::crawler::source::PageSource;
use crate::extract::{extract_page, PageExtraction};
use crate::model::{Post, ThreadResult};
use crate::url::{resolve_thread_url, ThreadLocator};
use crate::Result;
use std::collections::HashSet;
use std::time::Duration;

/// Crawls complete threads from a [`PageSource`]
pub struct ThreadCrawler<S> {
    source: S,
    delay: Duration,
    crawl: CrawlConfig,
    extract: ExtractConfig,
}

impl<S: PageSource> ThreadCrawler<S> {
    /// Creates a crawler reading pages from `source`
    ///
    /// Takes the inter-request delay from `config.fetch`, the page cap and
    /// dedup settings from `config.crawl` and the extraction tuning from
    /// `config.extract`.
    ///
    /// Fails with `HarvestError::Config` when the delay is not a usable
    /// number of seconds.
    pub fn new(source: S, config: &Config) -> Result<Self> {
        Ok(Self {
            source,
            delay: config.fetch.delay()?,
            crawl: config.crawl.clone(),
            extract: config.extract.clone(),
        })
    }

    /// Overrides the pause between consecutive page requests
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Overrides the page cap
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.crawl.max_pages = max_pages;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Crawls every page of the thread behind `thread_url`
    ///
    /// # Returns
    ///
    /// * `Ok(ThreadResult)` - All pages fetched; `posts` may be empty
    /// * `Err(HarvestError::InvalidInput)` - No thread id in the URL; nothing was fetched
    /// * `Err(HarvestError::Network | HarvestError::Http)` - A page request failed
    pub async fn crawl(&self, thread_url: &str) -> Result<ThreadResult> {
        let locator = resolve_thread_url(thread_url)?;
        tracing::info!(
            "Crawling thread {} ({})",
            locator.thread_id,
            locator.base_url
        );

        let first = self.fetch_page(&locator, 1).await?;
        let total_pages = self.resolve_total_pages(first.total_pages_hint);
        tracing::info!(
            "Thread {} has {} page(s) to fetch (reported results: {:?})",
            locator.thread_id,
            total_pages,
            first.total_results
        );

        let mut accumulator = PostAccumulator::new(self.crawl.dedup_body_prefix);
        accumulator.extend(first.posts);

        for page_number in 2..=total_pages {
            self.pause().await;
            let page = self.fetch_page(&locator, page_number).await?;
            accumulator.extend(page.posts);
        }

        let posts = accumulator.into_posts();
        tracing::info!(
            "Thread {} crawled: {} posts from {} page(s)",
            locator.thread_id,
            posts.len(),
            total_pages
        );

        Ok(ThreadResult {
            thread_id: locator.thread_id,
            title: None,
            total_pages,
            total_results: first.total_results,
            posts,
        })
    }

    /// Page count from the first page's hint, at least one and at most the cap
    fn resolve_total_pages(&self, hint: Option<u32>) -> u32 {
        let pages = hint.unwrap_or(1).max(1);
        match self.crawl.max_pages {
            Some(cap) => pages.min(cap.max(1)),
            None => pages,
        }
    }

    async fn fetch_page(
        &self,
        locator: &ThreadLocator,
        page_number: u32,
    ) -> Result<PageExtraction> {
        let url = locator.url_for_page(page_number);
        tracing::debug!("Fetching page {}: {}", page_number, url);

        let markup = self.source.fetch(&url).await?;
        let extraction = extract_page(&markup, &self.extract);

        if extraction.posts.is_empty() {
            tracing::warn!("No posts found on page {} ({})", page_number, url);
        } else {
            tracing::debug!(
                "Page {} yielded {} posts",
                page_number,
                extraction.posts.len()
            );
        }

        Ok(extraction)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Ordered post list that drops posts already seen on an earlier page
struct PostAccumulator {
    posts: Vec<Post>,
    seen: HashSet<(String, String, String)>,
    body_prefix: usize,
}

impl PostAccumulator {
    fn new(body_prefix: usize) -> Self {
        Self {
            posts: Vec::new(),
            seen: HashSet::new(),
            body_prefix,
        }
    }

    fn extend(&mut self, posts: Vec<Post>) {
        for post in posts {
            if self.seen.insert(post.thread_key(self.body_prefix)) {
                self.posts.push(post);
            } else {
                tracing::debug!("Dropping repeated post by {} at {}", post.author, post.date);
            }
        }
    }

    fn into_posts(self) -> Vec<Post> {
        self.posts
    }
}
