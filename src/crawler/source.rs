//! Where page markup comes from
//!
//! The crawler only needs "give me the markup at this URL". [`PageSource`]
//! is that seam: the HTTP fetcher implements it for live crawls and
//! [`SavedPages`] implements it for pages already on disk or in memory.

use crate::url::ThreadLocator;
use crate::{HarvestError, Result};
use std::collections::HashMap;
use std::future::Future;
use std::path::Path;

/// A source of page markup, addressed by URL
pub trait PageSource {
    /// Returns the raw markup served at `url`
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Pages held in memory, keyed by URL
///
/// Asking for a URL that was never stored fails with HTTP 404, the same way
/// a missing remote page would.
#[derive(Debug, Clone, Default)]
pub struct SavedPages {
    pages: HashMap<String, String>,
}

impl SavedPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `markup` as the content of `url`
    pub fn insert(&mut self, url: impl Into<String>, markup: impl Into<String>) {
        self.pages.insert(url.into(), markup.into());
    }

    /// Builder-style variant of [`SavedPages::insert`]
    pub fn with_page(mut self, url: impl Into<String>, markup: impl Into<String>) -> Self {
        self.insert(url, markup);
        self
    }

    /// Loads saved page files as pages `1..=N` of a thread
    ///
    /// The first file becomes page 1, the second page 2, and so on. Files
    /// that are not valid UTF-8 are decoded lossily.
    pub fn from_files<P: AsRef<Path>>(locator: &ThreadLocator, files: &[P]) -> Result<Self> {
        let mut saved = Self::new();
        for (i, file) in files.iter().enumerate() {
            let bytes = std::fs::read(file.as_ref())?;
            let page_number = u32::try_from(i + 1).map_err(|_| {
                HarvestError::InvalidInput(format!("too many page files: {}", files.len()))
            })?;
            tracing::debug!(
                "Loaded {} as page {}",
                file.as_ref().display(),
                page_number
            );
            saved.insert(
                locator.url_for_page(page_number),
                String::from_utf8_lossy(&bytes).into_owned(),
            );
        }
        Ok(saved)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageSource for SavedPages {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| HarvestError::Http {
                url: url.to_string(),
                status_code: 404,
            })
    }
}
