use crate::HarvestError;
use url::Url;

/// Query parameter carrying the thread identifier
pub const THREAD_ID_PARAM: &str = "threadid";

/// Query parameter carrying the 1-based page number
pub const PAGE_NUMBER_PARAM: &str = "pagenumber";

/// A thread identifier together with the canonical URL of its first page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadLocator {
    pub thread_id: String,
    pub base_url: String,
}

impl ThreadLocator {
    /// URL of page `page_number` of this thread
    pub fn page_url(&self, page_number: u32) -> String {
        page_url(&self.base_url, page_number)
    }

    /// URL actually requested for a page: the bare base URL for page 1,
    /// the base URL plus `pagenumber` for every later page
    pub fn url_for_page(&self, page_number: u32) -> String {
        if page_number <= 1 {
            self.base_url.clone()
        } else {
            self.page_url(page_number)
        }
    }
}

/// Extracts the thread identifier and canonical base URL from a thread link
///
/// The base URL keeps scheme, host, port and path. Its query is rebuilt as
/// `action=thread&threadid=<id>`; every other parameter of the input
/// (including `pagenumber`) and any fragment is dropped.
///
/// # Errors
///
/// `HarvestError::InvalidInput` when the URL cannot be parsed or carries no
/// numeric `threadid` parameter.
///
/// # Examples
///
/// ```
/// use thread_harvest::url::resolve_thread_url;
///
/// let locator = resolve_thread_url(
///     "https://www.tibia.com/forum/?action=thread&threadid=4992269&pagenumber=3",
/// )
/// .unwrap();
/// assert_eq!(locator.thread_id, "4992269");
/// assert_eq!(
///     locator.base_url,
///     "https://www.tibia.com/forum/?action=thread&threadid=4992269"
/// );
/// ```
pub fn resolve_thread_url(thread_url: &str) -> Result<ThreadLocator, HarvestError> {
    let parsed = Url::parse(thread_url.trim()).map_err(|e| {
        HarvestError::InvalidInput(format!("cannot parse thread URL '{}': {}", thread_url, e))
    })?;

    let thread_id = parsed
        .query_pairs()
        .find(|(key, _)| key == THREAD_ID_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            HarvestError::InvalidInput(format!(
                "thread URL has no {} parameter: {}",
                THREAD_ID_PARAM, thread_url
            ))
        })?;

    if !thread_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HarvestError::InvalidInput(format!(
            "{} must be numeric, got '{}'",
            THREAD_ID_PARAM, thread_id
        )));
    }

    let mut base = parsed;
    base.set_fragment(None);
    base.query_pairs_mut()
        .clear()
        .append_pair("action", "thread")
        .append_pair(THREAD_ID_PARAM, &thread_id);

    Ok(ThreadLocator {
        thread_id,
        base_url: base.into(),
    })
}

/// Appends the page-number parameter to a base URL
///
/// Uses `&` when the base already has a query string and `?` otherwise.
pub fn page_url(base_url: &str, page_number: u32) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}{}={}",
        base_url, separator, PAGE_NUMBER_PARAM, page_number
    )
}
