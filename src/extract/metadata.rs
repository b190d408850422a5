//! Pagination hints read from a thread page

use super::patterns::{PAGE_NUMBER, RESULTS};
use super::tree::PageTree;

/// First `Results: N` count anywhere in the page text
pub fn total_results(tree: &PageTree) -> Option<u32> {
    let text = tree.text(tree.root());
    RESULTS
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Number of pages the thread spans, as far as this page can tell
///
/// The highest `pagenumber=` value among links wins. Without pagination
/// links the count is derived from `total_results` and the forum's page
/// size, never below one.
pub fn total_pages_hint(
    tree: &PageTree,
    total_results: Option<u32>,
    posts_per_page: u32,
) -> Option<u32> {
    let from_links = tree
        .elements_named("a")
        .filter_map(|a| tree.attr(a, "href"))
        .filter_map(|href| PAGE_NUMBER.captures(href))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max();

    from_links.or_else(|| {
        total_results.map(|results| results.div_ceil(posts_per_page.max(1)).max(1))
    })
}
