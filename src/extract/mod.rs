//! Post extraction from rendered thread pages
//!
//! The forum offers no machine-readable view of a thread, so posts are
//! recovered from the HTML with two heuristics:
//!
//! 1. **Boundary-marker walk**: every post ends with a small graphic. From
//!    each one, walk up to the nearest block holding a timestamp and a
//!    profile link.
//! 2. **Author-link walk**: from every profile link that looks like a name,
//!    walk up to the nearest block holding a timestamp.
//!
//! The first strategy that yields posts wins. Within one page, posts sharing
//! an (author, date) pair are collapsed to the first occurrence.
//!
//! Pagination metadata (`Results: N`, page links) is read independently of
//! the posts.

mod metadata;
mod patterns;
mod strategy;
mod tree;

pub use metadata::{total_pages_hint, total_results};
pub use patterns::normalize_whitespace;
pub use strategy::{author_link_walk, boundary_marker_walk, build_post, Strategy, STRATEGIES};
pub use tree::{NodeIdx, PageTree};

use crate::config::ExtractConfig;
use crate::model::Post;
use std::collections::HashSet;

/// Everything read from a single thread page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    /// Posts in page order, without same-page duplicates
    pub posts: Vec<Post>,

    /// `Results: N` as reported by the page
    pub total_results: Option<u32>,

    /// Page count suggested by pagination links or by `total_results`
    pub total_pages_hint: Option<u32>,
}

/// Extracts posts and pagination hints from one page of markup
///
/// A page without recognizable posts is not an error; it yields an empty
/// `posts` list.
///
/// # Example
///
/// ```
/// use thread_harvest::config::ExtractConfig;
/// use thread_harvest::extract::extract_page;
///
/// let html = r#"<div>
///     <a href="?subtopic=characters&name=Knight+Alpha">Knight Alpha</a>
///     01.02.2024 10:00:00 Hello
/// </div><div>Results: 1</div>"#;
/// let page = extract_page(html, &ExtractConfig::default());
/// assert_eq!(page.posts.len(), 1);
/// assert_eq!(page.posts[0].author, "Knight Alpha");
/// assert_eq!(page.total_pages_hint, Some(1));
/// ```
pub fn extract_page(markup: &str, config: &ExtractConfig) -> PageExtraction {
    let tree = PageTree::parse(markup);
    extract_from_tree(&tree, config)
}

/// Same as [`extract_page`] for an already parsed page
pub fn extract_from_tree(tree: &PageTree, config: &ExtractConfig) -> PageExtraction {
    let posts = locate_posts(tree, config);
    let total_results = total_results(tree);
    let total_pages_hint = total_pages_hint(tree, total_results, config.posts_per_page);

    PageExtraction {
        posts: dedup_page_posts(posts),
        total_results,
        total_pages_hint,
    }
}

fn locate_posts(tree: &PageTree, config: &ExtractConfig) -> Vec<Post> {
    for strategy in STRATEGIES {
        match (strategy.run)(tree, config) {
            Some(posts) => {
                tracing::debug!(
                    "Strategy {} located {} posts",
                    strategy.name,
                    posts.len()
                );
                return posts;
            }
            None => tracing::debug!("Strategy {} found nothing", strategy.name),
        }
    }
    Vec::new()
}

fn dedup_page_posts(posts: Vec<Post>) -> Vec<Post> {
    let mut seen = HashSet::new();
    posts
        .into_iter()
        .filter(|post| seen.insert((post.author.clone(), post.date.clone())))
        .collect()
}
