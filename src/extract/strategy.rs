//! Post-locating strategies
//!
//! Each strategy is a pure function from a parsed page to the posts it could
//! find. The extractor runs them in order and keeps the first non-empty
//! result.

use super::patterns::{
    is_boundary_marker, is_non_author_label, is_profile_link, normalize_whitespace, DATE,
    EDIT_NOTICE, POST_ID, UNDERSCORES,
};
use super::tree::{NodeIdx, PageTree};
use crate::config::ExtractConfig;
use crate::model::Post;

/// Signature shared by all strategies
pub type StrategyFn = fn(&PageTree, &ExtractConfig) -> Option<Vec<Post>>;

/// A named post-locating strategy
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub run: StrategyFn,
}

/// All strategies, most precise first
pub const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "boundary-marker",
        run: boundary_marker_walk,
    },
    Strategy {
        name: "author-link",
        run: author_link_walk,
    },
];

/// Locates posts from the end-of-post graphics
///
/// For each marker, walks up until an ancestor holds both a timestamp and a
/// usable profile link, and builds the post from that ancestor. Returns
/// `None` when the page has no markers or none of them led to a post.
pub fn boundary_marker_walk(tree: &PageTree, config: &ExtractConfig) -> Option<Vec<Post>> {
    let posts: Vec<Post> = tree
        .elements_named("img")
        .filter(|&img| is_boundary_marker(tree, img))
        .filter_map(|marker| {
            tree.ancestors(marker)
                .take(config.marker_walk_depth)
                .find_map(|block| post_from_marker_block(tree, block, config))
        })
        .collect();

    if posts.is_empty() {
        None
    } else {
        Some(posts)
    }
}

fn post_from_marker_block(
    tree: &PageTree,
    block: NodeIdx,
    config: &ExtractConfig,
) -> Option<Post> {
    let text = tree.text(block);
    if !DATE.is_match(&text) {
        return None;
    }

    let link = tree
        .descendants(block)
        .find(|&n| is_profile_link(tree, n))?;
    let author = tree.stripped_text(link);
    if !is_plausible_author(&author, config) {
        tracing::trace!("Rejected author candidate {:?} above boundary marker", author);
        return None;
    }

    build_post(author, &text)
}

/// Locates posts from profile links alone
///
/// Looser than [`boundary_marker_walk`]: any profile link whose label looks
/// like a name and that sits below a timestamp is taken as a post author.
pub fn author_link_walk(tree: &PageTree, config: &ExtractConfig) -> Option<Vec<Post>> {
    let posts: Vec<Post> = tree
        .elements_named("a")
        .filter(|&a| is_profile_link(tree, a))
        .filter_map(|link| {
            let author = tree.stripped_text(link);
            if !is_plausible_author(&author, config) || is_non_author_label(&author) {
                tracing::trace!("Skipping profile link {:?}", author);
                return None;
            }

            let block = tree.find_ancestor(link, config.author_walk_depth, |n| {
                DATE.is_match(&tree.text(n))
            })?;
            build_post(author, &tree.text(block))
        })
        .collect();

    if posts.is_empty() {
        None
    } else {
        Some(posts)
    }
}

fn is_plausible_author(author: &str, config: &ExtractConfig) -> bool {
    !author.is_empty() && author.chars().count() <= config.max_author_len
}

/// Builds a post from the full text of the block that contains it
///
/// The first timestamp becomes the date and is cut from the body, together
/// with edit notices and underscore separator runs.
pub fn build_post(author: String, block_text: &str) -> Option<Post> {
    let date_match = DATE.find(block_text)?;
    let date = normalize_whitespace(date_match.as_str());

    let mut without_date = String::with_capacity(block_text.len());
    without_date.push_str(&block_text[..date_match.start()]);
    without_date.push_str(&block_text[date_match.end()..]);

    let body = EDIT_NOTICE.replace_all(&without_date, "");
    let body = UNDERSCORES.replace_all(&body, "");
    let body = normalize_whitespace(&body);

    let post_id = POST_ID
        .captures(block_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    Some(Post {
        post_id,
        author,
        date,
        body,
    })
}
