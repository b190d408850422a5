//! Text patterns and markup predicates shared by the extraction strategies

use super::tree::{NodeIdx, PageTree};
use once_cell::sync::Lazy;
use regex::Regex;

/// Forum timestamp, e.g. `22.01.2026 11:04:19`
pub static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2}\.\d{2}\.\d{4}\s+\d{2}:\d{2}:\d{2}").unwrap());

/// `Post #39563969`
pub static POST_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Post\s*#(\d+)").unwrap());

/// Trailer appended to edited posts, up to the end of its line
pub static EDIT_NOTICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Edited by [^\n]+ on \d{2}\.\d{2}\.\d{4}[^\n]*").unwrap()
});

/// Signature separator lines
pub static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// `Results: 206`
pub static RESULTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)Results:\s*(\d+)").unwrap());

/// Page-number parameter inside a pagination link
pub static PAGE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"pagenumber=(\d+)").unwrap());

/// Image file names the forum uses to close a post block
const BOUNDARY_MARKERS: &[&str] = &["logo_oldpost", "logo_newpost"];

/// Link labels that point at profile pages but are not post authors
const NON_AUTHOR_LABELS: &[&str] = &[
    "community",
    "tibia",
    "forum",
    "board jump",
    "thread jump",
    "post jump",
    "page jump",
];

/// True for `<a>` elements linking to a character profile page
pub fn is_profile_link(tree: &PageTree, idx: NodeIdx) -> bool {
    tree.tag_name(idx) == Some("a")
        && tree
            .attr(idx, "href")
            .map(|href| href.contains("subtopic=characters") && href.contains("name="))
            .unwrap_or(false)
}

/// True for `<img>` elements showing an end-of-post graphic
pub fn is_boundary_marker(tree: &PageTree, idx: NodeIdx) -> bool {
    tree.tag_name(idx) == Some("img")
        && tree
            .attr(idx, "src")
            .map(|src| BOUNDARY_MARKERS.iter().any(|m| src.contains(m)))
            .unwrap_or(false)
}

/// True for navigation labels that must never be taken as an author
pub fn is_non_author_label(label: &str) -> bool {
    let lower = label.to_lowercase();
    NON_AUTHOR_LABELS.iter().any(|l| *l == lower)
}

/// Collapses every whitespace run to one space and trims the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
