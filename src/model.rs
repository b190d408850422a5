//! Data model shared by the extractor, the crawler and the JSON artifact

use serde::{Deserialize, Serialize};

/// One forum message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Forum post number, when the page shows one
    pub post_id: Option<String>,

    /// Display name of the posting character
    pub author: String,

    /// Timestamp as rendered by the forum (`DD.MM.YYYY HH:MM:SS`)
    pub date: String,

    /// Whitespace-normalized post text
    pub body: String,
}

impl Post {
    /// Key used to drop repeated posts across the whole thread
    ///
    /// The body is cut to its first `prefix_chars` characters.
    pub fn thread_key(&self, prefix_chars: usize) -> (String, String, String) {
        (
            self.author.clone(),
            self.date.clone(),
            self.body.chars().take(prefix_chars).collect(),
        )
    }
}

/// Everything collected from one thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadResult {
    pub thread_id: String,

    /// Reserved; never filled in by the crawler
    pub title: Option<String>,

    pub total_pages: u32,

    /// Result count reported by the forum, advisory only
    pub total_results: Option<u32>,

    pub posts: Vec<Post>,
}
