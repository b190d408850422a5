//! Output module for thread artifacts
//!
//! A crawled thread is stored as one JSON document per thread:
//!
//! ```json
//! {
//!   "thread_id": "4992269",
//!   "title": null,
//!   "total_pages": 11,
//!   "total_results": 206,
//!   "posts": [
//!     { "post_id": "39563969", "author": "...", "date": "22.01.2026 11:04:19", "body": "..." }
//!   ]
//! }
//! ```

mod json;

pub use json::{read_thread_json, thread_file_name, write_thread_json};
