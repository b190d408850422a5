//! URL handling module for Thread-Harvest
//!
//! Turns an arbitrary link into a thread into a stable thread identifier
//! plus a canonical base URL, and builds the URL of each page from it.

mod resolve;

// Re-export main functions
pub use resolve::{
    page_url, resolve_thread_url, ThreadLocator, PAGE_NUMBER_PARAM, THREAD_ID_PARAM,
};
