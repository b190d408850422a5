//! Integration tests for Thread-Harvest
//!
//! These tests use wiremock to stand in for the forum and exercise the
//! fetcher and the full crawl cycle end-to-end.

mod crawl_tests;
mod fetch_tests;
