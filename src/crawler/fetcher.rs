//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building an HTTP client with the configured identification headers
//! - GET requests for thread pages
//! - Error classification (transport failure vs. HTTP status)
//!
//! The fetcher never retries and never sleeps; pacing between requests is
//! the crawler's job.

use crate::config::FetchConfig;
use crate::crawler::source::PageSource;
use crate::{ConfigError, HarvestError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use std::time::Duration;

/// Upper bound on the TCP/TLS connect phase, independent of the request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds an HTTP client with proper configuration
///
/// The client sends the configured browser-like `User-Agent`, `Accept` and
/// `Accept-Language` headers on every request. It keeps no cookies.
///
/// # Example
///
/// ```no_run
/// use thread_harvest::config::FetchConfig;
/// use thread_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, header_value("accept", &config.accept)?);
    headers.insert(
        ACCEPT_LANGUAGE,
        header_value("accept-language", &config.accept_language)?,
    );

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(config.timeout())
        .connect_timeout(CONNECT_TIMEOUT.min(config.timeout()))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(HarvestError::ClientBuild)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        HarvestError::Config(ConfigError::Validation(format!(
            "invalid {} header value {:?}: {}",
            name, value, e
        )))
    })
}

/// Fetches pages over HTTP
///
/// Stateless apart from the connection pool inside the `reqwest` client, so
/// one fetcher can serve any number of sequential crawls.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self::from_client(build_http_client(config)?))
    }

    /// Wraps an existing client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageSource for HttpFetcher {
    /// Fetches a URL and returns its body
    ///
    /// # Error Classification
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx | body text |
    /// | any other status | `HarvestError::Http` with that status |
    /// | timeout | `HarvestError::Network` |
    /// | connection refused / DNS / TLS | `HarvestError::Network` |
    /// | body read failure | `HarvestError::Network` |
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("HTTP {} for {}", status.as_u16(), url);
            return Err(HarvestError::Http {
                url: url.to_string(),
                status_code: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| network_error(url, &e))
    }
}

fn network_error(url: &str, error: &reqwest::Error) -> HarvestError {
    let message = if error.is_timeout() {
        "Request timeout".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        error.to_string()
    };

    HarvestError::Network {
        url: url.to_string(),
        message,
    }
}
