//! HTTP fetcher tests against a mock server

use std::time::Duration;
use thread_harvest::config::FetchConfig;
use thread_harvest::crawler::{HttpFetcher, PageSource};
use thread_harvest::HarvestError;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_config() -> FetchConfig {
    FetchConfig {
        timeout_secs: 5,
        delay_secs: 0.0,
        user_agent: "HarvestTestAgent/1.0".to_string(),
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn test_fetch_returns_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forum/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>thread</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&create_test_config()).unwrap();
    let body = fetcher
        .fetch(&format!("{}/forum/", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(body, "<html>thread</html>");
}

#[tokio::test]
async fn test_fetch_sends_identification_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(header("user-agent", "HarvestTestAgent/1.0"))
        .and(header_exists("accept"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&create_test_config()).unwrap();
    let body = fetcher.fetch(&mock_server.uri()).await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_fetch_preserves_status_code() {
    let mock_server = MockServer::start().await;

    for status in [403u16, 404, 429, 500] {
        Mock::given(method("GET"))
            .and(path(format!("/status/{}", status)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;
    }

    let fetcher = HttpFetcher::new(&create_test_config()).unwrap();
    for status in [403u16, 404, 429, 500] {
        let url = format!("{}/status/{}", mock_server.uri(), status);
        match fetcher.fetch(&url).await {
            Err(HarvestError::Http {
                status_code,
                url: failed_url,
            }) => {
                assert_eq!(status_code, status);
                assert_eq!(failed_url, url);
            }
            other => panic!("expected HTTP {} error, got {:?}", status, other),
        }
    }
}

#[tokio::test]
async fn test_fetch_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("too late")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = FetchConfig {
        timeout_secs: 1,
        ..create_test_config()
    };
    let fetcher = HttpFetcher::new(&config).unwrap();

    let result = fetcher.fetch(&mock_server.uri()).await;
    match result {
        Err(e @ HarvestError::Network { .. }) => assert!(e.is_retryable()),
        other => panic!("expected network error, got {:?}", other),
    }
}
