//! End-to-end crawl tests against a mocked forum

use crate::fixtures::{post_row, thread_page, two_page_thread_page1, two_page_thread_page2, THREAD_ID};
use std::time::Duration;
use tempfile::TempDir;
use thread_harvest::config::Config;
use thread_harvest::crawler::{crawl, crawl_saved, HttpFetcher, ThreadCrawler};
use thread_harvest::output::{read_thread_json, write_thread_json};
use thread_harvest::HarvestError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration without inter-request delay
fn create_test_config() -> Config {
    let mut config = Config::default();
    config.fetch.delay_secs = 0.0;
    config.fetch.timeout_secs = 5;
    config
}

fn thread_url(server: &MockServer) -> String {
    format!(
        "{}/forum/?action=thread&threadid={}&pagenumber=1",
        server.uri(),
        THREAD_ID
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

/// Mounts a two-page thread; page 2 is mounted first so it wins over the
/// catch-all page 1 mock.
async fn mount_two_page_thread(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/forum/"))
        .and(query_param("threadid", THREAD_ID))
        .and(query_param("pagenumber", "2"))
        .respond_with(html(two_page_thread_page2()))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forum/"))
        .and(query_param("threadid", THREAD_ID))
        .and(query_param("action", "thread"))
        .respond_with(html(two_page_thread_page1()))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_two_page_thread() {
    let mock_server = MockServer::start().await;
    mount_two_page_thread(&mock_server).await;

    let result = crawl(&thread_url(&mock_server), &create_test_config())
        .await
        .expect("Crawl failed");

    assert_eq!(result.thread_id, THREAD_ID);
    assert_eq!(result.title, None);
    assert_eq!(result.total_pages, 2);
    assert_eq!(result.total_results, Some(5));

    let authors: Vec<_> = result.posts.iter().map(|p| p.author.as_str()).collect();
    assert_eq!(
        authors,
        vec!["Knight Alpha", "Druid Beta", "Paladin Delta", "Sorcerer Gamma"]
    );

    let ids: Vec<_> = result
        .posts
        .iter()
        .map(|p| p.post_id.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(ids, vec!["1001", "1002", "1003", "1004"]);

    let edited = &result.posts[1];
    assert_eq!(edited.date, "01.01.2020 10:05:00");
    assert!(edited.body.contains("I agree with this."));
    assert!(!edited.body.contains("Edited by"));
    assert!(!edited.body.contains("10:06:00"));

    // Wiremock verifies the expect(1) counts when mock_server drops
}

#[tokio::test]
async fn test_max_pages_stops_after_first_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("pagenumber", "2"))
        .respond_with(html(two_page_thread_page2()))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forum/"))
        .respond_with(html(two_page_thread_page1()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.crawl.max_pages = Some(1);

    let result = crawl(&thread_url(&mock_server), &config)
        .await
        .expect("Crawl failed");
    assert_eq!(result.total_pages, 1);
    assert_eq!(result.posts.len(), 3);
}

#[tokio::test]
async fn test_page_count_inferred_from_results() {
    let mock_server = MockServer::start().await;

    // No pagination links on either page, only "Results: 21": two pages of 20.
    let rows_page1: Vec<String> = (0..20)
        .map(|i| {
            post_row(
                2000 + i,
                &format!("Player {}", i),
                &format!("02.02.2021 10:{:02}:00", i),
                "Body text",
            )
        })
        .collect();
    let rows_page2 = vec![post_row(2020, "Player Last", "02.02.2021 11:00:00", "Final")];

    Mock::given(method("GET"))
        .and(query_param("pagenumber", "2"))
        .respond_with(html(thread_page(2, 1, 21, &rows_page2)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forum/"))
        .respond_with(html(thread_page(1, 1, 21, &rows_page1)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = crawl(&thread_url(&mock_server), &create_test_config())
        .await
        .expect("Crawl failed");
    assert_eq!(result.total_pages, 2);
    assert_eq!(result.total_results, Some(21));
    assert_eq!(result.posts.len(), 21);
    assert_eq!(result.posts[20].author, "Player Last");
}

#[tokio::test]
async fn test_http_error_mid_crawl_aborts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("pagenumber", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forum/"))
        .respond_with(html(two_page_thread_page1()))
        .mount(&mock_server)
        .await;

    let result = crawl(&thread_url(&mock_server), &create_test_config()).await;
    match result {
        Err(HarvestError::Http { status_code, url }) => {
            assert_eq!(status_code, 503);
            assert!(url.contains("pagenumber=2"));
        }
        other => panic!("expected HTTP 503, got {:?}", other),
    }
}

#[tokio::test]
async fn test_blocked_first_page_keeps_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let result = crawl(&thread_url(&mock_server), &create_test_config()).await;
    let error = result.expect_err("expected failure");
    assert_eq!(error.status_code(), Some(403));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_invalid_url_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html(two_page_thread_page1()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let url = format!("{}/forum/?action=thread", mock_server.uri());
    let result = crawl(&url, &create_test_config()).await;
    assert!(matches!(result, Err(HarvestError::InvalidInput(_))));
}

#[tokio::test]
async fn test_fetcher_reused_across_crawls() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("pagenumber", "2"))
        .respond_with(html(two_page_thread_page2()))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/forum/"))
        .respond_with(html(two_page_thread_page1()))
        .expect(2)
        .mount(&mock_server)
        .await;

    let config = create_test_config();
    let fetcher = HttpFetcher::new(&config.fetch).unwrap();
    let crawler = ThreadCrawler::new(fetcher, &config)
        .unwrap()
        .with_delay(Duration::ZERO);

    let first = crawler.crawl(&thread_url(&mock_server)).await.unwrap();
    let second = crawler.crawl(&thread_url(&mock_server)).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.posts.len(), 4);
}

#[tokio::test]
async fn test_saved_pages_match_live_crawl() {
    let dir = TempDir::new().unwrap();
    let page1 = dir.path().join("page1.html");
    let page2 = dir.path().join("page2.html");
    std::fs::write(&page1, two_page_thread_page1()).unwrap();
    std::fs::write(&page2, two_page_thread_page2()).unwrap();

    let url = format!(
        "https://www.tibia.com/forum/?action=thread&threadid={}",
        THREAD_ID
    );
    let result = crawl_saved(&url, &[page1, page2], &create_test_config())
        .await
        .expect("Offline crawl failed");

    assert_eq!(result.total_pages, 2);
    assert_eq!(result.posts.len(), 4);
}

#[tokio::test]
async fn test_crawl_then_write_artifact() {
    let mock_server = MockServer::start().await;
    mount_two_page_thread(&mock_server).await;

    let result = crawl(&thread_url(&mock_server), &create_test_config())
        .await
        .expect("Crawl failed");

    let dir = TempDir::new().unwrap();
    let path = write_thread_json(&result, dir.path()).unwrap();
    assert!(path.ends_with(format!("thread_{}.json", THREAD_ID)));

    let loaded = read_thread_json(&path).unwrap();
    assert_eq!(loaded, result);
}
