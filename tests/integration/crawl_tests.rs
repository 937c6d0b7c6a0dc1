//! Integration tests for the discovery engines
//!
//! These tests use wiremock to stand up a mock HTTP server and exercise the
//! real HTTP fetcher through both engines end-to-end.

use linkscout::fetcher::HttpFetcher;
use linkscout::{run_batch, RecursiveCrawler, ResultSink};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts an HTML page at `page_path` that links to the given targets
async fn mount_page(server: &MockServer, page_path: &str, links: &[String], expect: Option<u64>) {
    let body = format!(
        "<html><head><title>Page</title></head><body>{}</body></html>",
        links
            .iter()
            .map(|l| format!(r#"<a href="{}">link</a>"#, l))
            .collect::<String>()
    );

    // set_body_raw carries the content type with the body; a chained
    // insert_header would leave set_body_string's text/plain in place
    let mut mock = Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/html"));
    if let Some(n) = expect {
        mock = mock.expect(n);
    }
    mock.mount(server).await;
}

fn http_fetcher() -> Arc<HttpFetcher> {
    Arc::new(HttpFetcher::new("linkscout-test/0.1").expect("failed to build HTTP client"))
}

#[tokio::test]
async fn test_fetcher_extracts_links_from_mounted_page() {
    use linkscout::Fetcher;

    let server = MockServer::start().await;
    let base = server.uri();

    // Guards the test harness itself: if the mounted pages stopped being
    // served as text/html, the fetcher would return no links and every
    // link-following test below would silently stop at the seed.
    mount_page(&server, "/", &[format!("{}/next", base)], None).await;

    let page = http_fetcher()
        .fetch(&format!("{}/", base))
        .await
        .expect("fetch failed");
    assert_eq!(page.links, vec![format!("{}/next", base)]);
}

#[tokio::test]
async fn test_recursive_crawl_visits_each_page_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    // / -> page1, page2; page1 -> /, page2 (cycles and shared links)
    mount_page(
        &server,
        "/",
        &[format!("{}/page1", base), format!("{}/page2", base)],
        Some(1),
    )
    .await;
    mount_page(
        &server,
        "/page1",
        &[format!("{}/", base), format!("{}/page2", base)],
        Some(1),
    )
    .await;
    mount_page(&server, "/page2", &[], Some(1)).await;

    let sink = Arc::new(ResultSink::new());
    let crawler = RecursiveCrawler::new(http_fetcher(), sink.clone());
    crawler.crawl(&format!("{}/", base), 3).await;

    // Each page exactly one record, all successful
    let records = sink.drain();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.is_success()));
    assert_eq!(crawler.visited().len(), 3);

    // Mock expectations (exactly one GET per page) are verified on drop
}

#[tokio::test]
async fn test_recursive_crawl_respects_depth() {
    let server = MockServer::start().await;
    let base = server.uri();

    // Chain: / -> level1 -> level2 -> level3
    mount_page(&server, "/", &[format!("{}/level1", base)], None).await;
    mount_page(&server, "/level1", &[format!("{}/level2", base)], None).await;
    mount_page(&server, "/level2", &[format!("{}/level3", base)], None).await;
    mount_page(&server, "/level3", &[], Some(0)).await;

    let sink = Arc::new(ResultSink::new());
    let crawler = RecursiveCrawler::new(http_fetcher(), sink.clone());

    // Depth 3 fetches /, level1, level2; level3's task starts at depth 0
    crawler.crawl(&format!("{}/", base), 3).await;

    assert_eq!(sink.len(), 3);
    assert!(!crawler.visited().contains(&format!("{}/level3", base)));
}

#[tokio::test]
async fn test_broken_link_does_not_abort_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        &[format!("{}/good", base), format!("{}/missing", base)],
        None,
    )
    .await;
    mount_page(&server, "/good", &[], None).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let sink = Arc::new(ResultSink::new());
    let crawler = RecursiveCrawler::new(http_fetcher(), sink.clone());
    crawler.crawl(&format!("{}/", base), 2).await;

    let records = sink.drain();
    assert_eq!(records.len(), 3);

    let failures: Vec<_> = records.iter().filter(|r| !r.is_success()).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].url, format!("{}/missing", base));

    let successes = records.iter().filter(|r| r.is_success()).count();
    assert_eq!(successes, 2);
}

#[tokio::test]
async fn test_batch_fetches_stdin_style_input() {
    let server = MockServer::start().await;
    let base = server.uri();

    for p in ["/one", "/two", "/three", "/four", "/five"] {
        Mock::given(method("GET"))
            .and(path(p))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!("the Go page at {} says Go", p))
                    .insert_header("content-type", "text/plain"),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let input = format!(
        "{b}/one\n{b}/two\n{b}/three\n{b}/four\n{b}/five\n",
        b = base
    );
    let sink = ResultSink::new();
    let pattern = regex::Regex::new(r"Go").unwrap();

    run_batch(input.as_bytes(), 2, http_fetcher(), Some(pattern), &sink)
        .await
        .expect("batch run failed");

    let records = sink.drain();
    assert_eq!(records.len(), 5);
    for record in &records {
        assert!(record.is_success());
        assert_eq!(record.matches, Some(2), "wrong count for {}", record.url);
    }
}

#[tokio::test]
async fn test_batch_mixes_errors_and_successes() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fine"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let input = format!("{b}/ok\n{b}/gone\n{b}/ok\n", b = base);
    let sink = ResultSink::new();

    run_batch(input.as_bytes(), 3, http_fetcher(), None, &sink)
        .await
        .expect("batch run failed");

    let records = sink.drain();
    assert_eq!(records.len(), 3);
    assert_eq!(records.iter().filter(|r| !r.is_success()).count(), 1);
}
