//! Integration tests for the crawl pipeline
//!
//! These tests run the full discovery → pagination → extraction cycle
//! against wiremock servers serving the site's two page templates.

use tldk_harvest::config::Config;
use tldk_harvest::crawler::Crawler;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server, with no
/// inter-page delay
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.master_index_url = format!("{}/baiviet/tai-lieu-va-ebook/", base_url);
    config.crawler.page_delay_ms = 0;
    config
}

/// An anchor matching the master index's button widget markup
fn button_anchor(href: &str) -> String {
    format!(
        r#"<a class="pagelayer-btn-holder pagelayer-ele-link pagelayer-btn-custom pagelayer-btn-mini pagelayer-btn-icon-left" href="{}">Listing</a>"#,
        href
    )
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

#[tokio::test]
async fn test_end_to_end_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    let ebook_listing = format!("{}/ebook/sach/?page=01", base);
    let article_listing = format!("{}/baiviet/tin/", base);

    // Master index advertises one ebook and one article listing
    Mock::given(method("GET"))
        .and(path("/baiviet/tai-lieu-va-ebook/"))
        .respond_with(html_response(format!(
            "<html><body>{}{}</body></html>",
            button_anchor(&ebook_listing),
            button_anchor(&article_listing)
        )))
        .mount(&server)
        .await;

    // Ebook listing page 1: pagination controls (last page 2) plus links
    Mock::given(method("GET"))
        .and(path("/ebook/sach/"))
        .and(query_param("page", "01"))
        .respond_with(html_response(
            r#"<html><body>
            <div class="page-number"><ul>
                <li><a href="?page=01">1</a></li>
                <li><a href="?page=02">2</a></li>
                <li><a href="?page=02">&gt;</a></li>
            </ul></div>
            <p class="download-box"><a href="https://drive.google.com/file/d/EBOOK1/view">one</a></p>
            <p class="download-box"><a href="https://drive.google.com/file/d/EBOOK2/view">two</a></p>
            </body></html>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    // Ebook listing page 2
    Mock::given(method("GET"))
        .and(path("/ebook/sach/"))
        .and(query_param("page", "02"))
        .respond_with(html_response(
            r#"<html><body>
            <p class="download-box"><a href="https://drive.google.com/file/d/EBOOK3/view">three</a></p>
            </body></html>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    // Article listing: no next-control, single page
    Mock::given(method("GET"))
        .and(path("/baiviet/tin/"))
        .respond_with(html_response(
            r#"<html><body>
            <div class="pagelayer-wposts-featured"><a href="https://tailieudieuky.com/baiviet/mot/">post</a></div>
            </body></html>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    let crawler = Crawler::new(create_test_config(&base)).expect("build crawler");
    let listings = crawler.discover_listings().await.expect("discovery");

    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0].url, ebook_listing);
    assert_eq!(listings[0].last_page, 2);
    assert_eq!(listings[1].url, article_listing);
    assert_eq!(listings[1].last_page, 1);

    let result = crawler.crawl(&listings).await;

    assert_eq!(
        result.ebooks,
        vec![
            "https://drive.google.com/file/d/EBOOK1/view",
            "https://drive.google.com/file/d/EBOOK2/view",
            "https://drive.google.com/file/d/EBOOK3/view"
        ]
    );
    assert_eq!(result.articles, vec!["https://tailieudieuky.com/baiviet/mot/"]);
}

#[tokio::test]
async fn test_partial_failure_keeps_other_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    let listing = format!("{}/ebook/sach/?page=01", base);

    // Page 1 carries controls saying the listing spans 3 pages
    Mock::given(method("GET"))
        .and(path("/ebook/sach/"))
        .and(query_param("page", "01"))
        .respond_with(html_response(
            r#"<html><body>
            <div class="page-number"><ul>
                <li><a href="?page=01">1</a></li>
                <li><a href="?page=03">3</a></li>
                <li><a href="?page=02">&gt;</a></li>
            </ul></div>
            <p class="download-box"><a href="/file-page1">p1</a></p>
            </body></html>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    // Page 2 fails
    Mock::given(method("GET"))
        .and(path("/ebook/sach/"))
        .and(query_param("page", "02"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/ebook/sach/"))
        .and(query_param("page", "03"))
        .respond_with(html_response(
            r#"<p class="download-box"><a href="/file-page3">p3</a></p>"#.to_string(),
        ))
        .mount(&server)
        .await;

    let crawler = Crawler::new(create_test_config(&base)).expect("build crawler");
    let listings = vec![tldk_harvest::crawler::ListingReference {
        url: listing,
        last_page: 3,
    }];

    let result = crawler.crawl(&listings).await;

    // Page 2's links are missing but pages 1 and 3 survive, in order
    assert_eq!(result.ebooks, vec!["/file-page1", "/file-page3"]);
    assert!(result.articles.is_empty());
}

#[tokio::test]
async fn test_discovery_deduplicates_first_wins() {
    let server = MockServer::start().await;
    let base = server.uri();

    let listing = format!("{}/ebook/sach/?page=01", base);

    Mock::given(method("GET"))
        .and(path("/baiviet/tai-lieu-va-ebook/"))
        .respond_with(html_response(format!(
            "<html><body>{}{}</body></html>",
            button_anchor(&listing),
            button_anchor(&listing)
        )))
        .mount(&server)
        .await;

    // Single-page listing: no pagination controls
    Mock::given(method("GET"))
        .and(path("/ebook/sach/"))
        .respond_with(html_response("<html><body></body></html>".to_string()))
        .mount(&server)
        .await;

    let crawler = Crawler::new(create_test_config(&base)).expect("build crawler");
    let listings = crawler.discover_listings().await.expect("discovery");

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].url, listing);
    assert_eq!(listings[0].last_page, 1);
}

#[tokio::test]
async fn test_unknown_listing_contributes_nothing() {
    let server = MockServer::start().await;
    let base = server.uri();

    let unknown = format!("{}/gioi-thieu/", base);

    Mock::given(method("GET"))
        .and(path("/baiviet/tai-lieu-va-ebook/"))
        .respond_with(html_response(format!(
            "<html><body>{}</body></html>",
            button_anchor(&unknown)
        )))
        .mount(&server)
        .await;

    let crawler = Crawler::new(create_test_config(&base)).expect("build crawler");
    let listings = crawler.discover_listings().await.expect("discovery");

    // Resolution fails for the unknown kind, so it falls back to one page
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].last_page, 1);

    let result = crawler.crawl(&listings).await;
    assert!(result.ebooks.is_empty());
    assert!(result.articles.is_empty());
}

#[tokio::test]
async fn test_resolution_failure_defaults_to_one_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    let listing = format!("{}/ebook/sach/?page=01", base);

    Mock::given(method("GET"))
        .and(path("/baiviet/tai-lieu-va-ebook/"))
        .respond_with(html_response(format!(
            "<html><body>{}</body></html>",
            button_anchor(&listing)
        )))
        .mount(&server)
        .await;

    // The listing itself is down
    Mock::given(method("GET"))
        .and(path("/ebook/sach/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let crawler = Crawler::new(create_test_config(&base)).expect("build crawler");
    let listings = crawler.discover_listings().await.expect("discovery");

    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].last_page, 1);
}

#[tokio::test]
async fn test_extraction_is_idempotent() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/ebook/sach/"))
        .respond_with(html_response(
            r#"<p class="download-box"><a href="/a">a</a></p>
               <p class="download-box"><a href="/b">b</a></p>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    let config = create_test_config(&base);
    let client = tldk_harvest::crawler::build_http_client(&config.crawler).unwrap();
    let listing = format!("{}/ebook/sach/?page=01", base);

    let first = tldk_harvest::crawler::extract_links(&client, &config.site, &listing, 1)
        .await
        .unwrap();
    let second = tldk_harvest::crawler::extract_links(&client, &config.site, &listing, 1)
        .await
        .unwrap();

    assert_eq!(first, vec!["/a", "/b"]);
    assert_eq!(first, second);
}
