//! Integration tests for the scraping engine
//!
//! These tests use wiremock to stand in for the external service and
//! exercise the full fetch-and-extract cycle, including the two-step
//! session-cookie dance.

use fake_sms::{FakeSmsError, Scraper};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_HTML: &str = r#"<html><body>
<div class="number-boxes">
  <div class="number-boxes-item d-flex flex-column">
    <div class="row"><h4>+15551234567</h4><h5>United States</h5></div>
  </div>
  <div class="number-boxes-item d-flex flex-column">
    <div class="row"><h4>+447700900000</h4><h5>United Kingdom</h5></div>
  </div>
  <div class="number-boxes-item d-flex flex-column">
    <div class="row"><h5>No number here</h5></div>
  </div>
</div>
</body></html>"#;

const MESSAGES_HTML: &str = r#"<html><body>
<table><tbody>
  <tr><td>Acme</td><td>Your code is <b>123456</b></td><td>2 minutes ago</td></tr>
  <tr><td>short row</td><td>skipped</td></tr>
  <tr><td>+15559999999</td><td>hello there</td><td>1 hour ago</td></tr>
</tbody></table>
</body></html>"#;

async fn scraper_for(server: &MockServer) -> Scraper {
    let base = Url::parse(&server.uri()).expect("mock server URI should parse");
    Scraper::with_base(base).expect("scraper should build")
}

#[tokio::test]
async fn test_list_available_numbers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_HTML))
        .mount(&server)
        .await;

    let scraper = scraper_for(&server).await;
    let numbers = scraper.list_available_numbers().await.unwrap();

    // two complete items, the third lacks an h4 and is skipped
    assert_eq!(numbers.len(), 2);
    assert_eq!(numbers[0].number, "+15551234567");
    assert_eq!(numbers[0].country, "United States");
    assert_eq!(numbers[1].number, "+447700900000");
}

#[tokio::test]
async fn test_list_available_numbers_layout_change_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>redesigned</body></html>"))
        .mount(&server)
        .await;

    let scraper = scraper_for(&server).await;
    let err = scraper.list_available_numbers().await.unwrap_err();
    assert!(matches!(err, FakeSmsError::Extraction(_)));
}

#[tokio::test]
async fn test_list_available_numbers_http_error_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let scraper = scraper_for(&server).await;
    let err = scraper.list_available_numbers().await.unwrap_err();
    assert!(matches!(err, FakeSmsError::Status { status: 503, .. }));
}

#[tokio::test]
async fn test_list_messages_forwards_session_cookie() {
    let server = MockServer::start().await;

    // listing page issues the session cookie
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "__cfduid=abc123; Path=/")
                .set_body_string(LISTING_HTML),
        )
        .mount(&server)
        .await;

    // per-number page only answers when the cookie comes back
    Mock::given(method("GET"))
        .and(path("/sms/15551234567/"))
        .and(header("cookie", "__cfduid=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MESSAGES_HTML))
        .mount(&server)
        .await;

    let scraper = scraper_for(&server).await;
    let messages = scraper.list_messages_for("+15551234567").await.unwrap();

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].originator, "Acme");
    assert_eq!(messages[0].body, "Your code is 123456");
    assert_eq!(messages[0].created_at, "2 minutes ago");
    assert_eq!(messages[1].originator, "+15559999999");
}

#[tokio::test]
async fn test_list_messages_proceeds_without_cookie() {
    let server = MockServer::start().await;

    // no set-cookie on the listing page; the per-number request is still
    // made, presenting an empty cookie value
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_HTML))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sms/15551234567/"))
        .and(header("cookie", "__cfduid="))
        .respond_with(ResponseTemplate::new(200).set_body_string(MESSAGES_HTML))
        .mount(&server)
        .await;

    let scraper = scraper_for(&server).await;
    let messages = scraper.list_messages_for("+15551234567").await.unwrap();
    assert_eq!(messages.len(), 2);
}

#[tokio::test]
async fn test_list_messages_missing_table_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_HTML))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sms/15551234567/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>nope</body></html>"))
        .mount(&server)
        .await;

    let scraper = scraper_for(&server).await;
    let err = scraper.list_messages_for("+15551234567").await.unwrap_err();
    assert!(matches!(err, FakeSmsError::Extraction(_)));
}
