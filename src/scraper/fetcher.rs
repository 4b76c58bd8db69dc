//! HTTP fetcher
//!
//! All network traffic goes through here: plain GETs for the listing page,
//! cookie-capturing GETs for session establishment, and GETs that present
//! a previously captured cookie. One client, bounded timeouts, no retries
//! (a failed request surfaces as a typed error to the caller).

use crate::{FakeSmsError, Result};
use reqwest::{header, Client};
use std::time::Duration;

/// Builds the HTTP client used for every request.
///
/// Timeouts are bounded so a stalled service cannot hang the tool; the
/// external site serves compressed responses, hence gzip/brotli.
pub fn build_http_client() -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!("fake-sms/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the response body.
///
/// Transport failures and non-success statuses are both fatal; there is
/// no retry layer.
pub async fn fetch(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FakeSmsError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FakeSmsError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| FakeSmsError::Http {
        url: url.to_string(),
        source,
    })
}

/// Fetches a URL and captures a named cookie from the response.
///
/// Returns the body together with the cookie's value, or an empty string
/// when the response carries no cookie by that name. A missing cookie is
/// not an error here; whether the follow-up request works without it is
/// the service's call.
pub async fn fetch_capture_cookie(
    client: &Client,
    url: &str,
    cookie_name: &str,
) -> Result<(String, String)> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FakeSmsError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FakeSmsError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let cookie_value = response
        .cookies()
        .find(|c| c.name() == cookie_name)
        .map(|c| c.value().to_string())
        .unwrap_or_default();

    if cookie_value.is_empty() {
        tracing::debug!("no {} cookie in response from {}", cookie_name, url);
    }

    let body = response.text().await.map_err(|source| FakeSmsError::Http {
        url: url.to_string(),
        source,
    })?;

    Ok((body, cookie_value))
}

/// Fetches a URL presenting a session cookie.
pub async fn fetch_with_cookie(
    client: &Client,
    url: &str,
    cookie_name: &str,
    cookie_value: &str,
) -> Result<String> {
    let response = client
        .get(url)
        .header(header::COOKIE, format!("{cookie_name}={cookie_value}"))
        .send()
        .await
        .map_err(|source| FakeSmsError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FakeSmsError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| FakeSmsError::Http {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client();
        assert!(client.is_ok());
    }

    // Request/response behavior is covered with wiremock in tests/scrape_tests.rs
}
