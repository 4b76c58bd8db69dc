//! Scrape orchestration
//!
//! Sequences fetching and extraction. Listing numbers is a single
//! fetch+extract; listing messages is the two-step cookie dance: hit the
//! listing page to obtain the session cookie, then hit the per-number
//! endpoint presenting it. The listing page is re-fetched on every
//! message lookup rather than caching the cookie, trading one extra
//! request for statelessness.

use crate::records::{MessageRecord, NumberRecord};
use crate::scraper::extractor::{PageExtractor, ReceiveSmssExtractor};
use crate::scraper::fetcher::{build_http_client, fetch, fetch_capture_cookie, fetch_with_cookie};
use crate::Result;
use reqwest::Client;
use scraper::Html;
use url::Url;

/// Listing page of the external service
pub const PAGE_URL: &str = "https://receive-smss.com/";

/// Cookie the service issues on the listing page and expects back on
/// per-number pages
pub const SESSION_COOKIE: &str = "__cfduid";

/// Drives the fetcher and extractor against one service instance
pub struct Scraper<E: PageExtractor = ReceiveSmssExtractor> {
    client: Client,
    base: Url,
    extractor: E,
}

impl Scraper<ReceiveSmssExtractor> {
    /// Creates a scraper against the live service.
    pub fn new() -> Result<Self> {
        Self::with_base(Url::parse(PAGE_URL)?)
    }

    /// Creates a scraper against an arbitrary base URL.
    ///
    /// Used by tests to point at a mock server.
    pub fn with_base(base: Url) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            base,
            extractor: ReceiveSmssExtractor,
        })
    }
}

impl<E: PageExtractor> Scraper<E> {
    /// Creates a scraper with a custom extraction strategy.
    pub fn with_extractor(base: Url, extractor: E) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            base,
            extractor,
        })
    }

    /// Fetches the listing page and extracts the available numbers.
    pub async fn list_available_numbers(&self) -> Result<Vec<NumberRecord>> {
        tracing::info!("fetching number listing from {}", self.base);
        let body = fetch(&self.client, self.base.as_str()).await?;

        let doc = Html::parse_document(&body);
        let numbers = self.extractor.available_numbers(&doc)?;
        Ok(numbers)
    }

    /// Fetches the messages addressed to `number`.
    ///
    /// Steps are strictly sequential: the per-number endpoint is only
    /// valid with the session cookie captured from the listing page. An
    /// absent cookie is forwarded as an empty value; the service decides
    /// whether that gets an empty page or an error page.
    pub async fn list_messages_for(&self, number: &str) -> Result<Vec<MessageRecord>> {
        tracing::info!("establishing session for {}", number);
        let (_, cookie) =
            fetch_capture_cookie(&self.client, self.base.as_str(), SESSION_COOKIE).await?;

        let endpoint = self.message_url(number)?;
        tracing::info!("fetching messages from {}", endpoint);
        let body = fetch_with_cookie(&self.client, endpoint.as_str(), SESSION_COOKIE, &cookie)
            .await?;

        let doc = Html::parse_document(&body);
        let messages = self.extractor.messages(&doc)?;
        Ok(messages)
    }

    /// Per-number endpoint: `<base>/sms/<number-without-plus>/`.
    fn message_url(&self, number: &str) -> Result<Url> {
        let bare = number.replace('+', "");
        Ok(self.base.join(&format!("sms/{bare}/"))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_url_strips_plus() {
        let scraper = Scraper::with_base(Url::parse("https://example.com/").unwrap()).unwrap();
        let url = scraper.message_url("+15551234567").unwrap();
        assert_eq!(url.as_str(), "https://example.com/sms/15551234567/");
    }

    #[test]
    fn test_message_url_without_plus() {
        let scraper = Scraper::with_base(Url::parse("https://example.com/").unwrap()).unwrap();
        let url = scraper.message_url("15551234567").unwrap();
        assert_eq!(url.as_str(), "https://example.com/sms/15551234567/");
    }

    // Network behavior is covered with wiremock in tests/scrape_tests.rs
}
