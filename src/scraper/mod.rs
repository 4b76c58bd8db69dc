//! Scraping engine for the receive-smss.com service
//!
//! This module contains the whole scraping pipeline:
//! - HTTP fetching with session-cookie capture and replay
//! - HTML extraction of number listings and message tables
//! - Orchestration of the two-step cookie dance

mod extractor;
mod fetcher;
mod orchestrator;

pub use extractor::{
    extract_available_numbers, extract_messages, ExtractError, PageExtractor,
    ReceiveSmssExtractor,
};
pub use fetcher::{build_http_client, fetch, fetch_capture_cookie, fetch_with_cookie};
pub use orchestrator::{Scraper, PAGE_URL, SESSION_COOKIE};
