//! Fake-SMS: disposable phone numbers from receive-smss.com
//!
//! This crate scrapes the list of currently available disposable numbers,
//! keeps a local JSON registry of the numbers the user has claimed, and
//! retrieves the SMS messages addressed to a claimed number.

pub mod config;
pub mod records;
pub mod scraper;
pub mod store;

use thiserror::Error;

/// Main error type for fake-sms operations
#[derive(Debug, Error)]
pub enum FakeSmsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Extraction error: {0}")]
    Extraction(#[from] scraper::ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] store::StoreError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("neither FAKE_SMS_DB_DIR nor HOME is set; cannot locate the registry")]
    NoDatabaseDir,
}

/// Result type alias for fake-sms operations
pub type Result<T> = std::result::Result<T, FakeSmsError>;

// Re-export commonly used types
pub use records::{MessageRecord, NumberRecord};
pub use scraper::{PageExtractor, ReceiveSmssExtractor, Scraper};
pub use store::RegistryStore;
