//! Record types produced by the scraping engine
//!
//! `NumberRecord` is what the listing page yields and what the registry
//! persists; `MessageRecord` is ephemeral, scoped to one retrieval.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// A disposable phone number offered by the external service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRecord {
    /// Country the number belongs to, as displayed on the listing page
    pub country: String,

    /// The phone number, digits with a leading "+"
    pub number: String,

    /// Wall-clock time the record was extracted
    pub created_at: String,
}

/// One SMS message addressed to a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Message text
    pub body: String,

    /// Timestamp column as rendered by the service
    pub created_at: String,

    /// Sender shown in the message table
    pub originator: String,
}

/// Timestamp stamped onto freshly extracted number records.
///
/// Format matches what the registry has always stored,
/// e.g. `2024-01-01 00:00:00 Monday`.
pub fn claim_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S %A").to_string()
}
