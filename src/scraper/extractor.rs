//! HTML extraction for the number listing and message table
//!
//! Extraction is a pure function of a parsed document; no network access
//! happens here. The receive-smss.com markup is not under our control, so
//! the rules live behind the [`PageExtractor`] trait: when the site
//! changes shape, a new strategy can be dropped in without touching the
//! orchestrator or the store.
//!
//! Failure policy: the outer container or table being entirely absent is
//! a hard error (the page layout changed upstream and must surface
//! loudly); a malformed individual item or an undersized row is silently
//! skipped, because per-row markup is expected to vary.

use crate::records::{claim_timestamp, MessageRecord, NumberRecord};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Errors raised when an expected structural element is entirely absent
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("number listing not found: page layout changed?")]
    NumberListingMissing,

    #[error("message table not found: page layout changed?")]
    MessageTableMissing,

    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Strategy turning a parsed document into typed records
pub trait PageExtractor {
    /// Extracts the currently available numbers from a listing page.
    fn available_numbers(&self, doc: &Html) -> Result<Vec<NumberRecord>, ExtractError>;

    /// Extracts the messages from a per-number page.
    fn messages(&self, doc: &Html) -> Result<Vec<MessageRecord>, ExtractError>;
}

/// Extraction rules for the current receive-smss.com markup
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiveSmssExtractor;

impl PageExtractor for ReceiveSmssExtractor {
    fn available_numbers(&self, doc: &Html) -> Result<Vec<NumberRecord>, ExtractError> {
        let container_sel = parse_selector("div.number-boxes")?;
        let item_sel = parse_selector("div.number-boxes-item")?;
        let row_sel = parse_selector("div.row")?;
        let number_sel = parse_selector("h4")?;
        let country_sel = parse_selector("h5")?;

        let container = doc
            .select(&container_sel)
            .next()
            .ok_or(ExtractError::NumberListingMissing)?;

        let mut numbers = Vec::new();
        for item in container.select(&item_sel) {
            let Some(row) = item.select(&row_sel).next() else {
                continue;
            };

            // h4 carries the number, h5 the country; an item missing
            // either is a partial render, not an error
            let number = row.select(&number_sel).next().map(full_text);
            let country = row.select(&country_sel).next().map(full_text);

            if let (Some(number), Some(country)) = (number, country) {
                if number.is_empty() || country.is_empty() {
                    continue;
                }
                numbers.push(NumberRecord {
                    country,
                    number,
                    created_at: claim_timestamp(),
                });
            }
        }

        tracing::debug!("extracted {} available numbers", numbers.len());
        Ok(numbers)
    }

    fn messages(&self, doc: &Html) -> Result<Vec<MessageRecord>, ExtractError> {
        let table_sel = parse_selector("table")?;
        let tbody_sel = parse_selector("tbody")?;
        let row_sel = parse_selector("tr")?;
        let cell_sel = parse_selector("td")?;

        let table = doc
            .select(&table_sel)
            .next()
            .ok_or(ExtractError::MessageTableMissing)?;

        let tbody = table
            .select(&tbody_sel)
            .next()
            .ok_or(ExtractError::MessageTableMissing)?;

        let mut messages = Vec::new();
        for row in tbody.select(&row_sel) {
            let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
            if cells.len() < 3 {
                continue;
            }

            messages.push(MessageRecord {
                originator: full_text(cells[0]),
                body: full_text(cells[1]),
                created_at: full_text(cells[2]),
            });
        }

        tracing::debug!("extracted {} messages", messages.len());
        Ok(messages)
    }
}

/// Extracts available numbers using the default strategy.
pub fn extract_available_numbers(doc: &Html) -> Result<Vec<NumberRecord>, ExtractError> {
    ReceiveSmssExtractor.available_numbers(doc)
}

/// Extracts messages using the default strategy.
pub fn extract_messages(doc: &Html) -> Result<Vec<MessageRecord>, ExtractError> {
    ReceiveSmssExtractor.messages(doc)
}

fn parse_selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector(e.to_string()))
}

/// Full descendant text of an element, nested markup included.
fn full_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
