// ABOUTME: Receipt normalization for LLM-extracted purchase data
// ABOUTME: Multi-format date parsing with regex fallback, price parsing, and item list cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FoodLog FCP

//! # Receipt Normalization
//!
//! Dates on receipts come in whatever format the store's printer uses, and the
//! LLM copies them verbatim. [`parse_receipt_date`] tries a fixed list of
//! formats and then scans longer text for the first date-looking token.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use foodlog_core::constants::limits::MAX_RECEIPT_ITEMS;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::RangeInclusive;
use std::sync::OnceLock;
use tracing::debug;

/// Date-only formats, tried in order after the timestamp formats
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
];

/// Years outside this range are treated as misparses (`01/10/26` read as year 26)
const PLAUSIBLE_YEARS: RangeInclusive<i32> = 1900..=2200;

static DATE_TOKEN: OnceLock<Option<Regex>> = OnceLock::new();

fn date_token_regex() -> Option<&'static Regex> {
    DATE_TOKEN
        .get_or_init(|| {
            Regex::new(
                r"(?i)\b(\d{4}[-/]\d{1,2}[-/]\d{1,2}|\d{1,2}/\d{1,2}/\d{2,4}|\d{1,2}\.\d{1,2}\.\d{4}|[a-z]{3,9} \d{1,2},? \d{4}|\d{1,2} [a-z]{3,9} \d{4})\b",
            )
            .ok()
        })
        .as_ref()
}

fn plausible(date: NaiveDate) -> Option<NaiveDate> {
    PLAUSIBLE_YEARS.contains(&date.year()).then_some(date)
}

fn parse_exact(raw: &str) -> Option<NaiveDate> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return plausible(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return plausible(timestamp.date());
    }
    DATE_FORMATS
        .iter()
        .filter_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .find_map(plausible)
}

/// Parse a receipt date in any of the supported formats.
///
/// Falls back to the first date-like token inside longer text, e.g.
/// `"Purchased on 03/14/2026 at 5:42pm"`.
#[must_use]
pub fn parse_receipt_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(date) = parse_exact(trimmed) {
        return Some(date);
    }

    let found = date_token_regex()?
        .find_iter(trimmed)
        .find_map(|token| parse_exact(token.as_str()));
    if found.is_none() {
        debug!(raw = trimmed, "Unrecognized receipt date");
    }
    found
}

/// Resolve the purchase date of a receipt.
///
/// Missing or unparsable dates, and dates more than one day ahead of `today`,
/// become `today`. The one-day slack absorbs time zone differences between
/// the store and the server.
#[must_use]
pub fn normalize_receipt_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    let Some(date) = raw.and_then(parse_receipt_date) else {
        return today;
    };
    if (date - today).num_days() > 1 {
        debug!(%date, %today, "Receipt date in the future, using today");
        return today;
    }
    date
}

/// Parse a price from a JSON number or a string like `"$3.49"` or `"3,49 €"`
#[must_use]
pub fn parse_price(value: &Value) -> Option<f64> {
    let price = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(raw) => {
            let cleaned: String = raw
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
                .collect();
            let decimal = if cleaned.contains('.') {
                cleaned.replace(',', "")
            } else {
                cleaned.replace(',', ".")
            };
            decimal.parse::<f64>().ok()?
        }
        _ => return None,
    };
    price.is_finite().then_some(price)
}

/// One purchased line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptItem {
    /// Product name as printed
    pub name: String,
    /// Purchased quantity
    pub quantity: f64,
    /// Unit, when the receipt names one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Line price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

fn normalize_item(value: &Value) -> Option<ReceiptItem> {
    let name = non_blank(value.get("name"))?;
    let quantity = value
        .get("quantity")
        .and_then(parse_price)
        .filter(|quantity| *quantity > 0.0)
        .unwrap_or(1.0);
    Some(ReceiptItem {
        name,
        quantity,
        unit: non_blank(value.get("unit")),
        price: value.get("price").and_then(parse_price),
    })
}

/// Clean up the `items` array the LLM extracted from a receipt.
///
/// Nameless entries are dropped, missing or non-positive quantities become 1,
/// and the list is capped at `MAX_RECEIPT_ITEMS`. Non-array input yields an
/// empty list.
#[must_use]
pub fn normalize_receipt_items(value: &Value) -> Vec<ReceiptItem> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(normalize_item)
        .take(MAX_RECEIPT_ITEMS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_digit_year_is_not_read_as_year_26() {
        let date = parse_exact("01/10/26");
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 10));
    }

    #[test]
    fn test_date_token_regex_compiles() {
        assert!(date_token_regex().is_some());
    }
}
