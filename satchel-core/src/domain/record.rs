//! Record domain model

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The category value that marks a record as inflow rather than outflow.
pub const INCOME_CATEGORY: &str = "Income";

/// A single income or expense record
///
/// Field shapes mirror the persisted JSON blob: `amount` and `date` stay
/// text so a record round-trips byte-for-byte through storage. All text
/// fields tolerate being absent in old blobs and come back as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    /// Decimal magnitude as text, e.g. "12.50"; always non-negative.
    /// Direction is inferred from `category`, never stored.
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    /// Calendar date in YYYY-MM-DD form
    #[serde(default)]
    pub date: String,
    #[serde(default = "epoch")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "epoch")]
    pub updated_at: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    Utc.timestamp_opt(0, 0).unwrap()
}

impl Record {
    /// Create a new record with a fresh id and both timestamps set to now
    pub fn new(
        amount: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            amount: amount.into(),
            description: description.into(),
            category: category.into(),
            date: date.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the record is inflow (category "Income", case-insensitive)
    pub fn is_income(&self) -> bool {
        self.category.eq_ignore_ascii_case(INCOME_CATEGORY)
    }

    /// Numeric value of the stored amount text; non-numeric amounts count as 0
    pub fn amount_value(&self) -> Decimal {
        self.amount.trim().parse().unwrap_or(Decimal::ZERO)
    }

    /// Parsed calendar date, or None when the stored text is not a date
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Apply a partial update: only provided fields overwrite, and
    /// `updated_at` is always refreshed
    pub fn merged(&self, patch: &RecordPatch) -> Record {
        let mut merged = self.clone();
        if let Some(amount) = &patch.amount {
            merged.amount = amount.clone();
        }
        if let Some(description) = &patch.description {
            merged.description = description.clone();
        }
        if let Some(category) = &patch.category {
            merged.category = category.clone();
        }
        if let Some(date) = &patch.date {
            merged.date = date.clone();
        }
        merged.updated_at = Utc::now();
        merged
    }

    /// Normalize free text before validation: trim the ends, collapse
    /// interior whitespace runs to single spaces
    pub fn normalize_text(text: &str) -> String {
        let whitespace_re = Regex::new(r"\s+").unwrap();
        whitespace_re.replace_all(text.trim(), " ").to_string()
    }
}

/// Partial update for an existing record; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    pub amount: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

// === Field rules ===
//
// These are the write-time rules every persisted record satisfies. The
// patterns come from the storage format, so they are shared by validation
// and by anything that needs to reason about raw field text.

/// Description: at least one non-whitespace character, no leading or
/// trailing whitespace
pub fn is_valid_description(text: &str) -> bool {
    Regex::new(r"^\S(?:.*\S)?$").unwrap().is_match(text)
}

/// True when the description repeats a word with only whitespace between
/// the two occurrences (case-insensitive). Advisory only, never blocks.
pub fn has_repeated_word(text: &str) -> bool {
    // The regex crate has no backreferences, so scan adjacent words instead
    // of matching \b(\w+)\s+\1\b.
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .windows(2)
        .any(|pair| pair[0].eq_ignore_ascii_case(pair[1]))
}

/// Amount: non-negative integer or decimal with at most 2 fractional
/// digits, no leading zeros except "0" itself
pub fn is_valid_amount(text: &str) -> bool {
    Regex::new(r"^(0|[1-9]\d*)(\.\d{1,2})?$").unwrap().is_match(text)
}

/// Category: letter runs separated by single spaces or hyphens
pub fn is_valid_category(text: &str) -> bool {
    Regex::new(r"^[A-Za-z]+(?:[ -][A-Za-z]+)*$").unwrap().is_match(text)
}

/// Date: YYYY-MM-DD with month 01-12 and day 01-31. The day range is not
/// calendar-aware beyond that.
pub fn is_valid_date(text: &str) -> bool {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$")
        .unwrap()
        .is_match(text)
}
