//! Transaction preprocessing
//!
//! Turns raw client records into [`Transaction`]s: rows without a usable
//! date or amount are dropped (never an error), date parts are derived and
//! only outflows count as spending.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::models::{RawTransaction, RawValue, Transaction};

/// Why a row was dropped during preprocessing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MissingDate,
    MissingAmount,
    InvalidDate,
    InvalidAmount,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::MissingDate => "missing_date",
            DropReason::MissingAmount => "missing_amount",
            DropReason::InvalidDate => "invalid_date",
            DropReason::InvalidAmount => "invalid_amount",
        }
    }
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A row that did not survive preprocessing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedRow {
    /// Position of the row in the input
    pub index: usize,
    pub reason: DropReason,
}

/// Output of [`preprocess`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PreprocessReport {
    /// Surviving transactions, in input order
    pub transactions: Vec<Transaction>,
    pub dropped: Vec<DroppedRow>,
}

impl PreprocessReport {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Clean and enrich raw transactions
pub fn preprocess(raw: &[RawTransaction]) -> PreprocessReport {
    let mut report = PreprocessReport::default();

    for (index, row) in raw.iter().enumerate() {
        match enrich(row) {
            Ok(tx) => report.transactions.push(tx),
            Err(reason) => {
                tracing::debug!(index, reason = reason.as_str(), "Dropping transaction row");
                report.dropped.push(DroppedRow { index, reason });
            }
        }
    }

    if !report.dropped.is_empty() {
        tracing::info!(
            kept = report.transactions.len(),
            dropped = report.dropped.len(),
            "Preprocessing dropped invalid rows"
        );
    }

    report
}

fn enrich(row: &RawTransaction) -> Result<Transaction, DropReason> {
    let date = present(row.date.as_ref()).ok_or(DropReason::MissingDate)?;
    let amount = present(row.amount.as_ref()).ok_or(DropReason::MissingAmount)?;

    let date = parse_date(date).ok_or(DropReason::InvalidDate)?;
    let amount = parse_amount(amount).ok_or(DropReason::InvalidAmount)?;

    Ok(Transaction {
        date,
        amount,
        category_id: row.category_id.clone(),
        year: date.year(),
        month: date.month(),
        day: date.day(),
        week: date.iso_week().week(),
        amount_spent: spent(amount),
    })
}

/// Blank text counts as absent, the way an empty CSV cell does
fn present(value: Option<&RawValue>) -> Option<&RawValue> {
    match value {
        Some(RawValue::Text(s)) if s.trim().is_empty() => None,
        other => other,
    }
}

/// Outflows are negative; inflows never count as spending
pub fn spent(amount: f64) -> f64 {
    if amount < 0.0 {
        -amount
    } else {
        0.0
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f", // 2024-06-01T14:30:00.123
    "%Y-%m-%d %H:%M:%S%.f", // 2024-06-01 14:30:00
    "%Y-%m-%dT%H:%M",       // 2024-06-01T14:30
    "%Y-%m-%d %H:%M",       // 2024-06-01 14:30
    "%m/%d/%Y %H:%M:%S",    // 06/01/2024 14:30:00
    "%m/%d/%Y %H:%M",       // 06/01/2024 14:30
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",  // 2024-06-01
    "%Y/%m/%d",  // 2024/06/01
    "%m/%d/%Y",  // 06/01/2024
    "%m/%d/%y",  // 06/01/24
    "%m-%d-%Y",  // 06-01-2024
    "%d.%m.%Y",  // 01.06.2024
    "%b %d, %Y", // Jun 01, 2024
    "%B %d, %Y", // June 01, 2024
    "%d %b %Y",  // 01 Jun 2024
    "%d %B %Y",  // 01 June 2024
];

/// Parse a date leniently. Never fails loudly: `None` means "drop the row".
///
/// Numbers are Unix epoch milliseconds. Years outside 1000..=9999 are
/// rejected whatever the input form.
pub fn parse_date(value: &RawValue) -> Option<NaiveDateTime> {
    let parsed = match value {
        RawValue::Number(ms) if ms.is_finite() => {
            DateTime::from_timestamp_millis(*ms as i64).map(|dt| dt.naive_utc())
        }
        RawValue::Text(s) => parse_date_str(s),
        _ => None,
    }?;

    plausible_year(parsed.year()).then_some(parsed)
}

fn parse_date_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            if plausible_year(dt.year()) {
                return Some(dt);
            }
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            if plausible_year(date.year()) {
                return Some(date.and_time(NaiveTime::MIN));
            }
        }
    }

    None
}

/// `%Y` happily reads "24" as the year 24; such matches belong to a
/// two-digit-year format further down the list
fn plausible_year(year: i32) -> bool {
    (1000..=9999).contains(&year)
}

/// Parse an amount, handling currency symbols, commas and accounting
/// parentheses in text
pub fn parse_amount(value: &RawValue) -> Option<f64> {
    let amount = match value {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => {
            let cleaned: String = s
                .trim()
                .replace(['$', ',', ' '], "")
                .replace('(', "-")
                .replace(')', "");
            cleaned.parse::<f64>().ok()?
        }
        RawValue::Other(_) => return None,
    };

    amount.is_finite().then_some(amount)
}
