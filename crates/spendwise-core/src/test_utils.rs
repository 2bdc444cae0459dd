//! Test utilities for spendwise-core
//!
//! Fixture builders shared by unit tests, integration tests and the server
//! crate's tests (via the `test-utils` feature).

use chrono::NaiveDate;

use crate::models::{CategoryId, CategoryLimits, RawTransaction, RawValue, Transaction};
use crate::preprocess::preprocess;

/// Build a raw transaction row
pub fn raw(date: &str, amount: f64, category: Option<&str>) -> RawTransaction {
    RawTransaction {
        date: Some(RawValue::Text(date.to_string())),
        amount: Some(RawValue::Number(amount)),
        category_id: category.map(CategoryId::new),
    }
}

/// Build preprocessed transactions from `(date, amount, category)` rows.
///
/// Panics if any row would be dropped, so fixtures cannot silently shrink.
pub fn transactions(rows: &[(&str, f64, Option<&str>)]) -> Vec<Transaction> {
    let raw_rows: Vec<RawTransaction> = rows
        .iter()
        .map(|(date, amount, category)| raw(date, *amount, *category))
        .collect();

    let report = preprocess(&raw_rows);
    assert!(
        report.dropped.is_empty(),
        "fixture rows were dropped: {:?}",
        report.dropped
    );
    report.transactions
}

/// Build a limits map
pub fn limits(entries: &[(&str, f64)]) -> CategoryLimits {
    entries.iter().map(|(k, v)| (*k, *v)).collect()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Assert two floats are equal within a small tolerance
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
