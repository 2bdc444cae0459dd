//! Loading transactions and limits from files
//!
//! Transactions: CSV with a header row (`date`, `amount`, and optionally
//! `categoryId`; other columns are ignored) or JSON (an array of records, or
//! an object with a `transactions` array).
//!
//! Limits: JSON (list or object shape, optionally wrapped in
//! `category_limits`) or TOML (a `[limits]` table or top-level keys).

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{CategoryId, CategoryLimits, RawTransaction, RawValue};

const DATE_COLUMNS: &[&str] = &["date"];
const AMOUNT_COLUMNS: &[&str] = &["amount"];
const CATEGORY_COLUMNS: &[&str] = &["categoryid", "category_id", "category"];

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

/// Load transactions, choosing the format from the file extension
pub fn load_transactions(path: &Path) -> Result<Vec<RawTransaction>> {
    match extension(path).as_str() {
        "csv" => parse_transactions_csv(File::open(path)?),
        "json" => parse_transactions_json(&fs::read_to_string(path)?),
        other => Err(Error::InvalidData(format!(
            "Unsupported transactions file type '{}' (use .csv or .json)",
            other
        ))),
    }
}

/// Parse transactions from CSV. Blank cells count as missing values.
pub fn parse_transactions_csv<R: Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
    };

    let date_idx = find(DATE_COLUMNS)
        .ok_or_else(|| Error::InvalidData("CSV is missing a 'date' column".to_string()))?;
    let amount_idx = find(AMOUNT_COLUMNS)
        .ok_or_else(|| Error::InvalidData("CSV is missing an 'amount' column".to_string()))?;
    let category_idx = find(CATEGORY_COLUMNS);

    let mut transactions = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let cell = |idx: usize| record.get(idx).filter(|s| !s.is_empty());

        transactions.push(RawTransaction {
            date: cell(date_idx).map(|s| RawValue::Text(s.to_string())),
            amount: cell(amount_idx).map(|s| RawValue::Text(s.to_string())),
            category_id: category_idx.and_then(cell).map(CategoryId::new),
        });
    }

    tracing::debug!(rows = transactions.len(), "Parsed transactions CSV");
    Ok(transactions)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TransactionsFile {
    List(Vec<RawTransaction>),
    Wrapped { transactions: Vec<RawTransaction> },
}

/// Parse transactions from JSON
pub fn parse_transactions_json(content: &str) -> Result<Vec<RawTransaction>> {
    let file: TransactionsFile = serde_json::from_str(content)?;
    Ok(match file {
        TransactionsFile::List(list) => list,
        TransactionsFile::Wrapped { transactions } => transactions,
    })
}

/// Load category limits, choosing the format from the file extension
pub fn load_limits(path: &Path) -> Result<CategoryLimits> {
    let content = fs::read_to_string(path)?;
    match extension(path).as_str() {
        "json" => parse_limits_json(&content),
        "toml" => parse_limits_toml(&content),
        other => Err(Error::InvalidData(format!(
            "Unsupported limits file type '{}' (use .json or .toml)",
            other
        ))),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LimitsFile {
    Wrapped { category_limits: CategoryLimits },
    Direct(CategoryLimits),
}

pub fn parse_limits_json(content: &str) -> Result<CategoryLimits> {
    let file: LimitsFile = serde_json::from_str(content)?;
    Ok(match file {
        LimitsFile::Wrapped { category_limits } => category_limits,
        LimitsFile::Direct(limits) => limits,
    })
}

pub fn parse_limits_toml(content: &str) -> Result<CategoryLimits> {
    let table: toml::Table = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid limits TOML: {}", e)))?;

    let entries = match table.get("limits").and_then(|v| v.as_table()).cloned() {
        Some(limits) => limits,
        None => table,
    };

    let mut limits = CategoryLimits::new();
    for (category, value) in entries {
        let limit = match value {
            toml::Value::Integer(i) => i as f64,
            toml::Value::Float(f) => f,
            other => {
                return Err(Error::InvalidData(format!(
                    "Limit for '{}' must be a number, got {}",
                    category,
                    other.type_str()
                )))
            }
        };
        limits.insert(category, limit);
    }

    Ok(limits)
}
