//! Domain models for Spendwise

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Identifier of a spending category.
///
/// Clients send either strings or integers; both are normalised to text so
/// that `7` and `"7"` name the same category.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Self(s)),
            other => Some(Self(other.to_string())),
        }
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CategoryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for CategoryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        CategoryId::from_json(value).ok_or_else(|| serde::de::Error::custom("category is null"))
    }
}

fn deserialize_optional_category<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<CategoryId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(CategoryId::from_json(value))
}

/// A loosely typed input field: what a client actually sent for `date` or
/// `amount` before any parsing happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    /// Anything else (booleans, objects, arrays); never parses
    Other(serde_json::Value),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// A transaction as supplied by the caller. Extra fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub date: Option<RawValue>,
    #[serde(default)]
    pub amount: Option<RawValue>,
    #[serde(
        default,
        rename = "categoryId",
        alias = "category_id",
        deserialize_with = "deserialize_optional_category"
    )]
    pub category_id: Option<CategoryId>,
}

/// A transaction that survived preprocessing, with derived date parts and
/// the non-negative amount spent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub date: NaiveDateTime,
    pub amount: f64,
    #[serde(rename = "categoryId")]
    pub category_id: Option<CategoryId>,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// ISO week number (1-53)
    pub week: u32,
    pub amount_spent: f64,
}

/// Text form used when a preprocessed transaction is fed back as raw input
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

impl From<&Transaction> for RawTransaction {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: Some(RawValue::Text(tx.date.format(DATETIME_FORMAT).to_string())),
            amount: Some(RawValue::Number(tx.amount)),
            category_id: tx.category_id.clone(),
        }
    }
}

/// Monthly spending limits keyed by category.
///
/// Accepts both the list shape `[{"category": "food", "limit": 500}]` and a
/// plain object `{"food": 500}`. A category without a limit has limit 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CategoryLimitsInput")]
pub struct CategoryLimits(BTreeMap<CategoryId, f64>);

#[derive(Debug, Deserialize)]
struct CategoryLimitEntry {
    category: CategoryId,
    #[serde(default)]
    limit: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryLimitsInput {
    List(Vec<CategoryLimitEntry>),
    Map(BTreeMap<String, Option<f64>>),
}

impl From<CategoryLimitsInput> for CategoryLimits {
    fn from(input: CategoryLimitsInput) -> Self {
        let pairs: Vec<(CategoryId, Option<f64>)> = match input {
            CategoryLimitsInput::List(entries) => entries
                .into_iter()
                .map(|e| (e.category, e.limit))
                .collect(),
            CategoryLimitsInput::Map(map) => map
                .into_iter()
                .map(|(k, v)| (CategoryId::new(k), v))
                .collect(),
        };

        // Later entries win; a null limit behaves like no limit
        CategoryLimits(
            pairs
                .into_iter()
                .map(|(id, limit)| (id, limit.unwrap_or(0.0)))
                .collect(),
        )
    }
}

impl CategoryLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<CategoryId>, limit: f64) {
        self.0.insert(category.into(), limit);
    }

    /// Limit for a category, 0 when none is configured
    pub fn limit_for(&self, category: &CategoryId) -> f64 {
        self.0.get(category).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, &f64)> {
        self.0.iter()
    }

    /// Reject negative or non-finite limits
    pub fn validate(&self) -> Result<()> {
        for (category, limit) in &self.0 {
            if !limit.is_finite() || *limit < 0.0 {
                return Err(Error::InvalidData(format!(
                    "Limit for category '{}' must be a non-negative number, got {}",
                    category, limit
                )));
            }
        }
        Ok(())
    }
}

impl<K: Into<CategoryId>> FromIterator<(K, f64)> for CategoryLimits {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        CategoryLimits(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Body accepted by front doors: both keys are required.
#[derive(Debug, Default, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub transactions: Option<Vec<RawTransaction>>,
    #[serde(default)]
    pub category_limits: Option<CategoryLimits>,
}
