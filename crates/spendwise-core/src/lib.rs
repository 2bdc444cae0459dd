//! Spendwise Core Library
//!
//! Budgeting insights from a list of transactions and per-category limits:
//! - Preprocessing of loosely typed transaction rows
//! - Monthly, five-day and week-over-week spending analysis
//! - Transaction and limit file loading (CSV, JSON, TOML)
//! - TOML configuration

pub mod analysis;
pub mod config;
pub mod error;
pub mod load;
pub mod models;
pub mod preprocess;

/// Fixture builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analysis::{
    analyze_spending, AnalysisOutcome, Analyzer, FiveDayAnalysisRecord, MonthlyAnalysisRecord,
    SpendingAnalysis, WeeklyComparisonRecord,
};
pub use config::{AnalyzerConfig, Config, ServerSettings};
pub use error::{Error, Result};
pub use models::{AnalysisRequest, CategoryId, CategoryLimits, RawTransaction, RawValue, Transaction};
pub use preprocess::{preprocess, DropReason, DroppedRow, PreprocessReport};
