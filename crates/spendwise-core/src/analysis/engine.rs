//! Analyzer - runs the three spending analyses over one transaction set

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::models::{AnalysisRequest, CategoryLimits, RawTransaction, Transaction};
use crate::preprocess::{preprocess, DroppedRow};

use super::five_day::five_day_analysis;
use super::monthly::{monthly_analysis, CurrentMonth};
use super::types::SpendingAnalysis;
use super::weekly::weekly_comparison;

/// Stateless analyzer. Cheap to build; holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze preprocessed transactions against `today`.
    ///
    /// An empty transaction set yields three empty collections.
    pub fn analyze(
        &self,
        transactions: &[Transaction],
        limits: &CategoryLimits,
        today: NaiveDate,
    ) -> SpendingAnalysis {
        let Some(current) = CurrentMonth::locate(transactions, today) else {
            return SpendingAnalysis::default();
        };

        tracing::debug!(
            year = current.year,
            month = current.month,
            days_in_month = current.days_in_month,
            days_elapsed = current.days_elapsed,
            "Analyzing current month"
        );

        let monthly = monthly_analysis(&current, limits);
        let five_day = five_day_analysis(&current, &monthly, self.config.window_days);
        let weekly = weekly_comparison(transactions, &self.config);

        tracing::debug!(
            monthly = monthly.len(),
            five_day = five_day.len(),
            weekly = weekly.len(),
            "Spending analysis complete"
        );

        SpendingAnalysis {
            monthly_analysis: monthly,
            five_day_analysis: five_day,
            higher_than_usual: weekly,
        }
    }

    /// Preprocess raw rows, then analyze them
    pub fn analyze_raw(
        &self,
        raw: &[RawTransaction],
        limits: &CategoryLimits,
        today: NaiveDate,
    ) -> Result<AnalysisOutcome> {
        if raw.is_empty() {
            return Err(Error::EmptyDataset);
        }
        limits.validate()?;

        let report = preprocess(raw);
        if report.transactions.is_empty() {
            tracing::warn!(
                dropped = report.dropped.len(),
                "No usable transactions after preprocessing"
            );
        }

        let analysis = self.analyze(&report.transactions, limits, today);

        Ok(AnalysisOutcome {
            analysis,
            dropped: report.dropped,
        })
    }

    /// Analyze a front-door request with this analyzer's configuration.
    ///
    /// Both keys must be present; see [`Analyzer::analyze_raw`] for the rest.
    pub fn analyze_request(
        &self,
        request: AnalysisRequest,
        today: NaiveDate,
    ) -> Result<AnalysisOutcome> {
        let (Some(transactions), Some(limits)) = (request.transactions, request.category_limits)
        else {
            return Err(missing_keys());
        };

        self.analyze_raw(&transactions, &limits, today)
    }
}

fn missing_keys() -> Error {
    Error::MissingInput("Missing required keys in the input data".to_string())
}

/// Result of analyzing raw input: the analysis plus rows that were skipped
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    pub analysis: SpendingAnalysis,
    pub dropped: Vec<DroppedRow>,
}

/// Validate a front-door request and analyze it.
///
/// Missing keys are `MissingInput`, an empty transaction list is
/// `EmptyDataset`. Input that only becomes empty after preprocessing is not
/// an error: it produces empty collections.
pub fn analyze_spending(
    request: AnalysisRequest,
    today: NaiveDate,
    config: &AnalyzerConfig,
) -> Result<AnalysisOutcome> {
    if request.transactions.is_none() || request.category_limits.is_none() {
        return Err(missing_keys());
    }

    config.validate()?;
    Analyzer::new(config.clone()).analyze_request(request, today)
}
