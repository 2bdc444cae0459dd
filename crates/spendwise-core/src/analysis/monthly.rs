//! Monthly analysis
//!
//! Compares month-to-date spending per category with its monthly limit and
//! projects the full month at the current daily rate.

use chrono::{Datelike, NaiveDate};

use crate::models::{CategoryLimits, Transaction};

use super::group::spent_by_category;
use super::types::MonthlyAnalysisRecord;

/// The month being analyzed and its transactions
#[derive(Debug, Clone)]
pub struct CurrentMonth<'a> {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Days of the month that have passed, counting the reference day
    pub days_elapsed: u32,
    /// Transactions whose month equals `month`, in input order
    pub transactions: Vec<&'a Transaction>,
}

impl<'a> CurrentMonth<'a> {
    /// Locate the current month: the highest month number present, in the
    /// highest year present.
    ///
    /// When `today` falls inside that month, elapsed days come from `today`;
    /// otherwise the month is treated as closed data and the latest
    /// transaction day is used. Returns `None` for an empty set.
    pub fn locate(transactions: &'a [Transaction], today: NaiveDate) -> Option<Self> {
        let month = transactions.iter().map(|t| t.month).max()?;
        let year = transactions.iter().map(|t| t.year).max()?;
        let days_in_month = days_in_month(year, month)?;

        let in_month: Vec<&Transaction> =
            transactions.iter().filter(|t| t.month == month).collect();

        let days_elapsed = if today.year() == year && today.month() == month {
            today.day()
        } else {
            in_month.iter().map(|t| t.day).max()?
        };

        Some(Self {
            year,
            month,
            days_in_month,
            days_elapsed,
            transactions: in_month,
        })
    }

    /// Days left after the reference day, never negative
    pub fn days_remaining(&self) -> u32 {
        self.days_in_month.saturating_sub(self.days_elapsed)
    }
}

/// Number of days in a Gregorian month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next - first).num_days()).ok()
}

/// One record per category with activity in the current month
pub fn monthly_analysis(
    current: &CurrentMonth<'_>,
    limits: &CategoryLimits,
) -> Vec<MonthlyAnalysisRecord> {
    let days_in_month = f64::from(current.days_in_month);
    let days_elapsed = current.days_elapsed;
    let days_remaining = current.days_remaining();

    spent_by_category(current.transactions.iter().copied())
        .into_iter()
        .map(|(category_id, total_spent)| {
            let monthly_limit = limits.limit_for(&category_id);

            let avg_daily_spent = if days_elapsed == 0 {
                0.0
            } else {
                total_spent / f64::from(days_elapsed)
            };

            let savings_needed = avg_daily_spent * days_in_month - monthly_limit;

            // Nothing to cut when on track, and no days to spread a cut over
            // once the month is over
            let daily_saving_suggestion = if savings_needed <= 0.0 || days_remaining == 0 {
                0.0
            } else {
                savings_needed / f64::from(days_remaining)
            };

            MonthlyAnalysisRecord {
                category_id,
                total_spent,
                avg_daily_spent,
                monthly_limit,
                savings_needed,
                daily_saving_suggestion,
            }
        })
        .collect()
}
