//! Trailing-window analysis
//!
//! Looks at the last few days of the current month (five by default) and
//! compares what was spent there directly with each category's monthly limit.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};

use crate::models::CategoryId;

use super::group::spent_by_category;
use super::monthly::CurrentMonth;
use super::types::{FiveDayAnalysisRecord, MonthlyAnalysisRecord};

/// One record per category with activity on or after
/// `latest date - window_days`.
///
/// Limits are taken from the monthly records; a category missing there gets
/// limit 0.
pub fn five_day_analysis(
    current: &CurrentMonth<'_>,
    monthly: &[MonthlyAnalysisRecord],
    window_days: u32,
) -> Vec<FiveDayAnalysisRecord> {
    let Some(latest) = current.transactions.iter().map(|t| t.date).max() else {
        return vec![];
    };
    // A window reaching past the earliest representable datetime covers everything
    let window_start = latest
        .checked_sub_signed(Duration::days(i64::from(window_days)))
        .unwrap_or(NaiveDateTime::MIN);
    let divisor = f64::from(window_days.max(1));

    let limits: HashMap<&CategoryId, f64> = monthly
        .iter()
        .map(|r| (&r.category_id, r.monthly_limit))
        .collect();

    let in_window = current
        .transactions
        .iter()
        .copied()
        .filter(|t| t.date >= window_start);

    spent_by_category(in_window)
        .into_iter()
        .map(|(category_id, total_spent)| {
            let monthly_limit = limits.get(&category_id).copied().unwrap_or(0.0);
            let savings_needed = total_spent - monthly_limit;
            let daily_saving_suggestion = if savings_needed <= 0.0 {
                0.0
            } else {
                savings_needed / divisor
            };

            FiveDayAnalysisRecord {
                category_id,
                total_spent,
                avg_daily_spent: total_spent / divisor,
                monthly_limit,
                daily_saving_suggestion,
            }
        })
        .collect()
}
