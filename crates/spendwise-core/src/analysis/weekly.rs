//! Week-over-week comparison
//!
//! Extrapolates the current ISO week's spending per category to a full week
//! and flags categories trending well above what they cost last week.
//!
//! Weeks are compared by ISO week number only. A current week of 1 compares
//! against "week 0", which matches nothing, so every active category looks
//! new.

use std::collections::BTreeMap;

use crate::config::AnalyzerConfig;
use crate::models::Transaction;

use super::group::{activity_by_category, spent_by_category};
use super::types::WeeklyComparisonRecord;

pub fn weekly_comparison(
    transactions: &[Transaction],
    config: &AnalyzerConfig,
) -> Vec<WeeklyComparisonRecord> {
    let Some(current_week) = transactions.iter().map(|t| t.week).max() else {
        return vec![];
    };
    let past_week = current_week - 1;

    let past = spent_by_category(transactions.iter().filter(|t| t.week == past_week));
    let current = activity_by_category(transactions.iter().filter(|t| t.week == current_week));

    // Outer join: every category seen in either week, missing side as zero
    let mut joined: BTreeMap<_, (f64, f64, u32)> = BTreeMap::new();
    for (category, spent) in past {
        joined.entry(category).or_default().0 = spent;
    }
    for (category, activity) in current {
        let entry = joined.entry(category).or_default();
        entry.1 = activity.spent;
        entry.2 = activity.days.len() as u32;
    }

    joined
        .into_iter()
        .map(|(category_id, (past_week_spent, current_spent, days_count))| {
            let projected_spent = project(current_spent, days_count, config.projection_days);
            WeeklyComparisonRecord {
                category_id,
                past_week_spent,
                current_spent,
                days_count,
                projected_spent,
                higher_than_usual: is_higher_than_usual(
                    projected_spent,
                    past_week_spent,
                    config.higher_than_usual_ratio,
                ),
            }
        })
        .collect()
}

/// Average spend per active day, scaled to the projection length
fn project(spent: f64, active_days: u32, projection_days: u32) -> f64 {
    if active_days == 0 {
        return 0.0;
    }
    spent / f64::from(active_days) * f64::from(projection_days)
}

/// Strictly greater: a projection exactly at the threshold is not flagged
pub fn is_higher_than_usual(projected: f64, past_week_spent: f64, ratio: f64) -> bool {
    projected > ratio * past_week_spent
}
