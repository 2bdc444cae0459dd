//! Result records produced by the analyzer

use serde::{Deserialize, Serialize};

use crate::models::CategoryId;

/// Month-to-date spending of one category against its limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAnalysisRecord {
    #[serde(rename = "categoryId")]
    pub category_id: CategoryId,
    pub total_spent: f64,
    pub avg_daily_spent: f64,
    pub monthly_limit: f64,
    /// Projected full-month spend minus the limit; positive means over budget
    pub savings_needed: f64,
    /// Daily cut needed over the remaining days, 0 when on track
    pub daily_saving_suggestion: f64,
}

/// Spending of one category in the trailing window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiveDayAnalysisRecord {
    #[serde(rename = "categoryId")]
    pub category_id: CategoryId,
    pub total_spent: f64,
    pub avg_daily_spent: f64,
    pub monthly_limit: f64,
    pub daily_saving_suggestion: f64,
}

/// Current-week projection of one category against the prior week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyComparisonRecord {
    #[serde(rename = "categoryId")]
    pub category_id: CategoryId,
    pub past_week_spent: f64,
    pub current_spent: f64,
    /// Distinct days with activity this week
    pub days_count: u32,
    pub projected_spent: f64,
    pub higher_than_usual: bool,
}

/// The three result collections of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpendingAnalysis {
    pub monthly_analysis: Vec<MonthlyAnalysisRecord>,
    pub five_day_analysis: Vec<FiveDayAnalysisRecord>,
    pub higher_than_usual: Vec<WeeklyComparisonRecord>,
}

impl SpendingAnalysis {
    pub fn is_empty(&self) -> bool {
        self.monthly_analysis.is_empty()
            && self.five_day_analysis.is_empty()
            && self.higher_than_usual.is_empty()
    }

    /// Categories flagged as trending above last week
    pub fn flagged(&self) -> impl Iterator<Item = &WeeklyComparisonRecord> {
        self.higher_than_usual.iter().filter(|r| r.higher_than_usual)
    }
}
