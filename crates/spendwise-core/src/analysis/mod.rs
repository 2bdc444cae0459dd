//! Spending Analyzer
//!
//! Three independent views over one preprocessed transaction set:
//!
//! - **Monthly** - month-to-date spending vs limit, with the daily cut needed
//!   to finish the month on budget
//! - **Five-day** - the trailing window of the current month vs the same limits
//! - **Higher than usual** - this ISO week's projected spend vs last week's
//!
//! The reference date ("today") is always passed in, never read from the
//! clock, so a run is a pure function of its inputs.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use spendwise_core::analysis::Analyzer;
//!
//! let analyzer = Analyzer::default();
//! let analysis = analyzer.analyze(&transactions, &limits, today);
//! ```

pub mod engine;
pub mod five_day;
pub mod group;
pub mod monthly;
pub mod types;
pub mod weekly;

pub use engine::{analyze_spending, AnalysisOutcome, Analyzer};
pub use five_day::five_day_analysis;
pub use monthly::{days_in_month, monthly_analysis, CurrentMonth};
pub use types::{
    FiveDayAnalysisRecord, MonthlyAnalysisRecord, SpendingAnalysis, WeeklyComparisonRecord,
};
pub use weekly::weekly_comparison;
