//! Analyze command implementation

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendwise_core::load::{load_limits, load_transactions};
use spendwise_core::{AnalysisOutcome, Analyzer, CategoryLimits, Config, SpendingAnalysis};

use super::truncate;

/// Parse `--today`, falling back to the local date
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .context("Invalid --today date format (use YYYY-MM-DD)"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Load both input files and run the analyzer
pub fn run_analysis(
    config: &Config,
    transactions_path: &Path,
    limits_path: Option<&Path>,
    today: NaiveDate,
) -> Result<AnalysisOutcome> {
    let raw = load_transactions(transactions_path).with_context(|| {
        format!(
            "Failed to load transactions from {}",
            transactions_path.display()
        )
    })?;

    let limits = match limits_path {
        Some(path) => load_limits(path)
            .with_context(|| format!("Failed to load limits from {}", path.display()))?,
        None => CategoryLimits::new(),
    };

    let analyzer = Analyzer::new(config.analysis.clone());
    Ok(analyzer.analyze_raw(&raw, &limits, today)?)
}

pub fn cmd_analyze(
    config: &Config,
    transactions_path: &Path,
    limits_path: Option<&Path>,
    today: Option<&str>,
    json: bool,
) -> Result<()> {
    let today = resolve_today(today)?;
    let outcome = run_analysis(config, transactions_path, limits_path, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.analysis)?);
        if !outcome.dropped.is_empty() {
            eprintln!("{} row(s) skipped during preprocessing", outcome.dropped.len());
        }
        return Ok(());
    }

    print_analysis(&outcome.analysis, today);

    if !outcome.dropped.is_empty() {
        println!();
        println!(
            "   \x1b[2m{} row(s) skipped during preprocessing\x1b[0m",
            outcome.dropped.len()
        );
        for row in &outcome.dropped {
            tracing::debug!(row = row.index, reason = %row.reason, "Skipped row");
        }
    }

    Ok(())
}

fn print_analysis(analysis: &SpendingAnalysis, today: NaiveDate) {
    println!();
    println!("📊 Spending Analysis");
    println!("   As of: {}", today);
    println!("   ─────────────────────────────────────────────────────────────");

    if analysis.is_empty() {
        println!("   No usable transactions found.");
        return;
    }

    println!();
    println!("   Current month");
    println!(
        "   {:20} │ {:>10} │ {:>9} │ {:>10} │ {:>10} │ {:>9}",
        "Category", "Spent", "Avg/day", "Limit", "Over by", "Save/day"
    );
    println!(
        "   ─────────────────────┼────────────┼───────────┼────────────┼────────────┼──────────"
    );
    for record in &analysis.monthly_analysis {
        println!(
            "   {:20} │ {:>10.2} │ {:>9.2} │ {:>10.2} │ {:>10.2} │ {:>9.2}",
            truncate(record.category_id.as_str(), 20),
            record.total_spent,
            record.avg_daily_spent,
            record.monthly_limit,
            record.savings_needed,
            record.daily_saving_suggestion
        );
    }

    println!();
    println!("   Recent days");
    println!(
        "   {:20} │ {:>10} │ {:>9} │ {:>10} │ {:>9}",
        "Category", "Spent", "Avg/day", "Limit", "Save/day"
    );
    println!("   ─────────────────────┼────────────┼───────────┼────────────┼──────────");
    for record in &analysis.five_day_analysis {
        println!(
            "   {:20} │ {:>10.2} │ {:>9.2} │ {:>10.2} │ {:>9.2}",
            truncate(record.category_id.as_str(), 20),
            record.total_spent,
            record.avg_daily_spent,
            record.monthly_limit,
            record.daily_saving_suggestion
        );
    }

    println!();
    println!("   Week over week");
    println!(
        "   {:20} │ {:>10} │ {:>10} │ {:>4} │ {:>10} │ {}",
        "Category", "Last week", "This week", "Days", "Projected", ""
    );
    println!("   ─────────────────────┼────────────┼────────────┼──────┼────────────┼───");
    for record in &analysis.higher_than_usual {
        let flag = if record.higher_than_usual { "⚠️" } else { "" };
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ {:>4} │ {:>10.2} │ {}",
            truncate(record.category_id.as_str(), 20),
            record.past_week_spent,
            record.current_spent,
            record.days_count,
            record.projected_spent,
            flag
        );
    }

    let flagged = analysis.flagged().count();
    if flagged > 0 {
        println!();
        println!(
            "   {} categor{} trending above last week",
            flagged,
            if flagged == 1 { "y" } else { "ies" }
        );
    }
}
