//! CLI command tests

use std::io::Write;

use chrono::NaiveDate;
use spendwise_core::Config;
use tempfile::NamedTempFile;

use crate::commands::{self, truncate};

fn write_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn june_csv() -> NamedTempFile {
    write_temp(
        ".csv",
        "date,amount,categoryId\n\
         2024-06-01,-100,food\n\
         2024-06-05,-50,food\n\
         2024-06-05,300,salary\n\
         not-a-date,-5,food\n",
    )
}

fn food_limits() -> NamedTempFile {
    write_temp(".toml", "[limits]\nfood = 1000\n")
}

// ========== Analyze Command Tests ==========

#[test]
fn test_run_analysis_from_files() {
    let transactions = june_csv();
    let limits = food_limits();
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

    let outcome = commands::run_analysis(
        &Config::default(),
        transactions.path(),
        Some(limits.path()),
        today,
    )
    .unwrap();

    assert_eq!(outcome.dropped.len(), 1);
    assert_eq!(outcome.dropped[0].index, 3);

    let food = &outcome.analysis.monthly_analysis[0];
    assert_eq!(food.category_id.as_str(), "food");
    assert_eq!(food.total_spent, 150.0);
    assert_eq!(food.monthly_limit, 1000.0);
    assert_eq!(food.daily_saving_suggestion, 0.0);
}

#[test]
fn test_run_analysis_without_limits_file() {
    let transactions = june_csv();
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

    let outcome =
        commands::run_analysis(&Config::default(), transactions.path(), None, today).unwrap();

    assert!(outcome
        .analysis
        .monthly_analysis
        .iter()
        .all(|r| r.monthly_limit == 0.0));
}

#[test]
fn test_run_analysis_missing_file() {
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
    let result = commands::run_analysis(
        &Config::default(),
        std::path::Path::new("/nonexistent/transactions.csv"),
        None,
        today,
    );

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to load transactions"));
}

#[test]
fn test_run_analysis_empty_file_is_rejected() {
    let transactions = write_temp(".json", "[]");
    let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();

    let result = commands::run_analysis(&Config::default(), transactions.path(), None, today);

    assert!(result.is_err());
}

#[test]
fn test_cmd_analyze_table_and_json() {
    let transactions = june_csv();
    let limits = food_limits();

    for json in [false, true] {
        let result = commands::cmd_analyze(
            &Config::default(),
            transactions.path(),
            Some(limits.path()),
            Some("2024-06-10"),
            json,
        );
        assert!(result.is_ok());
    }
}

#[test]
fn test_resolve_today() {
    assert_eq!(
        commands::resolve_today(Some("2024-02-29")).unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
    assert!(commands::resolve_today(Some("29/02/2024")).is_err());
    assert!(commands::resolve_today(None).is_ok());
}

// ========== Serve Command Tests ==========

#[test]
fn test_server_config_uses_file_settings() {
    let config = Config::parse("[analysis]\nwindow_days = 3\n").unwrap();
    let server = commands::server_config(&config, None);

    assert_eq!(server.analysis.window_days, 3);
    assert_eq!(server.allowed_origins, vec!["*".to_string()]);
}

#[test]
fn test_server_config_origins_override() {
    let config = Config::default();

    let server = commands::server_config(&config, Some("http://a.local, http://b.local"));
    assert_eq!(
        server.allowed_origins,
        vec!["http://a.local".to_string(), "http://b.local".to_string()]
    );

    // Blank override keeps the configured origins
    let server = commands::server_config(&config, Some(" "));
    assert_eq!(server.allowed_origins, vec!["*".to_string()]);
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("groceries", 20), "groceries");
    assert_eq!(truncate("entertainment-and-leisure", 10), "enterta...");
    assert_eq!(truncate("café-bakery", 7), "café...");
}
