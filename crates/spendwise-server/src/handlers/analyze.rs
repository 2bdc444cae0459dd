//! Analysis handler

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::HeaderValue,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{AppError, AppState, DROPPED_ROWS_HEADER};
use spendwise_core::AnalysisRequest;

/// Query parameters for an analysis run
#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    /// Reference date (YYYY-MM-DD); defaults to the server's local date
    pub today: Option<String>,
}

fn resolve_today(param: Option<&str>) -> Result<NaiveDate, AppError> {
    match param {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("Invalid 'today' date format (use YYYY-MM-DD)")),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// POST /analyze - Run monthly, five-day and week-over-week analysis
///
/// Body: `{ "transactions": [...], "category_limits": [...] }`. The query
/// and body are parsed by hand so that malformed input gets the same
/// `{"error": ...}` shape as every other failure.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AnalyzeQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Response, AppError> {
    let Query(params) = query.map_err(|e| AppError::bad_request(&e.body_text()))?;
    let today = resolve_today(params.today.as_deref())?;

    let request: AnalysisRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))?;

    let transaction_count = request.transactions.as_ref().map_or(0, Vec::len);

    let outcome = state
        .analyzer
        .analyze_request(request, today)
        .map_err(AppError::from_core)?;

    tracing::info!(
        %today,
        transactions = transaction_count,
        dropped = outcome.dropped.len(),
        monthly = outcome.analysis.monthly_analysis.len(),
        flagged = outcome.analysis.flagged().count(),
        "Analysis served"
    );

    let mut response = Json(outcome.analysis).into_response();
    response.headers_mut().insert(
        DROPPED_ROWS_HEADER,
        HeaderValue::from(outcome.dropped.len()),
    );

    Ok(response)
}
