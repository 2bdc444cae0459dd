//! Spendwise Web Server
//!
//! Axum-based REST API in front of the spending analyzer.
//!
//! - `POST /analyze` (also under `/api`) - run the three analyses
//! - `GET /api/health` - liveness probe
//!
//! The server holds no per-request state: every call carries its own
//! transactions and limits, and "today" is read once per request.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

use spendwise_core::{Analyzer, AnalyzerConfig, Config};

mod handlers;

/// Response header carrying the number of input rows skipped during
/// preprocessing
pub const DROPPED_ROWS_HEADER: &str = "x-spendwise-dropped-rows";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Allowed CORS origins; `*` allows any origin
    pub allowed_origins: Vec<String>,
    /// Analyzer tunables applied to every request
    pub analysis: AnalyzerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            analysis: AnalyzerConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Build from the loaded configuration file
    pub fn from_config(config: &Config) -> Self {
        Self {
            allowed_origins: config.server.allowed_origins.clone(),
            analysis: config.analysis.clone(),
        }
    }

    fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o.trim() == "*")
    }
}

/// Parse a comma-separated origin list (e.g. from `SPENDWISE_ALLOWED_ORIGINS`)
pub fn parse_allowed_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Shared application state
pub struct AppState {
    pub analyzer: Analyzer,
}

/// Create the application router
pub fn create_router(config: ServerConfig) -> Router {
    let cors = if config.allows_any_origin() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };
    let cors = cors
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::HeaderName::from_static(DROPPED_ROWS_HEADER)]);

    let state = Arc::new(AppState {
        analyzer: Analyzer::new(config.analysis),
    });

    let api_routes = Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/health", get(handlers::health));

    Router::new()
        .route("/analyze", post(handlers::analyze))
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server
pub async fn serve(host: &str, port: u16, config: ServerConfig) -> anyhow::Result<()> {
    config.analysis.validate()?;

    info!(
        window_days = config.analysis.window_days,
        projection_days = config.analysis.projection_days,
        ratio = config.analysis.higher_than_usual_ratio,
        "Analyzer configured"
    );

    let app = create_router(config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Caller mistakes become 400 with the core's message; anything else is
    /// an internal error
    pub fn from_core(err: spendwise_core::Error) -> Self {
        if err.is_client_error() {
            Self::bad_request(&err.to_string())
        } else {
            err.into()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
