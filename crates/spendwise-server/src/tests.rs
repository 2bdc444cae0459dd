//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use spendwise_core::test_utils::raw;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    create_router(ServerConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn june_body() -> serde_json::Value {
    serde_json::json!({
        "transactions": [
            {"date": "2024-06-01", "amount": -100, "categoryId": "food"},
            {"date": "2024-06-05", "amount": -50, "categoryId": "food"},
            {"date": "2024-06-05", "amount": 300, "categoryId": "salary"}
        ],
        "category_limits": [
            {"category": "food", "limit": 1000}
        ]
    })
}

// ========== Analyze API Tests ==========

#[tokio::test]
async fn test_analyze_success() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/analyze?today=2024-06-10", &june_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[DROPPED_ROWS_HEADER], "0");

    let json = get_body_json(response).await;
    let monthly = json["monthly_analysis"].as_array().unwrap();
    assert_eq!(monthly.len(), 2);

    let food = &monthly[0];
    assert_eq!(food["categoryId"], "food");
    assert_eq!(food["total_spent"], 150.0);
    assert_eq!(food["avg_daily_spent"], 15.0);
    assert_eq!(food["monthly_limit"], 1000.0);
    assert_eq!(food["savings_needed"], -550.0);
    assert_eq!(food["daily_saving_suggestion"], 0.0);

    let salary = &monthly[1];
    assert_eq!(salary["categoryId"], "salary");
    assert_eq!(salary["total_spent"], 0.0);
    assert_eq!(salary["monthly_limit"], 0.0);

    assert!(json["five_day_analysis"].is_array());
    assert!(json["higher_than_usual"].is_array());
}

#[tokio::test]
async fn test_analyze_under_api_prefix() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/api/analyze?today=2024-06-10", &june_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_weekly_flag() {
    let app = setup_test_app();
    let body = serde_json::json!({
        "transactions": [{"date": "2024-06-05", "amount": -70, "categoryId": "fun"}],
        "category_limits": {"fun": 200}
    });

    let response = app
        .oneshot(post_json("/analyze?today=2024-06-10", &body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let weekly = &json["higher_than_usual"][0];
    assert_eq!(weekly["categoryId"], "fun");
    assert_eq!(weekly["past_week_spent"], 0.0);
    assert_eq!(weekly["current_spent"], 70.0);
    assert_eq!(weekly["days_count"], 1);
    assert_eq!(weekly["projected_spent"], 490.0);
    assert_eq!(weekly["higher_than_usual"], true);
}

#[tokio::test]
async fn test_analyze_reports_dropped_rows() {
    let app = setup_test_app();
    let good = serde_json::to_value(raw("2024-06-05", -10.0, Some("food"))).unwrap();
    let body = serde_json::json!({
        "transactions": [
            good,
            {"date": "whenever", "amount": -1, "categoryId": "food"},
            {"date": "2024-06-05", "categoryId": "food"}
        ],
        "category_limits": []
    });

    let response = app
        .oneshot(post_json("/analyze?today=2024-06-10", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[DROPPED_ROWS_HEADER], "2");

    let json = get_body_json(response).await;
    assert_eq!(json["monthly_analysis"][0]["total_spent"], 10.0);
}

#[tokio::test]
async fn test_analyze_all_rows_invalid_returns_empty_collections() {
    let app = setup_test_app();
    let body = serde_json::json!({
        "transactions": [{"date": null, "amount": -1, "categoryId": "food"}],
        "category_limits": []
    });

    let response = app.oneshot(post_json("/analyze", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["monthly_analysis"], serde_json::json!([]));
    assert_eq!(json["five_day_analysis"], serde_json::json!([]));
    assert_eq!(json["higher_than_usual"], serde_json::json!([]));
}

#[tokio::test]
async fn test_analyze_missing_keys() {
    let app = setup_test_app();
    let body = serde_json::json!({"transactions": []});

    let response = app.oneshot(post_json("/analyze", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Missing required keys in the input data");
}

#[tokio::test]
async fn test_analyze_empty_transactions() {
    let app = setup_test_app();
    let body = serde_json::json!({"transactions": [], "category_limits": []});

    let response = app.oneshot(post_json("/analyze", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Transactions data is empty");
}

#[tokio::test]
async fn test_analyze_negative_limit() {
    let app = setup_test_app();
    let mut body = june_body();
    body["category_limits"] = serde_json::json!([{"category": "food", "limit": -5}]);

    let response = app.oneshot(post_json("/analyze", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("food"));
}

#[tokio::test]
async fn test_analyze_invalid_json() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid JSON"));
}

#[tokio::test]
async fn test_analyze_invalid_today() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json("/analyze?today=June", &june_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("today"));
}

#[tokio::test]
async fn test_analyze_malformed_query_is_json_error() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/analyze?today=2024-06-10&today=2024-06-11",
            &june_body(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("query string"));
}

#[tokio::test]
async fn test_analyze_uses_configured_ratio() {
    let config = ServerConfig {
        analysis: AnalyzerConfig {
            higher_than_usual_ratio: 10.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let app = create_router(config);
    let body = serde_json::json!({
        "transactions": [
            {"date": "2024-05-29", "amount": -100, "categoryId": "food"},
            {"date": "2024-06-04", "amount": -20, "categoryId": "food"}
        ],
        "category_limits": []
    });

    let response = app
        .oneshot(post_json("/analyze?today=2024-06-10", &body))
        .await
        .unwrap();

    let json = get_body_json(response).await;
    // projected 140 is not above 10 × 100
    assert_eq!(json["higher_than_usual"][0]["higher_than_usual"], false);
}

#[tokio::test]
async fn test_get_not_allowed_on_analyze() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/analyze")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// ========== Health / CORS Tests ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_cors_any_origin_by_default() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze?today=2024-06-10")
                .header("origin", "http://example.com")
                .header("content-type", "application/json")
                .body(Body::from(june_body().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        HeaderValue::from_static("*")
    );
}

#[tokio::test]
async fn test_cors_restricted_origins() {
    let config = ServerConfig {
        allowed_origins: vec!["http://budget.local".to_string()],
        ..Default::default()
    };
    let app = create_router(config);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze?today=2024-06-10")
                .header("origin", "http://evil.example")
                .header("content-type", "application/json")
                .body(Body::from(june_body().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[test]
fn test_parse_allowed_origins() {
    assert_eq!(
        parse_allowed_origins(" http://a.local , ,http://b.local"),
        vec!["http://a.local".to_string(), "http://b.local".to_string()]
    );
    assert!(parse_allowed_origins("").is_empty());
}

#[test]
fn test_server_config_from_file_config() {
    let config = Config::parse("[server]\nallowed_origins = [\"http://x\"]\n").unwrap();
    let server = ServerConfig::from_config(&config);
    assert_eq!(server.allowed_origins, vec!["http://x".to_string()]);
    assert!(!server.allows_any_origin());
}
