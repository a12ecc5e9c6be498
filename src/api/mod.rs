//! REST API for the sales dashboard
//!
//! A browser UI drives the session through these endpoints; all computation
//! happens in the session pipeline.

pub mod handlers;
pub mod service;

pub use service::DashboardService;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(service: Arc<DashboardService>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/api/v1/health", get(handlers::health))
        // Dashboard
        .route("/api/v1/dashboard", get(handlers::get_dashboard))
        .route("/api/v1/options", get(handlers::get_options))
        .route("/api/v1/export.csv", get(handlers::export_csv))
        // Session state
        .route(
            "/api/v1/selection",
            get(handlers::get_selection).put(handlers::put_selection),
        )
        .route("/api/v1/regenerate", post(handlers::regenerate))
        // State and middleware
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::session::DashboardSession;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn service() -> Arc<DashboardService> {
        let config = DashboardConfig {
            rows: 120,
            seed: Some(99),
            ..DashboardConfig::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        Arc::new(DashboardService::new(DashboardSession::with_today(&config, today).unwrap()))
    }

    async fn send(service: &Arc<DashboardService>, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = router(service.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(service: &Arc<DashboardService>, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, body) = send(service, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn put_json(service: &Arc<DashboardService>, uri: &str, payload: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::PUT)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap();
        let (status, body) = send(service, request).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(&service(), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_dashboard_limit_and_sort() {
        let svc = service();
        let (status, body) = get_json(&svc, "/api/v1/dashboard?limit=5&sort=quantity&order=asc").await;
        assert_eq!(status, StatusCode::OK);

        let records = body["records"].as_array().unwrap();
        assert_eq!(records.len(), 5);
        let quantities: Vec<u64> = records.iter().map(|r| r["quantity"].as_u64().unwrap()).collect();
        let mut sorted = quantities.clone();
        sorted.sort();
        assert_eq!(quantities, sorted);

        assert_eq!(body["summary"]["record_count"], "120");
        assert_eq!(body["generation"], 0);
    }

    #[tokio::test]
    async fn test_dashboard_bad_sort_key() {
        let (status, body) = get_json(&service(), "/api/v1/dashboard?sort=weight").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown sort key: 'weight'");
    }

    #[tokio::test]
    async fn test_selection_round_trip() {
        let svc = service();
        let (status, body) = put_json(
            &svc,
            "/api/v1/selection",
            json!({"regions": ["North"], "products": ["notebook", "Monitor"]}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["regions"], json!(["North"]));
        assert_eq!(body["products"], json!(["Monitor", "Notebook"]));

        let (_, selection) = get_json(&svc, "/api/v1/selection").await;
        assert_eq!(selection, body);

        let (_, dashboard) = get_json(&svc, "/api/v1/dashboard?limit=1000").await;
        for record in dashboard["records"].as_array().unwrap() {
            assert_eq!(record["region"], "North");
            let product = record["product"].as_str().unwrap();
            assert!(product == "Notebook" || product == "Monitor");
        }
    }

    #[tokio::test]
    async fn test_selection_unknown_name() {
        let svc = service();
        let before = svc.selection().await;
        let (status, body) = put_json(&svc, "/api/v1/selection", json!({"salespeople": ["Nobody"]})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "unknown salesperson: 'Nobody'");
        assert_eq!(svc.selection().await, before);
    }

    #[tokio::test]
    async fn test_empty_window() {
        let svc = service();
        let (status, _) = put_json(
            &svc,
            "/api/v1/selection",
            json!({"start": "2030-01-01", "end": "2030-01-31"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, dashboard) = get_json(&svc, "/api/v1/dashboard").await;
        assert_eq!(dashboard["summary"]["grand_total"], "0.00");
        assert_eq!(dashboard["summary"]["best_performer"], "N/A");
        assert_eq!(dashboard["best_performer"], json!({"status": "no_data"}));
        assert_eq!(dashboard["records"], json!([]));
        assert_eq!(dashboard["report"]["salespeople"], json!([]));
    }

    #[tokio::test]
    async fn test_regenerate() {
        let svc = service();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/regenerate")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&svc, request).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"generation": 1, "rows": 120}));

        let (_, dashboard) = get_json(&svc, "/api/v1/dashboard").await;
        assert_eq!(dashboard["generation"], 1);
    }

    #[tokio::test]
    async fn test_options() {
        let (status, body) = get_json(&service(), "/api/v1/options").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["regions"], json!(["Center", "East", "North", "South", "West"]));
        assert!(body["date_range"]["start"].is_string());
    }

    #[tokio::test]
    async fn test_export_csv() {
        let svc = service();
        let request = Request::builder().uri("/api/v1/export.csv").body(Body::empty()).unwrap();
        let response = router(svc.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with("id,date,salesperson"));
        assert_eq!(text.lines().count(), 121);
    }
}
