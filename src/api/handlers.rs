//! REST API handlers for the sales dashboard
//!
//! These handlers use the shared DashboardService.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::Arc;

use super::service::DashboardService;
use crate::filter::{DateRange, FilterOptions, Selection};
use crate::models::ParseNameError;
use crate::session::DashboardView;
use crate::table::{sort_records, SortKey, SortOrder};

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize)]
pub struct RegenerateResponse {
    pub generation: u64,
    pub rows: usize,
}

/// Selection as sent by a client: plain names, open-ended dates.
/// A missing `start` or `end` keeps the current bound.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SelectionRequest {
    #[serde(default)]
    pub salespeople: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub products: Vec<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

fn parse_names<T: FromStr<Err = ParseNameError> + Ord>(names: &[String]) -> Result<BTreeSet<T>, ParseNameError> {
    names.iter().map(|n| n.parse()).collect()
}

impl SelectionRequest {
    pub fn into_selection(self, current: &Selection) -> Result<Selection, ParseNameError> {
        Ok(Selection {
            salespeople: parse_names(&self.salespeople)?,
            regions: parse_names(&self.regions)?,
            products: parse_names(&self.products)?,
            date_range: DateRange::new(
                self.start.unwrap_or(current.date_range.start),
                self.end.unwrap_or(current.date_range.end),
            ),
        })
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub limit: Option<usize>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

pub type AppState = Arc<DashboardService>;
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(e: impl ToString) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e.to_string() }))
}

/// GET /api/v1/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/v1/dashboard?limit=N&sort=KEY&order=asc|desc
pub async fn get_dashboard(
    State(service): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardView>, ApiError> {
    let limit = params.limit.unwrap_or(100);
    let key = match params.sort.as_deref() {
        Some(s) => s.parse::<SortKey>().map_err(bad_request)?,
        None => SortKey::Total,
    };
    let order = match params.order.as_deref() {
        Some(s) => s.parse::<SortOrder>().map_err(bad_request)?,
        None => SortOrder::Descending,
    };

    let mut view = service.view().await;
    sort_records(&mut view.records, key, order);
    view.records.truncate(limit);
    Ok(Json(view))
}

/// GET /api/v1/options
pub async fn get_options(State(service): State<AppState>) -> Json<FilterOptions> {
    Json(service.options().await)
}

/// GET /api/v1/selection
pub async fn get_selection(State(service): State<AppState>) -> Json<Selection> {
    Json(service.selection().await)
}

/// PUT /api/v1/selection
pub async fn put_selection(
    State(service): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<Selection>, ApiError> {
    service.update_selection(request).await.map(Json).map_err(bad_request)
}

/// POST /api/v1/regenerate
pub async fn regenerate(State(service): State<AppState>) -> Json<RegenerateResponse> {
    let (generation, rows) = service.regenerate().await;
    Json(RegenerateResponse { generation, rows })
}

/// GET /api/v1/export.csv
pub async fn export_csv(State(service): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    match service.export_csv().await {
        Ok(body) => Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body)),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() }))),
    }
}
