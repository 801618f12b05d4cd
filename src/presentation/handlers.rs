// HTTP request handlers
use crate::application::dashboard_service::Page;
use crate::application::view::RowFilter;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct DashboardQuery {
    /// "daily" | "weekly" | "monthly"; anything else means the raw tail.
    pub view: Option<String>,
    pub city: Option<String>,
    pub date: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Build one page's dashboard payload. The upstream fetches run inside
/// this request future, so an abandoned request cancels them.
pub async fn get_dashboard(
    Path(page): Path<String>,
    Query(query): Query<DashboardQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let Some(page) = Page::parse(&page) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let filter = RowFilter {
        city: query.city,
        date: query.date,
    };

    let dashboard = state
        .dashboard_service
        .get_dashboard(page, query.view.as_deref(), &filter)
        .await;

    Json(dashboard).into_response()
}
