//! # REST API for the Monthly Summary
//!
//! Endpoint exposing expected, received and outstanding totals per month.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::MonthlySummaryRequest;

/// Get the financial summary for a billing period
pub async fn get_monthly_summary(
    State(state): State<AppState>,
    Query(request): Query<MonthlySummaryRequest>,
) -> impl IntoResponse {
    info!("GET /api/summary - query: {:?}", request);

    match state.summary_service.monthly_summary(request).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            error!("Failed to compute monthly summary: {}", e);
            let status = if e.to_string().contains("Month must be") {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}
