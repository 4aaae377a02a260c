//! # REST API for Payments
//!
//! Endpoints for the monthly payment statement and for recording payments.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

use crate::AppState;
use shared::{MarkPaidRequest, PaymentStatementRequest};

/// Get the payment statement for a billing period
pub async fn get_payment_statement(
    State(state): State<AppState>,
    Query(request): Query<PaymentStatementRequest>,
) -> impl IntoResponse {
    info!("GET /api/payments - query: {:?}", request);

    match state.payment_service.monthly_statement(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to build payment statement: {}", e);
            let status = if e.to_string().contains("Month must be") {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (status, e.to_string()).into_response()
        }
    }
}

/// Record that a student paid for a billing period
pub async fn mark_paid(
    State(state): State<AppState>,
    Json(request): Json<MarkPaidRequest>,
) -> impl IntoResponse {
    info!("POST /api/payments/mark-paid - request: {:?}", request);

    match state.payment_service.mark_paid(request).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to mark paid: {}", e);
            let status = if e.to_string().contains("not found") {
                StatusCode::NOT_FOUND
            } else {
                StatusCode::BAD_REQUEST
            };
            (status, e.to_string()).into_response()
        }
    }
}
