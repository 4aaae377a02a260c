//! # Backend
//!
//! Contains all non-UI logic for the tuition tracker application.
//!
//! This crate serves as the orchestration layer that brings together:
//! - **Domain**: Business logic and rules for students, payments and summaries
//! - **Storage**: Data persistence mechanisms (SQLite database)
//! - **IO**: Interface layer that exposes functionality over HTTP
//!
//! The backend is designed to be UI-agnostic, meaning it could support
//! different frontend frameworks or even CLI interfaces without modification.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! UI Layer (web frontend)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (Business logic, services)
//!     ↓
//! Storage Layer (Database, persistence)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize and configure the application state
//! - Set up the REST API router with proper CORS configuration
//! - Coordinate between domain logic and data persistence
//! - Provide a clean separation of concerns for maintainability

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub use crate::domain::{PaymentService, StudentService, SummaryService};
pub use crate::storage::DbConnection;

pub use domain::*;
pub use io::*;
pub use storage::*;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub student_service: StudentService,
    pub payment_service: PaymentService,
    pub summary_service: SummaryService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up database");
    let db_conn = Arc::new(DbConnection::init().await?);

    info!("Setting up domain services");
    let student_service = StudentService::new(db_conn.clone());
    let payment_service = PaymentService::new(db_conn.clone());
    let summary_service = SummaryService::new(db_conn);

    info!("Setting up application state");
    let app_state = AppState {
        student_service,
        payment_service,
        summary_service,
    };

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    // Set up our application routes
    let api_routes = Router::new()
        .route("/students", get(io::list_students).post(io::create_student))
        .route(
            "/students/:student_id",
            get(io::get_student)
                .put(io::update_student)
                .delete(io::delete_student),
        )
        .route("/payments", get(io::get_payment_statement))
        .route("/payments/mark-paid", post(io::mark_paid))
        .route("/summary", get(io::get_monthly_summary));

    // Define our main application router
    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn test_router() -> Router {
        let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        let app_state = AppState {
            student_service: StudentService::new(db.clone()),
            payment_service: PaymentService::new(db.clone()),
            summary_service: SummaryService::new(db),
        };
        create_router(app_state)
    }

    #[tokio::test]
    async fn test_router_serves_student_routes() {
        let app = test_router().await;

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/api/students").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Routes only exist under the /api prefix
        let response = app
            .oneshot(Request::builder().uri("/students").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_router_round_trip() {
        let app = test_router().await;

        let request = shared::CreateStudentRequest {
            name: "Ana Silva".to_string(),
            monthly_fee: 200.0,
            due_day: 10,
            enrollment_month: 1,
            enrollment_year: 2025,
        };
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/students")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/summary?month=6&year=2025")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let summary: shared::MonthlySummary = serde_json::from_slice(&body).unwrap();
        assert_eq!(summary.expected, 200.0);
        assert_eq!(summary.outstanding, 200.0);
    }
}
