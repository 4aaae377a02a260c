//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the tuition tracker application.
//! This layer handles:
//! - HTTP request/response serialization and deserialization
//! - Input validation and sanitization
//! - Error translation from domain to HTTP status codes
//! - CORS configuration for frontend integration
//! - Request logging and monitoring
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: RESTful HTTP interfaces for all operations
//! - **Error Handling**: Converting domain errors to proper HTTP responses
//! - **Serialization**: JSON request/response handling
//! - **Logging**: Request/response logging for debugging and monitoring
//!
//! ## Design Principles
//!
//! - **REST Compliance**: Following RESTful design patterns
//! - **Error Transparency**: Clear error messages for debugging
//! - **Domain Separation**: Pure translation layer without business logic

// Module declarations
pub mod payment_apis;
pub mod student_apis;
pub mod summary_apis;

pub use payment_apis::*;
pub use student_apis::*;
pub use summary_apis::*;
