//! # IO Module
//!
//! Provides the interface layer between the user interface and the domain logic.
//!
//! This module serves as the adapter layer that translates UI requests into domain
//! operations and formats domain responses for UI consumption. It handles the
//! communication protocol (REST API), serialization/deserialization, and maintains
//! the boundary between the presentation layer and business logic.
//!
//! ## Key Responsibilities
//!
//! - **API Endpoints**: Exposing REST API endpoints for frontend consumption
//! - **Request/Response Handling**: Processing HTTP requests and formatting responses
//! - **Data Serialization**: Converting between JSON and domain objects
//! - **Error Translation**: Converting domain errors to appropriate HTTP status codes
//! - **CORS Management**: Handling cross-origin requests for web frontend
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum for high-performance async HTTP handling
//! - **Serialization**: Serde for JSON serialization/deserialization
//! - **State Management**: Axum extractors for dependency injection
//! - **Error Handling**: Structured error responses with appropriate HTTP codes
//!
//! ## Supported Operations
//!
//! - **GET /api/students**: List all students ordered by name
//! - **POST /api/students**: Enroll a new student
//! - **GET /api/students/:id**: Get a single student
//! - **PUT /api/students/:id**: Update a student's name, fee or status
//! - **DELETE /api/students/:id**: Delete a student
//! - **GET /api/payments**: Monthly payment statement with derived statuses
//! - **POST /api/payments/mark-paid**: Record a payment for a billing period
//! - **GET /api/summary**: Expected/received/outstanding totals for a month

pub mod rest;

pub use rest::*;
