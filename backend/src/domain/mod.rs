//! # Domain Module
//!
//! Contains all business logic for the tuition tracker application.
//!
//! This module encapsulates the core business rules, entities, and services
//! that define how students, monthly fees, and payments are modeled and
//! managed. It operates independently of any specific UI framework or storage
//! mechanism.
//!
//! ## Module Organization
//!
//! - **billing**: Pure billing-period logic (eligibility, status derivation, totals)
//! - **student_service**: Student CRUD operations and validation
//! - **payment_service**: Monthly payment statements and payment recording
//! - **summary_service**: Expected/received/outstanding totals per billing period
//!
//! ## Key Responsibilities
//!
//! - **Student Management**: Creating, validating, and updating student records
//! - **Payment Recording**: Marking billing periods as paid with upsert semantics
//! - **Status Derivation**: Computing paid/pending/overdue from stored payments and dates
//! - **Financial Summaries**: Aggregating fees and payments per billing period
//!
//! ## Business Rules
//!
//! - Student names must be non-empty and monthly fees positive
//! - A student owes fees from their enrollment month onward
//! - At most one payment record exists per student and billing period
//! - Stored payments always win over date-based status derivation
//! - All date comparisons happen against an injected reference date
//!
//! ## Design Principles
//!
//! - **Testability**: Pure functions and explicit dates for deterministic tests
//! - **Storage Agnostic**: Works through the storage traits
//! - **UI Agnostic**: Business logic separate from presentation concerns

pub mod billing;
pub mod payment_service;
pub mod student_service;
pub mod summary_service;

pub use billing::*;
pub use payment_service::*;
pub use student_service::*;
pub use summary_service::*;
