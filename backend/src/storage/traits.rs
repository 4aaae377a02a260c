//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;
use shared::{PaymentRecord, Student};

/// Trait defining the interface for student storage operations
///
/// This trait abstracts away the specific storage implementation details,
/// allowing the domain layer to work with different storage backends
/// without modification.
#[async_trait]
pub trait StudentStorage: Send + Sync {
    /// Store a new student
    async fn store_student(&self, student: &Student) -> Result<()>;

    /// Retrieve a specific student by ID
    async fn get_student(&self, student_id: &str) -> Result<Option<Student>>;

    /// List all students ordered by name
    async fn list_students(&self) -> Result<Vec<Student>>;

    /// List active students ordered by name
    async fn list_active_students(&self) -> Result<Vec<Student>>;

    /// Update an existing student
    async fn update_student(&self, student: &Student) -> Result<()>;

    /// Delete a student by ID
    /// Returns true if the student was found and deleted, false otherwise
    async fn delete_student(&self, student_id: &str) -> Result<bool>;
}

/// Trait defining the interface for payment record storage operations
///
/// Records are keyed by (student_id, month, year); the store enforces at
/// most one record per student per billing period.
#[async_trait]
pub trait PaymentStorage: Send + Sync {
    /// Insert a payment record, or replace the amount, status and timestamp
    /// of the existing record for the same student and billing period
    async fn upsert_payment(&self, payment: &PaymentRecord) -> Result<()>;

    /// Retrieve the payment record for one student and billing period
    async fn get_payment(
        &self,
        student_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<PaymentRecord>>;

    /// List all payment records stored for a billing period
    async fn list_payments_for_period(&self, month: u32, year: i32) -> Result<Vec<PaymentRecord>>;
}
