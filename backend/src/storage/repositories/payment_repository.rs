use anyhow::Result;
use async_trait::async_trait;
use shared::{PaymentRecord, PaymentStatus};
use sqlx::Row;

use crate::storage::connection::DbConnection;
use crate::storage::traits::PaymentStorage;

/// Repository for payment record operations
#[derive(Clone)]
pub struct PaymentRepository {
    db: DbConnection,
}

impl PaymentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_payment(row: &sqlx::sqlite::SqliteRow) -> Result<PaymentRecord> {
        let status: String = row.get("status");
        let status = PaymentStatus::parse(&status)
            .ok_or_else(|| anyhow::anyhow!("Unknown payment status: {}", status))?;

        Ok(PaymentRecord {
            student_id: row.get("student_id"),
            month: row.get("month"),
            year: row.get("year"),
            status,
            amount: row.get("amount"),
            paid_at: row.get("paid_at"),
        })
    }
}

#[async_trait]
impl PaymentStorage for PaymentRepository {
    /// Insert or replace the payment record for one student and period.
    ///
    /// The conflict target is the composite primary key, so repeated calls
    /// for the same period settle on a single row. This is the atomicity
    /// guarantee for mark-paid; no application-level locking is involved.
    async fn upsert_payment(&self, payment: &PaymentRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (student_id, month, year, status, amount, paid_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (student_id, month, year)
            DO UPDATE SET status = excluded.status, amount = excluded.amount, paid_at = excluded.paid_at
            "#,
        )
        .bind(&payment.student_id)
        .bind(payment.month)
        .bind(payment.year)
        .bind(payment.status.as_str())
        .bind(payment.amount)
        .bind(&payment.paid_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Get the payment record for one student and billing period
    async fn get_payment(
        &self,
        student_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Option<PaymentRecord>> {
        let row = sqlx::query(
            r#"
            SELECT student_id, month, year, status, amount, paid_at
            FROM payments
            WHERE student_id = ? AND month = ? AND year = ?
            "#,
        )
        .bind(student_id)
        .bind(month)
        .bind(year)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_payment(&r)?)),
            None => Ok(None),
        }
    }

    /// List all payment records stored for a billing period
    async fn list_payments_for_period(&self, month: u32, year: i32) -> Result<Vec<PaymentRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT student_id, month, year, status, amount, paid_at
            FROM payments
            WHERE month = ? AND year = ?
            "#,
        )
        .bind(month)
        .bind(year)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_payment).collect()
    }
}
