use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::domain::billing::{summarize, BillingPeriod};
use crate::storage::connection::DbConnection;
use crate::storage::repositories::{PaymentRepository, StudentRepository};
use crate::storage::traits::{PaymentStorage, StudentStorage};
use shared::{MonthlySummary, MonthlySummaryRequest};

/// Service for the monthly financial summary
#[derive(Clone)]
pub struct SummaryService {
    student_repository: StudentRepository,
    payment_repository: PaymentRepository,
}

impl SummaryService {
    /// Create a new SummaryService
    pub fn new(db: Arc<DbConnection>) -> Self {
        let student_repository = StudentRepository::new((*db).clone());
        let payment_repository = PaymentRepository::new((*db).clone());
        Self {
            student_repository,
            payment_repository,
        }
    }

    /// Compute expected, received and outstanding totals for one billing period
    pub async fn monthly_summary(&self, request: MonthlySummaryRequest) -> Result<MonthlySummary> {
        info!(
            "Computing monthly summary for {:02}/{}",
            request.month, request.year
        );

        let period = BillingPeriod::from_request(request.year, request.month)?;

        let students = self.student_repository.list_students().await?;
        let payments = self
            .payment_repository
            .list_payments_for_period(period.month, period.year)
            .await?;

        let summary = summarize(period, &students, &payments);

        info!(
            "Summary for {}: expected {:.2}, received {:.2}, outstanding {:.2}",
            period, summary.expected, summary.received, summary.outstanding
        );

        Ok(summary)
    }
}
