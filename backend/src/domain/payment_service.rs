use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::domain::billing::{is_eligible, resolve_status, BillingPeriod};
use crate::storage::connection::DbConnection;
use crate::storage::repositories::{PaymentRepository, StudentRepository};
use crate::storage::traits::{PaymentStorage, StudentStorage};
use shared::{
    MarkPaidRequest, MarkPaidResponse, PaymentRecord, PaymentStatementEntry,
    PaymentStatementRequest, PaymentStatementResponse, PaymentStatus,
};

#[derive(Debug, thiserror::Error)]
pub enum PaymentValidationError {
    #[error("Amount must be positive")]
    NonPositiveAmount,
}

/// Service for monthly payment statements and payment recording
#[derive(Clone)]
pub struct PaymentService {
    student_repository: StudentRepository,
    payment_repository: PaymentRepository,
}

impl PaymentService {
    /// Create a new PaymentService
    pub fn new(db: Arc<DbConnection>) -> Self {
        let student_repository = StudentRepository::new((*db).clone());
        let payment_repository = PaymentRepository::new((*db).clone());
        Self {
            student_repository,
            payment_repository,
        }
    }

    /// Build the payment statement for a billing period as of today
    pub async fn monthly_statement(
        &self,
        request: PaymentStatementRequest,
    ) -> Result<PaymentStatementResponse> {
        let today = Local::now().date_naive();
        self.monthly_statement_as_of(request, today).await
    }

    /// Build the payment statement for a billing period against an explicit
    /// reference date.
    ///
    /// Lists every active student billable for the period, ordered by name,
    /// with the status derived from the stored payment (if any), the period's
    /// position relative to `today` and the student's due day.
    pub async fn monthly_statement_as_of(
        &self,
        request: PaymentStatementRequest,
        today: NaiveDate,
    ) -> Result<PaymentStatementResponse> {
        info!(
            "Building payment statement for {:02}/{}",
            request.month, request.year
        );

        let period = BillingPeriod::from_request(request.year, request.month)?;

        let students = self.student_repository.list_active_students().await?;
        let payments = self
            .payment_repository
            .list_payments_for_period(period.month, period.year)
            .await?;

        // Index stored payments by student
        let payments_by_student: HashMap<String, PaymentRecord> = payments
            .into_iter()
            .map(|p| (p.student_id.clone(), p))
            .collect();

        let mut entries = Vec::new();
        for student in &students {
            if !is_eligible(student, period) {
                continue;
            }

            let stored = payments_by_student.get(&student.id);
            let status = resolve_status(stored.map(|p| p.status), student.due_day, period, today);

            entries.push(PaymentStatementEntry {
                student_id: student.id.clone(),
                name: student.name.clone(),
                amount: stored.map(|p| p.amount).unwrap_or(student.monthly_fee),
                due_day: student.due_day,
                status,
                paid_at: stored.map(|p| p.paid_at.clone()),
            });
        }

        // Optional narrowing to one derived status
        if let Some(wanted) = request.status {
            entries.retain(|entry| entry.status == wanted);
        }

        info!("Statement for {} has {} entries", period, entries.len());

        Ok(PaymentStatementResponse {
            month: period.month,
            year: period.year,
            entries,
        })
    }

    /// Record a payment, stamped with the current time
    pub async fn mark_paid(&self, request: MarkPaidRequest) -> Result<MarkPaidResponse> {
        let paid_at = time::OffsetDateTime::now_utc().format(&Rfc3339)?;
        self.mark_paid_at(request, paid_at).await
    }

    /// Record that a student paid for one billing period.
    ///
    /// Upsert semantics: marking an already paid period again replaces the
    /// amount and timestamp on the existing record instead of creating a
    /// second one, so the call is safe to repeat. The amount defaults to the
    /// student's current fee when the request does not carry one.
    pub async fn mark_paid_at(
        &self,
        request: MarkPaidRequest,
        paid_at: String,
    ) -> Result<MarkPaidResponse> {
        info!(
            "Marking student {} as paid for {:02}/{}",
            request.student_id, request.month, request.year
        );

        let period = BillingPeriod::from_request(request.year, request.month)?;

        let student = self
            .student_repository
            .get_student(&request.student_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Student not found: {}", request.student_id))?;

        let amount = request.amount.unwrap_or(student.monthly_fee);
        if amount <= 0.0 {
            return Err(PaymentValidationError::NonPositiveAmount.into());
        }

        let payment = PaymentRecord {
            student_id: student.id.clone(),
            month: period.month,
            year: period.year,
            status: PaymentStatus::Paid,
            amount,
            paid_at,
        };

        self.payment_repository.upsert_payment(&payment).await?;

        info!(
            "Recorded payment of {:.2} by {} for {}",
            amount, student.name, period
        );

        Ok(MarkPaidResponse {
            payment,
            success_message: "Payment recorded successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::student_service::StudentService;
    use shared::CreateStudentRequest;

    async fn setup_test() -> (StudentService, PaymentService) {
        let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        (StudentService::new(db.clone()), PaymentService::new(db))
    }

    async fn enroll(
        students: &StudentService,
        name: &str,
        fee: f64,
        due_day: u8,
        month: u32,
        year: i32,
    ) -> String {
        // Small delay so timestamp-based IDs never collide
        tokio::time::sleep(tokio::time::Duration::from_millis(1)).await;

        let response = students
            .create_student(CreateStudentRequest {
                name: name.to_string(),
                monthly_fee: fee,
                due_day,
                enrollment_month: month,
                enrollment_year: year,
            })
            .await
            .expect("Failed to create student");
        response.student.id
    }

    fn statement_request(month: u32, year: i32) -> PaymentStatementRequest {
        PaymentStatementRequest {
            month,
            year,
            status: None,
        }
    }

    fn mark_request(student_id: &str, month: u32, year: i32, amount: Option<f64>) -> MarkPaidRequest {
        MarkPaidRequest {
            student_id: student_id.to_string(),
            month,
            year,
            amount,
        }
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[tokio::test]
    async fn test_mark_paid_creates_record() {
        let (students, payments) = setup_test().await;
        let id = enroll(&students, "Ana Silva", 200.0, 10, 1, 2025).await;

        let response = payments
            .mark_paid(mark_request(&id, 6, 2025, None))
            .await
            .expect("Failed to mark paid");

        assert_eq!(response.payment.student_id, id);
        assert_eq!(response.payment.month, 6);
        assert_eq!(response.payment.year, 2025);
        assert_eq!(response.payment.status, PaymentStatus::Paid);
        assert_eq!(response.payment.amount, 200.0);
        // Stamped with an RFC 3339 date-time, not a bare date
        assert!(response.payment.paid_at.contains('T'));
        assert_eq!(response.success_message, "Payment recorded successfully");
    }

    #[tokio::test]
    async fn test_mark_paid_is_idempotent() {
        let (students, payments) = setup_test().await;
        let id = enroll(&students, "Ana Silva", 200.0, 10, 1, 2025).await;

        payments
            .mark_paid_at(mark_request(&id, 6, 2025, Some(200.0)), "2025-06-05T10:00:00Z".to_string())
            .await
            .unwrap();
        payments
            .mark_paid_at(mark_request(&id, 6, 2025, Some(200.0)), "2025-06-05T10:00:00Z".to_string())
            .await
            .unwrap();

        let statement = payments
            .monthly_statement_as_of(statement_request(6, 2025), date(2025, 6, 15))
            .await
            .unwrap();
        assert_eq!(statement.entries.len(), 1);
        assert_eq!(statement.entries[0].status, PaymentStatus::Paid);
        assert_eq!(statement.entries[0].amount, 200.0);
        assert_eq!(statement.entries[0].paid_at.as_deref(), Some("2025-06-05T10:00:00Z"));
    }

    #[tokio::test]
    async fn test_mark_paid_again_replaces_amount_and_timestamp() {
        let (students, payments) = setup_test().await;
        let id = enroll(&students, "Ana Silva", 200.0, 10, 1, 2025).await;

        payments
            .mark_paid_at(mark_request(&id, 6, 2025, None), "2025-06-05T10:00:00Z".to_string())
            .await
            .unwrap();
        payments
            .mark_paid_at(mark_request(&id, 6, 2025, Some(250.0)), "2025-06-09T10:00:00Z".to_string())
            .await
            .unwrap();

        let statement = payments
            .monthly_statement_as_of(statement_request(6, 2025), date(2025, 6, 15))
            .await
            .unwrap();
        assert_eq!(statement.entries.len(), 1);
        assert_eq!(statement.entries[0].amount, 250.0);
        assert_eq!(statement.entries[0].paid_at.as_deref(), Some("2025-06-09T10:00:00Z"));
    }

    #[tokio::test]
    async fn test_mark_paid_unknown_student() {
        let (_students, payments) = setup_test().await;

        let result = payments
            .mark_paid(mark_request("student::nonexistent", 6, 2025, None))
            .await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_mark_paid_invalid_month() {
        let (students, payments) = setup_test().await;
        let id = enroll(&students, "Ana Silva", 200.0, 10, 1, 2025).await;

        assert!(payments.mark_paid(mark_request(&id, 0, 2025, None)).await.is_err());
        assert!(payments.mark_paid(mark_request(&id, 13, 2025, None)).await.is_err());
    }

    #[tokio::test]
    async fn test_mark_paid_rejects_non_positive_amount() {
        let (students, payments) = setup_test().await;
        let id = enroll(&students, "Ana Silva", 200.0, 10, 1, 2025).await;

        assert!(payments.mark_paid(mark_request(&id, 6, 2025, Some(0.0))).await.is_err());
        assert!(payments.mark_paid(mark_request(&id, 6, 2025, Some(-50.0))).await.is_err());
    }

    #[tokio::test]
    async fn test_statement_statuses_around_due_day() {
        let (students, payments) = setup_test().await;
        let overdue_id = enroll(&students, "Ana Silva", 200.0, 10, 1, 2025).await;
        let _pending_id = enroll(&students, "Bruno Costa", 150.0, 20, 1, 2025).await;
        let _due_today_id = enroll(&students, "Carla Dias", 180.0, 15, 1, 2025).await;
        let paid_id = enroll(&students, "Diego Souza", 220.0, 5, 1, 2025).await;

        payments
            .mark_paid_at(mark_request(&paid_id, 6, 2025, None), "2025-06-03T10:00:00Z".to_string())
            .await
            .unwrap();

        let statement = payments
            .monthly_statement_as_of(statement_request(6, 2025), date(2025, 6, 15))
            .await
            .unwrap();

        // Ordered by name
        let names: Vec<&str> = statement.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ana Silva", "Bruno Costa", "Carla Dias", "Diego Souza"]);

        assert_eq!(statement.entries[0].student_id, overdue_id);
        assert_eq!(statement.entries[0].status, PaymentStatus::Overdue); // due day 10 < 15
        assert_eq!(statement.entries[1].status, PaymentStatus::Pending); // due day 20 > 15
        assert_eq!(statement.entries[2].status, PaymentStatus::Pending); // due day 15 == 15
        assert_eq!(statement.entries[3].status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_statement_past_period_paid_stays_paid() {
        let (students, payments) = setup_test().await;
        let id = enroll(&students, "Ana Silva", 200.0, 10, 1, 2025).await;

        payments
            .mark_paid_at(mark_request(&id, 5, 2025, None), "2025-05-08T10:00:00Z".to_string())
            .await
            .unwrap();

        let statement = payments
            .monthly_statement_as_of(statement_request(5, 2025), date(2025, 6, 15))
            .await
            .unwrap();
        assert_eq!(statement.entries[0].status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_statement_past_and_future_periods() {
        let (students, payments) = setup_test().await;
        enroll(&students, "Ana Silva", 200.0, 10, 1, 2025).await;

        let past = payments
            .monthly_statement_as_of(statement_request(5, 2025), date(2025, 6, 15))
            .await
            .unwrap();
        assert_eq!(past.entries[0].status, PaymentStatus::Overdue);

        let future = payments
            .monthly_statement_as_of(statement_request(7, 2025), date(2025, 6, 15))
            .await
            .unwrap();
        assert_eq!(future.entries[0].status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_statement_excludes_pre_enrollment_periods() {
        let (students, payments) = setup_test().await;
        enroll(&students, "Ana Silva", 200.0, 10, 3, 2025).await;

        // February 2025 is before the March enrollment
        let before = payments
            .monthly_statement_as_of(statement_request(2, 2025), date(2025, 6, 15))
            .await
            .unwrap();
        assert!(before.entries.is_empty());

        let from_enrollment = payments
            .monthly_statement_as_of(statement_request(3, 2025), date(2025, 6, 15))
            .await
            .unwrap();
        assert_eq!(from_enrollment.entries.len(), 1);
    }

    #[tokio::test]
    async fn test_statement_excludes_inactive_students() {
        let (students, payments) = setup_test().await;
        let id = enroll(&students, "Ana Silva", 200.0, 10, 1, 2025).await;

        students
            .update_student(
                &id,
                shared::UpdateStudentRequest {
                    name: None,
                    monthly_fee: None,
                    status: Some(shared::StudentStatus::Inactive),
                },
            )
            .await
            .unwrap();

        let statement = payments
            .monthly_statement_as_of(statement_request(6, 2025), date(2025, 6, 15))
            .await
            .unwrap();
        assert!(statement.entries.is_empty());
    }

    #[tokio::test]
    async fn test_statement_status_filter() {
        let (students, payments) = setup_test().await;
        enroll(&students, "Ana Silva", 200.0, 10, 1, 2025).await;
        let paid_id = enroll(&students, "Bruno Costa", 150.0, 20, 1, 2025).await;

        payments
            .mark_paid_at(mark_request(&paid_id, 6, 2025, None), "2025-06-03T10:00:00Z".to_string())
            .await
            .unwrap();

        let mut request = statement_request(6, 2025);
        request.status = Some(PaymentStatus::Overdue);

        let statement = payments
            .monthly_statement_as_of(request, date(2025, 6, 15))
            .await
            .unwrap();
        assert_eq!(statement.entries.len(), 1);
        assert_eq!(statement.entries[0].name, "Ana Silva");
    }

    #[tokio::test]
    async fn test_statement_amount_reflects_stored_payment() {
        let (students, payments) = setup_test().await;
        let id = enroll(&students, "Ana Silva", 200.0, 10, 1, 2025).await;

        payments
            .mark_paid_at(mark_request(&id, 6, 2025, None), "2025-06-03T10:00:00Z".to_string())
            .await
            .unwrap();

        // Fee raised after the June payment
        students
            .update_student(
                &id,
                shared::UpdateStudentRequest {
                    name: None,
                    monthly_fee: Some(250.0),
                    status: None,
                },
            )
            .await
            .unwrap();

        // June keeps the amount that was actually paid
        let june = payments
            .monthly_statement_as_of(statement_request(6, 2025), date(2025, 6, 15))
            .await
            .unwrap();
        assert_eq!(june.entries[0].amount, 200.0);

        // July shows the new fee
        let july = payments
            .monthly_statement_as_of(statement_request(7, 2025), date(2025, 6, 15))
            .await
            .unwrap();
        assert_eq!(july.entries[0].amount, 250.0);
    }

    #[tokio::test]
    async fn test_statement_invalid_month() {
        let (_students, payments) = setup_test().await;

        let result = payments
            .monthly_statement_as_of(statement_request(13, 2025), date(2025, 6, 15))
            .await;
        assert!(result.is_err());
    }
}
