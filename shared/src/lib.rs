use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Student ID in format: "student::<epoch_millis>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    /// Student's display name (max 100 characters)
    pub name: String,
    /// Agreed monthly tuition fee (always positive)
    pub monthly_fee: f64,
    /// Day of the month the fee falls due (1-31)
    pub due_day: u8,
    /// First billing month the student is liable for (1-12)
    pub enrollment_month: u32,
    /// Year of the first billing month
    pub enrollment_year: i32,
    /// Only active students appear in statements and summaries
    pub status: StudentStatus,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Whether a student is currently being billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
    Active,
    Inactive,
}

impl StudentStatus {
    /// Canonical text form, also used as the stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "ACTIVE",
            StudentStatus::Inactive => "INACTIVE",
        }
    }

    /// Parse the canonical text form back into a status
    pub fn parse(value: &str) -> Option<StudentStatus> {
        match value {
            "ACTIVE" => Some(StudentStatus::Active),
            "INACTIVE" => Some(StudentStatus::Inactive),
            _ => None,
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment classification of one student for one billing period.
///
/// Only `Paid` is ever stored; `Pending` and `Overdue` are derived when a
/// statement is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Overdue,
}

impl PaymentStatus {
    /// Canonical text form, also used as the stored column value
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Overdue => "OVERDUE",
        }
    }

    /// Parse the canonical text form back into a status
    pub fn parse(value: &str) -> Option<PaymentStatus> {
        match value {
            "PAID" => Some(PaymentStatus::Paid),
            "PENDING" => Some(PaymentStatus::Pending),
            "OVERDUE" => Some(PaymentStatus::Overdue),
            _ => None,
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A tuition payment stored for one student and billing period.
///
/// Identity is the composite (student_id, month, year); there is at most one
/// record per student per period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub student_id: String,
    /// Billing month (1-12)
    pub month: u32,
    /// Billing year
    pub year: i32,
    /// Stored rows are always Paid
    pub status: PaymentStatus,
    /// Amount actually paid (the fee at the time of payment)
    pub amount: f64,
    pub paid_at: String, // RFC 3339 timestamp
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    pub name: String,
    pub monthly_fee: f64,
    pub due_day: u8,
    pub enrollment_month: u32,
    pub enrollment_year: i32,
}

/// Partial update; only name, fee and status can change after enrollment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub monthly_fee: Option<f64>,
    pub status: Option<StudentStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResponse {
    pub student: Student,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentListResponse {
    pub students: Vec<Student>,
}

/// Request to record a tuition payment for one billing period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPaidRequest {
    pub student_id: String,
    /// Billing month (1-12)
    pub month: u32,
    /// Billing year
    pub year: i32,
    /// Amount received; defaults to the student's current fee when omitted
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkPaidResponse {
    pub payment: PaymentRecord,
    pub success_message: String,
}

/// One row of a monthly payment statement: a billable student together with
/// the status derived for the requested period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatementEntry {
    pub student_id: String,
    pub name: String,
    /// The fee owed for the period (the paid amount once a payment exists)
    pub amount: f64,
    pub due_day: u8,
    pub status: PaymentStatus,
    /// Set only when a stored payment exists for the period
    pub paid_at: Option<String>,
}

/// Request for a monthly payment statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentStatementRequest {
    pub month: u32,
    pub year: i32,
    /// Optional filter; None returns every billable student
    pub status: Option<PaymentStatus>,
}

impl Default for PaymentStatementRequest {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year(),
            status: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatementResponse {
    pub month: u32,
    pub year: i32,
    pub entries: Vec<PaymentStatementEntry>,
}

/// Request for the monthly financial summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlySummaryRequest {
    pub month: u32,
    pub year: i32,
}

impl Default for MonthlySummaryRequest {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            month: now.month(),
            year: now.year(),
        }
    }
}

/// Financial roll-up for one billing period.
///
/// `outstanding` is the plain difference `expected - received` and goes
/// negative when payments exceed the expected total (fee reductions,
/// deactivated students who already paid).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub month: u32,
    pub year: i32,
    pub expected: f64,
    pub received: f64,
    pub outstanding: f64,
}

impl Student {
    /// Generate student ID from a creation timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("student::{}", epoch_millis)
    }

    /// Parse student ID to extract the creation timestamp
    pub fn parse_id(id: &str) -> Result<u64, StudentIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "student" {
            return Err(StudentIdError::InvalidFormat);
        }

        parts[1]
            .parse::<u64>()
            .map_err(|_| StudentIdError::InvalidTimestamp)
    }

    /// Extract epoch timestamp from the student ID for sorting
    pub fn extract_timestamp(&self) -> Result<u64, StudentIdError> {
        Self::parse_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StudentIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for StudentIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentIdError::InvalidFormat => write!(f, "Invalid student ID format"),
            StudentIdError::InvalidTimestamp => write!(f, "Invalid timestamp in student ID"),
        }
    }
}

impl std::error::Error for StudentIdError {}
