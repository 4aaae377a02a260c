//! Billing period arithmetic and payment status derivation.
//!
//! Everything in this module is pure: the current date is always passed in
//! by the caller instead of being read from a clock, so statement and
//! summary results are deterministic under test.

use chrono::{Datelike, NaiveDate};
use shared::{MonthlySummary, PaymentRecord, PaymentStatus, Student, StudentStatus};
use std::fmt;

/// One billing period: a calendar month of a specific year.
///
/// Ordering is chronological (year first, then month), which is what the
/// eligibility and status rules compare on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BillingPeriod {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum BillingPeriodError {
    #[error("Month must be between 1 and 12")]
    MonthOutOfRange,
}

impl BillingPeriod {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Build a period from request fields, rejecting impossible months
    pub fn from_request(year: i32, month: u32) -> Result<Self, BillingPeriodError> {
        if !(1..=12).contains(&month) {
            return Err(BillingPeriodError::MonthOutOfRange);
        }
        Ok(Self { year, month })
    }

    /// The billing period a given date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Navigate to the next month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    /// Navigate to the previous month
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// A student owes for a period only from their enrollment period onwards.
/// Earlier periods are not billed, not listed and not counted as expected.
pub fn is_eligible(student: &Student, period: BillingPeriod) -> bool {
    BillingPeriod::new(student.enrollment_year, student.enrollment_month) <= period
}

/// Derive the payment status of one student for one billing period.
///
/// A stored payment always wins. Otherwise the period's position relative
/// to today decides: past periods are overdue, future periods are pending,
/// and the current period flips to overdue only strictly after the due day
/// (on the due day itself the payment is still pending).
///
/// `due_day` is compared as stored. A value past the end of the month (say
/// 31 in June) just means the period cannot become overdue until it is past.
pub fn resolve_status(
    stored: Option<PaymentStatus>,
    due_day: u8,
    period: BillingPeriod,
    today: NaiveDate,
) -> PaymentStatus {
    if stored == Some(PaymentStatus::Paid) {
        return PaymentStatus::Paid;
    }

    let current = BillingPeriod::of(today);
    if period < current {
        PaymentStatus::Overdue
    } else if period == current {
        if today.day() > u32::from(due_day) {
            PaymentStatus::Overdue
        } else {
            PaymentStatus::Pending
        }
    } else {
        PaymentStatus::Pending
    }
}

/// Compute the financial roll-up for one billing period.
///
/// Expected sums the current fees of active students billable for the
/// period. Received sums the stored paid amounts for the period, whoever
/// they came from. Outstanding is the plain difference and goes negative
/// when received exceeds expected.
pub fn summarize(
    period: BillingPeriod,
    students: &[Student],
    payments: &[PaymentRecord],
) -> MonthlySummary {
    let expected: f64 = students
        .iter()
        .filter(|s| s.status == StudentStatus::Active && is_eligible(s, period))
        .map(|s| s.monthly_fee)
        .sum();

    let received: f64 = payments
        .iter()
        .filter(|p| p.month == period.month && p.year == period.year && p.status == PaymentStatus::Paid)
        .map(|p| p.amount)
        .sum();

    MonthlySummary {
        month: period.month,
        year: period.year,
        expected,
        received,
        outstanding: expected - received,
    }
}
