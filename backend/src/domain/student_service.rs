use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::storage::connection::DbConnection;
use crate::storage::repositories::student_repository::StudentRepository;
use crate::storage::traits::StudentStorage;
use shared::{
    CreateStudentRequest, Student, StudentListResponse, StudentResponse, StudentStatus,
    UpdateStudentRequest,
};

#[derive(Debug, thiserror::Error)]
pub enum StudentValidationError {
    #[error("Student name cannot be empty")]
    EmptyName,
    #[error("Student name cannot exceed 100 characters")]
    NameTooLong,
    #[error("Monthly fee must be positive")]
    NonPositiveFee,
    #[error("Due day must be between 1 and 31")]
    DueDayOutOfRange,
    #[error("Enrollment month must be between 1 and 12")]
    EnrollmentMonthOutOfRange,
    #[error("Enrollment year must be between 1900 and 2100")]
    EnrollmentYearOutOfRange,
}

/// Service for managing the students a tutor bills every month
#[derive(Clone)]
pub struct StudentService {
    student_repository: StudentRepository,
}

impl StudentService {
    /// Create a new StudentService
    pub fn new(db: Arc<DbConnection>) -> Self {
        let student_repository = StudentRepository::new((*db).clone());
        Self { student_repository }
    }

    /// Enroll a new student. New students always start active.
    pub async fn create_student(&self, request: CreateStudentRequest) -> Result<StudentResponse> {
        info!(
            "Creating student: name={}, fee={}, due_day={}, enrollment={:02}/{}",
            request.name,
            request.monthly_fee,
            request.due_day,
            request.enrollment_month,
            request.enrollment_year
        );

        // Validate the request
        self.validate_create_request(&request)?;

        // Generate timestamps
        let now = Utc::now();
        let timestamp_millis = now.timestamp_millis() as u64;
        let timestamp_rfc3339 = now.to_rfc3339();

        // Create the student
        let student = Student {
            id: Student::generate_id(timestamp_millis),
            name: request.name.trim().to_string(),
            monthly_fee: request.monthly_fee,
            due_day: request.due_day,
            enrollment_month: request.enrollment_month,
            enrollment_year: request.enrollment_year,
            status: StudentStatus::Active,
            created_at: timestamp_rfc3339.clone(),
            updated_at: timestamp_rfc3339,
        };

        // Store in database
        self.student_repository.store_student(&student).await?;

        info!("Created student: {} with ID: {}", student.name, student.id);

        Ok(StudentResponse {
            student,
            success_message: "Student created successfully".to_string(),
        })
    }

    /// Get a student by ID
    pub async fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        info!("Getting student: {}", student_id);

        let student = self.student_repository.get_student(student_id).await?;

        if student.is_some() {
            info!("Found student: {}", student_id);
        } else {
            warn!("Student not found: {}", student_id);
        }

        Ok(student)
    }

    /// List all students ordered by name, inactive ones included
    pub async fn list_students(&self) -> Result<StudentListResponse> {
        info!("Listing all students");

        let students = self.student_repository.list_students().await?;

        info!("Found {} students", students.len());

        Ok(StudentListResponse { students })
    }

    /// Update an existing student. Only name, fee and status can change.
    pub async fn update_student(
        &self,
        student_id: &str,
        request: UpdateStudentRequest,
    ) -> Result<StudentResponse> {
        info!("Updating student: {}", student_id);

        // Get the existing student
        let mut student = self
            .student_repository
            .get_student(student_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Student not found: {}", student_id))?;

        // Validate the update request
        self.validate_update_request(&request)?;

        // Update fields if provided
        if let Some(name) = request.name {
            student.name = name.trim().to_string();
        }
        if let Some(monthly_fee) = request.monthly_fee {
            student.monthly_fee = monthly_fee;
        }
        if let Some(status) = request.status {
            student.status = status;
        }

        // Update timestamp
        student.updated_at = Utc::now().to_rfc3339();

        // Store updated student
        self.student_repository.update_student(&student).await?;

        info!("Updated student: {} with ID: {}", student.name, student.id);

        Ok(StudentResponse {
            student,
            success_message: "Student updated successfully".to_string(),
        })
    }

    /// Delete a student. Payment records for the student are kept as history.
    pub async fn delete_student(&self, student_id: &str) -> Result<()> {
        info!("Deleting student: {}", student_id);

        // Verify the student exists
        let student = self
            .student_repository
            .get_student(student_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Student not found: {}", student_id))?;

        self.student_repository.delete_student(student_id).await?;

        info!("Deleted student: {} with ID: {}", student.name, student.id);

        Ok(())
    }

    /// Validate create student request
    fn validate_create_request(
        &self,
        request: &CreateStudentRequest,
    ) -> Result<(), StudentValidationError> {
        self.validate_name(&request.name)?;
        self.validate_fee(request.monthly_fee)?;

        if !(1..=31).contains(&request.due_day) {
            return Err(StudentValidationError::DueDayOutOfRange);
        }
        if !(1..=12).contains(&request.enrollment_month) {
            return Err(StudentValidationError::EnrollmentMonthOutOfRange);
        }
        if !(1900..=2100).contains(&request.enrollment_year) {
            return Err(StudentValidationError::EnrollmentYearOutOfRange);
        }

        Ok(())
    }

    /// Validate update student request
    fn validate_update_request(
        &self,
        request: &UpdateStudentRequest,
    ) -> Result<(), StudentValidationError> {
        if let Some(ref name) = request.name {
            self.validate_name(name)?;
        }
        if let Some(monthly_fee) = request.monthly_fee {
            self.validate_fee(monthly_fee)?;
        }

        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), StudentValidationError> {
        if name.trim().is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        if name.len() > 100 {
            return Err(StudentValidationError::NameTooLong);
        }
        Ok(())
    }

    fn validate_fee(&self, monthly_fee: f64) -> Result<(), StudentValidationError> {
        if monthly_fee <= 0.0 {
            return Err(StudentValidationError::NonPositiveFee);
        }
        Ok(())
    }
}
