use anyhow::Result;
use async_trait::async_trait;
use shared::{Student, StudentStatus};
use sqlx::Row;

use crate::storage::connection::DbConnection;
use crate::storage::traits::StudentStorage;

/// Repository for student operations
#[derive(Clone)]
pub struct StudentRepository {
    db: DbConnection,
}

impl StudentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_student(row: &sqlx::sqlite::SqliteRow) -> Result<Student> {
        let status: String = row.get("status");
        let status = StudentStatus::parse(&status)
            .ok_or_else(|| anyhow::anyhow!("Unknown student status: {}", status))?;

        Ok(Student {
            id: row.get("id"),
            name: row.get("name"),
            monthly_fee: row.get("monthly_fee"),
            due_day: row.get("due_day"),
            enrollment_month: row.get("enrollment_month"),
            enrollment_year: row.get("enrollment_year"),
            status,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }
}

#[async_trait]
impl StudentStorage for StudentRepository {
    /// Store a student in the database
    async fn store_student(&self, student: &Student) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO students (id, name, monthly_fee, due_day, enrollment_month, enrollment_year, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&student.id)
        .bind(&student.name)
        .bind(student.monthly_fee)
        .bind(student.due_day)
        .bind(student.enrollment_month)
        .bind(student.enrollment_year)
        .bind(student.status.as_str())
        .bind(&student.created_at)
        .bind(&student.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Get a student by ID
    async fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, monthly_fee, due_day, enrollment_month, enrollment_year, status, created_at, updated_at
            FROM students
            WHERE id = ?
            "#,
        )
        .bind(student_id)
        .fetch_optional(self.db.pool())
        .await?;

        match row {
            Some(r) => Ok(Some(Self::row_to_student(&r)?)),
            None => Ok(None),
        }
    }

    /// List all students ordered by name
    async fn list_students(&self) -> Result<Vec<Student>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, monthly_fee, due_day, enrollment_month, enrollment_year, status, created_at, updated_at
            FROM students
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_student).collect()
    }

    /// List active students ordered by name
    async fn list_active_students(&self) -> Result<Vec<Student>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, monthly_fee, due_day, enrollment_month, enrollment_year, status, created_at, updated_at
            FROM students
            WHERE status = ?
            ORDER BY name ASC
            "#,
        )
        .bind(StudentStatus::Active.as_str())
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_student).collect()
    }

    /// Update a student in the database
    async fn update_student(&self, student: &Student) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE students
            SET name = ?, monthly_fee = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&student.name)
        .bind(student.monthly_fee)
        .bind(student.status.as_str())
        .bind(&student.updated_at)
        .bind(&student.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Delete a student from the database
    async fn delete_student(&self, student_id: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM students WHERE id = ?
            "#,
        )
        .bind(student_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
