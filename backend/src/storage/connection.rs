use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:tuition.db";

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Create students table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                monthly_fee REAL NOT NULL,
                due_day INTEGER NOT NULL,
                enrollment_month INTEGER NOT NULL,
                enrollment_year INTEGER NOT NULL,
                status TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for ordering students by name
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_students_name
            ON students(name);
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for filtering by status
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_students_status
            ON students(status);
            "#,
        )
        .execute(pool)
        .await?;

        // Create payments table. The composite primary key is what guarantees
        // at most one payment record per student per billing period; the
        // mark-paid upsert relies on it. There is deliberately no foreign key
        // to students: payment history survives a student deletion.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS payments (
                student_id TEXT NOT NULL,
                month INTEGER NOT NULL,
                year INTEGER NOT NULL,
                status TEXT NOT NULL,
                amount REAL NOT NULL,
                paid_at TEXT NOT NULL,
                PRIMARY KEY (student_id, month, year)
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for period lookups (statements and summaries)
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_payments_period
            ON payments(year, month);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
