//! Student persistence port and its PostgreSQL adapter.

use crate::db::{
    ACQUIRE_SCHEMA_LOCK, DatabasePool, NewStudent, SCHEMA_LOCK_KEY, SCHEMA_STATEMENTS, StoreError,
    Student,
};
use async_trait::async_trait;

/// Persistence operations over the student roster.
///
/// Each call issues a single statement (the schema bootstrap runs its
/// statements inside one transaction) on a connection borrowed for the
/// duration of the call.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Creates the table, trigger function and trigger when absent.
    async fn initialize_schema(&self) -> Result<(), StoreError>;

    /// Returns every student, most recently created first.
    async fn list(&self) -> Result<Vec<Student>, StoreError>;

    /// Inserts a student and returns the stored row.
    async fn insert(&self, student: &NewStudent) -> Result<Student, StoreError>;

    /// Replaces every mutable column of the student with `id`.
    ///
    /// Returns `None` when no row has that id.
    async fn update(&self, id: i32, student: &NewStudent) -> Result<Option<Student>, StoreError>;

    /// Deletes the student with `id`, returning whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}

/// [`StudentStore`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStudentStore {
    db: DatabasePool,
}

impl PgStudentStore {
    /// Wraps a database pool.
    #[must_use]
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn initialize_schema(&self) -> Result<(), StoreError> {
        // Rolled back on drop if any statement fails.
        let mut tx = self.db.pool().begin().await?;
        sqlx::query(ACQUIRE_SCHEMA_LOCK)
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;
        for statement in SCHEMA_STATEMENTS {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, name, age, email, phone, address, created_at, updated_at
            FROM students
            ORDER BY id DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(students)
    }

    async fn insert(&self, student: &NewStudent) -> Result<Student, StoreError> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (name, age, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, age, email, phone, address, created_at, updated_at
            "#,
        )
        .bind(&student.name)
        .bind(student.age)
        .bind(&student.email)
        .bind(&student.phone)
        .bind(&student.address)
        .fetch_one(self.db.pool())
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i32, student: &NewStudent) -> Result<Option<Student>, StoreError> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET name = $1, age = $2, email = $3, phone = $4, address = $5
            WHERE id = $6
            RETURNING id, name, age, email, phone, address, created_at, updated_at
            "#,
        )
        .bind(&student.name)
        .bind(student.age)
        .bind(&student.email)
        .bind(&student.phone)
        .bind(&student.address)
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let deleted: Option<(i32,)> =
            sqlx::query_as("DELETE FROM students WHERE id = $1 RETURNING id")
                .bind(id)
                .fetch_optional(self.db.pool())
                .await?;

        Ok(deleted.is_some())
    }
}
