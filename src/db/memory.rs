//! In-process [`StudentStore`] used by unit tests.

use crate::db::{NewStudent, StoreError, Student, StudentStore};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

const EMAIL_CONSTRAINT: &str = "students_email_key";

#[derive(Default)]
struct Table {
    rows: Vec<Student>,
    next_id: i32,
}

/// Mirrors the PostgreSQL table semantics: serial ids, unique emails and an
/// `updated_at` that strictly advances on every update.
#[derive(Default)]
pub struct InMemoryStudentStore {
    table: Mutex<Table>,
    schema_runs: AtomicUsize,
    schema_failures: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of schema bootstrap attempts, failed ones included.
    pub fn schema_runs(&self) -> usize {
        self.schema_runs.load(Ordering::SeqCst)
    }

    /// Makes the next `count` bootstrap attempts fail as unreachable.
    pub fn fail_next_schema_runs(&self, count: usize) {
        self.schema_failures.store(count, Ordering::SeqCst);
    }

    /// Makes every data statement fail as unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn count_with_email(&self, email: &str) -> usize {
        self.table
            .lock()
            .rows
            .iter()
            .filter(|s| s.email == email)
            .count()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

fn duplicate_email() -> StoreError {
    StoreError::UniqueViolation {
        constraint: EMAIL_CONSTRAINT.to_string(),
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn initialize_schema(&self) -> Result<(), StoreError> {
        self.schema_runs.fetch_add(1, Ordering::SeqCst);
        let failed = self
            .schema_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        self.check_available()?;
        let mut rows = self.table.lock().rows.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn insert(&self, student: &NewStudent) -> Result<Student, StoreError> {
        self.check_available()?;
        let mut table = self.table.lock();
        if table.rows.iter().any(|s| s.email == student.email) {
            return Err(duplicate_email());
        }

        table.next_id += 1;
        let now = Utc::now();
        let row = Student {
            id: table.next_id,
            name: student.name.clone(),
            age: student.age,
            email: student.email.clone(),
            phone: student.phone.clone(),
            address: student.address.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, student: &NewStudent) -> Result<Option<Student>, StoreError> {
        self.check_available()?;
        let mut table = self.table.lock();
        let Some(index) = table.rows.iter().position(|s| s.id == id) else {
            return Ok(None);
        };
        if table
            .rows
            .iter()
            .any(|s| s.id != id && s.email == student.email)
        {
            return Err(duplicate_email());
        }

        let row = &mut table.rows[index];
        row.name = student.name.clone();
        row.age = student.age;
        row.email = student.email.clone();
        row.phone = student.phone.clone();
        row.address = student.address.clone();
        row.updated_at = Utc::now().max(row.updated_at + Duration::microseconds(1));
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut table = self.table.lock();
        let before = table.rows.len();
        table.rows.retain(|s| s.id != id);
        Ok(table.rows.len() != before)
    }
}
