//! Student table definition, row types and the lazy schema bootstrap.

use crate::db::{StoreError, StudentStore};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::info;
use utoipa::ToSchema;

/// Creates the `students` table when it does not exist yet.
pub const CREATE_STUDENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS students (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    age INTEGER NOT NULL,
    email VARCHAR(100) NOT NULL UNIQUE,
    phone VARCHAR(20),
    address TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

/// Trigger function stamping `updated_at` on every row update.
pub const CREATE_UPDATED_AT_FUNCTION: &str = r#"
CREATE OR REPLACE FUNCTION update_updated_at_column()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = CURRENT_TIMESTAMP;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql
"#;

/// Attaches the `updated_at` trigger to `students`.
pub const CREATE_UPDATED_AT_TRIGGER: &str = r#"
CREATE OR REPLACE TRIGGER update_students_updated_at
BEFORE UPDATE ON students
FOR EACH ROW
EXECUTE FUNCTION update_updated_at_column()
"#;

/// Advisory lock key serializing concurrent bootstraps across processes.
pub const SCHEMA_LOCK_KEY: i64 = 0x5354_5544_454e_5453;

/// Taken first inside the bootstrap transaction; released at commit or
/// rollback. Without it, racing `CREATE TABLE IF NOT EXISTS` statements on a
/// fresh database collide in the catalog with a unique violation.
pub const ACQUIRE_SCHEMA_LOCK: &str = "SELECT pg_advisory_xact_lock($1)";

/// Bootstrap statements, in execution order. Each one is idempotent.
pub const SCHEMA_STATEMENTS: [&str; 3] = [
    CREATE_STUDENTS_TABLE,
    CREATE_UPDATED_AT_FUNCTION,
    CREATE_UPDATED_AT_TRIGGER,
];

/// Student record as stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    /// Server-assigned identifier.
    pub id: i32,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Unique contact email.
    pub email: String,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
    /// Row creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated column values for an insert or a wholesale update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    /// Full name, never empty.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Contact email, never empty.
    pub email: String,
    /// Phone number; `None` is stored as NULL.
    pub phone: Option<String>,
    /// Postal address; `None` is stored as NULL.
    pub address: Option<String>,
}

/// Whether the bootstrap statements have completed in this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// No successful bootstrap yet; the next request runs it.
    Uninitialized,
    /// Bootstrap succeeded; never re-run for the life of the process.
    Initialized,
}

/// Runs the schema bootstrap once per process.
///
/// The state is only read and written around the bootstrap, never held
/// across it: concurrent first requests may all run the bootstrap. The store
/// serializes those runs and every statement is create-if-absent or
/// create-or-replace, so later runs are no-ops. A failed bootstrap leaves the state `Uninitialized`
/// so the next request retries.
#[derive(Debug)]
pub struct SchemaInitializer {
    state: RwLock<SchemaState>,
}

impl SchemaInitializer {
    /// Creates an initializer in the `Uninitialized` state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SchemaState::Uninitialized),
        }
    }

    /// Current bootstrap state.
    #[must_use]
    pub fn state(&self) -> SchemaState {
        *self.state.read()
    }

    /// Ensures the schema exists, bootstrapping through `store` on first use.
    ///
    /// # Errors
    /// Returns the store error when the bootstrap statements fail.
    pub async fn ensure(&self, store: &dyn StudentStore) -> Result<(), StoreError> {
        if self.state() == SchemaState::Initialized {
            return Ok(());
        }

        store.initialize_schema().await?;
        *self.state.write() = SchemaState::Initialized;
        info!("Student schema initialized");
        Ok(())
    }
}

impl Default for SchemaInitializer {
    fn default() -> Self {
        Self::new()
    }
}
