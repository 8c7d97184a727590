//! Application state management.

use crate::db::{DatabasePool, PgStudentStore, SchemaInitializer, StudentStore};
use crate::error::ApiError;
use std::sync::Arc;
use tracing::error;

/// Application state shared across all handlers.
///
/// Holds no student data: every record lives in the store. The schema
/// initializer is the only process-wide mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Student persistence.
    pub store: Arc<dyn StudentStore>,
    /// Lazy schema bootstrap.
    pub schema: Arc<SchemaInitializer>,
}

impl AppState {
    /// Creates application state over an arbitrary store.
    #[must_use]
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self {
            store,
            schema: Arc::new(SchemaInitializer::new()),
        }
    }

    /// Creates application state backed by PostgreSQL.
    #[must_use]
    pub fn with_database(db: DatabasePool) -> Self {
        Self::new(Arc::new(PgStudentStore::new(db)))
    }

    /// Ensures the schema exists before a handler issues its first statement.
    ///
    /// # Errors
    /// Returns [`ApiError::SchemaInitFailed`] carrying the underlying cause.
    pub async fn ensure_schema(&self) -> Result<(), ApiError> {
        self.schema
            .ensure(self.store.as_ref())
            .await
            .map_err(|e| {
                error!("Schema initialization failed: {}", e);
                ApiError::SchemaInitFailed(e.to_string())
            })
    }
}
