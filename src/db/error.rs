//! Persistence error classification.

use thiserror::Error;

/// SQLSTATE raised by PostgreSQL for unique constraint violations.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Errors raised by a [`StudentStore`](crate::db::StudentStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Name of the violated constraint.
        constraint: String,
    },

    /// The database could not be reached.
    #[error("database unavailable: {0}")]
    Unavailable(String),

    /// Any other failure reported by the driver or the server.
    #[error("{message}")]
    Query {
        /// Driver or server message.
        message: String,
        /// SQLSTATE, when the server reported one.
        code: Option<String>,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db)
                if db.is_unique_violation() || db.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                StoreError::UniqueViolation {
                    constraint: db.constraint().unwrap_or("unknown").to_string(),
                }
            }
            sqlx::Error::Database(db) => StoreError::Query {
                message: db.message().to_string(),
                code: db.code().map(|c| c.into_owned()),
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => StoreError::Unavailable(err.to_string()),
            _ => StoreError::Query {
                message: err.to_string(),
                code: None,
            },
        }
    }
}
