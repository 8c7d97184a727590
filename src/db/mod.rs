//! Database module for PostgreSQL connection and operations.

mod error;
#[cfg(test)]
mod memory;
mod pool;
mod schema;
mod store;

pub use error::{StoreError, UNIQUE_VIOLATION};
#[cfg(test)]
pub use memory::InMemoryStudentStore;
pub use pool::DatabasePool;
pub use schema::*;
pub use store::{PgStudentStore, StudentStore};
