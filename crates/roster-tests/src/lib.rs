//! Integration tests for the Student Roster API.
//!
//! These tests require the API server and its PostgreSQL database to be
//! running, so they are ignored by default. Run them with
//! `cargo test -p roster-tests -- --ignored`. Configure the server URL via the
//! `API_BASE_URL` environment variable (default: `http://localhost:8080`).

use roster_client::{ClientConfig, StudentsClient};
use std::time::Duration;

/// Gets the API base URL from environment or uses default.
#[must_use]
pub fn get_api_url() -> String {
    std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Creates a test client configured for the API.
///
/// # Errors
/// Returns error if client creation fails.
pub fn create_test_client() -> Result<StudentsClient, roster_client::Error> {
    StudentsClient::new(ClientConfig {
        base_url: get_api_url(),
        timeout: Duration::from_secs(10),
    })
}

/// Generates an email no other test run has used.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("{}_{}_{}@example.com", prefix, ts, counter)
}
