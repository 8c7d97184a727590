//! HTTP client library for the Student Roster API.
//!
//! This crate provides a typed HTTP client for the student roster backend.
//! It covers the health check and every student endpoint.
//!
//! # Example
//!
//! ```no_run
//! use roster_client::{ClientConfig, StudentInput, StudentsClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), roster_client::Error> {
//!     let client = StudentsClient::new(ClientConfig {
//!         base_url: "http://localhost:8080".into(),
//!         timeout: Duration::from_secs(30),
//!     })?;
//!
//!     let student = client
//!         .create_student(&StudentInput::new("张三", 20, "zhangsan@example.com"))
//!         .await?;
//!     println!("Created student {}", student.id);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{ClientConfig, StudentsClient};
pub use error::Error;
pub use types::*;
