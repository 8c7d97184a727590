//! # Student Roster Backend - REST API Server
//!
//! A REST API backend for managing a roster of students stored in
//! PostgreSQL. Built with [Axum](https://crates.io/crates/axum) for async
//! HTTP handling and [sqlx](https://crates.io/crates/sqlx) for database
//! access, with OpenAPI/Swagger documentation via
//! [utoipa](https://crates.io/crates/utoipa).
//!
//! ## Key Features
//!
//! - **CRUD API**: List, create, replace and delete students.
//!
//! - **Lazy Schema Bootstrap**: The `students` table and its `updated_at`
//!   trigger are created on the first request, idempotently, and retried on
//!   later requests if the first attempt fails.
//!
//! - **Validation Before Persistence**: Malformed payloads are rejected
//!   without a database round-trip.
//!
//! - **Structured Errors**: Database failures are classified (duplicate
//!   email, unreachable database, other) into stable JSON error bodies.
//!
//! - **OpenAPI Documentation**: Swagger UI at `/swagger-ui/`.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers and router configuration |
//! | [`config`] | TOML and environment configuration |
//! | [`db`] | Connection pool, schema bootstrap and student store |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`models`] | Request/response DTOs with OpenAPI schemas |
//! | [`state`] | Application state management |
//! | [`validation`] | Payload checks for creates and updates |
//!
//! ## API Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/students` | List all students, newest first |
//! | POST | `/students` | Create a student (201) |
//! | PUT | `/students/{id}` | Replace a student's fields |
//! | DELETE | `/students/{id}` | Delete a student |
//!
//! ## Error Codes
//!
//! | Status | Code | Cause |
//! |--------|------|-------|
//! | 400 | `INVALID_INPUT` | Missing name/age/email, bad age, malformed body or id |
//! | 400 | `DUPLICATE_EMAIL` | Email already used by another student |
//! | 404 | `NOT_FOUND` | No student with that id |
//! | 500 | `CONNECTION_UNAVAILABLE` | PostgreSQL unreachable |
//! | 500 | `SCHEMA_INIT_FAILED` | Table/trigger bootstrap failed |
//! | 500 | `PERSISTENCE_ERROR` | Any other database failure |
//!
//! ## Example Usage
//!
//! ```bash
//! # Development mode against a local PostgreSQL
//! cargo run
//!
//! # Custom database
//! DB_HOST=db.internal DB_USER=roster DB_PASSWORD=secret DB_NAME=school cargo run
//!
//! # Create a student
//! curl -X POST http://localhost:8080/students \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "张三", "age": 20, "email": "zhangsan@example.com"}'
//!
//! # Replace it
//! curl -X PUT http://localhost:8080/students/1 \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "张三", "age": 21, "email": "zhangsan@example.com", "phone": "13800000000"}'
//!
//! # Delete it
//! curl -X DELETE http://localhost:8080/students/1
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod state;
pub mod validation;
