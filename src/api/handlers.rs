//! API request handlers.
//!
//! Every student handler walks the same stages: ensure the schema, validate
//! the payload, issue one statement, shape the response. The first failing
//! stage short-circuits into an [`ApiError`].

use crate::db::Student;
use crate::error::{ApiError, ErrorResponse};
use crate::models::{DeleteStudentResponse, HealthResponse, StudentPayload};
use crate::state::AppState;
use crate::validation::{WriteMode, validate_for_write};
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Unwraps a JSON body, reporting malformed input as a validation failure.
fn json_body(
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<StudentPayload, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::InvalidInput(rejection.body_text())
    })
}

/// Unwraps the `{id}` path segment.
fn student_id(id: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    id.map(|Path(id)| id).map_err(|rejection| {
        warn!("Rejected student id: {}", rejection.body_text());
        ApiError::InvalidInput(rejection.body_text())
    })
}

/// Logs a store failure with full diagnostics, then maps it for the caller.
fn store_failure(operation: &'static str, err: crate::db::StoreError) -> ApiError {
    error!("Failed to {}: {:?}", operation, err);
    ApiError::from_store(operation, err)
}

// ============================================================================
// Health Check
// ============================================================================

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Students
// ============================================================================

/// List all students, most recently created first.
#[utoipa::path(
    get,
    path = "/students",
    responses(
        (status = 200, description = "All students", body = Vec<Student>),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn list_students(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Student>>, ApiError> {
    state.ensure_schema().await?;

    let students = state
        .store
        .list()
        .await
        .map_err(|e| store_failure("list students", e))?;

    Ok(Json(students))
}

/// Create a student.
#[utoipa::path(
    post,
    path = "/students",
    request_body = StudentPayload,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Missing or invalid field, or duplicate email", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn create_student(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    state.ensure_schema().await?;

    let payload = json_body(payload)?;
    let record = validate_for_write(&payload, WriteMode::Create).inspect_err(|e| {
        warn!("Rejected student create: {}", e);
    })?;

    let student = state
        .store
        .insert(&record)
        .await
        .map_err(|e| store_failure("create student", e))?;

    info!("Created student {} <{}>", student.id, student.email);
    Ok((StatusCode::CREATED, Json(student)))
}

/// Replace every mutable field of a student.
#[utoipa::path(
    put,
    path = "/students/{id}",
    params(
        ("id" = i32, Path, description = "Student identifier")
    ),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Missing field or duplicate email", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn update_student(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<Json<Student>, ApiError> {
    state.ensure_schema().await?;

    let id = student_id(id)?;
    let payload = json_body(payload)?;
    let record = validate_for_write(&payload, WriteMode::Update).inspect_err(|e| {
        warn!("Rejected update of student {}: {}", id, e);
    })?;

    let student = state
        .store
        .update(id, &record)
        .await
        .map_err(|e| store_failure("update student", e))?
        .ok_or(ApiError::NotFound(id))?;

    info!("Updated student {}", student.id);
    Ok(Json(student))
}

/// Delete a student.
#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(
        ("id" = i32, Path, description = "Student identifier")
    ),
    responses(
        (status = 200, description = "Student deleted", body = DeleteStudentResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Database failure", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn delete_student(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeleteStudentResponse>, ApiError> {
    state.ensure_schema().await?;

    let id = student_id(id)?;
    let deleted = state
        .store
        .delete(id)
        .await
        .map_err(|e| store_failure("delete student", e))?;

    if !deleted {
        return Err(ApiError::NotFound(id));
    }

    info!("Deleted student {}", id);
    Ok(Json(DeleteStudentResponse {
        message: "Student deleted".to_string(),
        id,
    }))
}
