//! Request and response models for the REST API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Body of a create or update request.
///
/// Every field is optional at the wire level so that missing values are
/// reported as validation errors rather than as decoding failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct StudentPayload {
    /// Full name (required, non-empty).
    #[schema(example = "张三")]
    pub name: Option<String>,
    /// Age in years (required). Accepts a number or a numeric string.
    #[schema(value_type = i32, example = 20)]
    pub age: Option<Value>,
    /// Contact email (required, unique).
    #[schema(example = "zhangsan@example.com")]
    pub email: Option<String>,
    /// Phone number. Empty strings are stored as null.
    pub phone: Option<String>,
    /// Postal address. Empty strings are stored as null.
    pub address: Option<String>,
}

/// Confirmation returned after a delete.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteStudentResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// Identifier of the removed student.
    pub id: i32,
}
