//! Request and response types for the roster API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// A stored student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Server-assigned identifier.
    pub id: i32,
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Unique contact email.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or replacing a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInput {
    /// Full name.
    pub name: String,
    /// Age in years.
    pub age: i32,
    /// Contact email.
    pub email: String,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl StudentInput {
    /// Creates an input with the required fields only.
    #[must_use]
    pub fn new(name: impl Into<String>, age: i32, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
            phone: None,
            address: None,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

impl From<&Student> for StudentInput {
    fn from(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            age: student.age,
            email: student.email.clone(),
            phone: student.phone.clone(),
            address: student.address.clone(),
        }
    }
}

/// Confirmation returned by a delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteStudentResponse {
    /// Confirmation message.
    pub message: String,
    /// Identifier of the removed student.
    pub id: i32,
}

/// Error body returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message.
    pub error: String,
    /// Machine-readable error code.
    pub code: Option<String>,
    /// Diagnostic detail.
    pub details: Option<String>,
}
