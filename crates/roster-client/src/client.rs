//! HTTP client for the roster API.

use crate::error::Error;
use crate::types::*;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;


/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8080").
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the Student Roster API.
#[derive(Debug, Clone)]
pub struct StudentsClient {
    client: Client,
    base_url: String,
}

impl StudentsClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Url::parse(&config.base_url)?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn students_url(&self) -> String {
        format!("{}/students", self.base_url)
    }

    fn student_url(&self, id: i32) -> String {
        format!("{}/students/{}", self.base_url, id)
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Performs a health check.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn health_check(&self) -> Result<HealthResponse, Error> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Students
    // ========================================================================

    /// Lists all students, newest first.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn list_students(&self) -> Result<Vec<Student>, Error> {
        let resp = self.client.get(self.students_url()).send().await?;
        self.handle_response(resp).await
    }

    /// Creates a student.
    ///
    /// # Errors
    /// Returns error if the request fails or the API rejects the input.
    pub async fn create_student(&self, input: &StudentInput) -> Result<Student, Error> {
        let resp = self
            .client
            .post(self.students_url())
            .json(input)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Replaces every mutable field of a student.
    ///
    /// # Errors
    /// Returns error if the request fails, the student does not exist, or the
    /// API rejects the input.
    pub async fn update_student(&self, id: i32, input: &StudentInput) -> Result<Student, Error> {
        let resp = self
            .client
            .put(self.student_url(id))
            .json(input)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    /// Deletes a student.
    ///
    /// # Errors
    /// Returns error if the request fails or the student does not exist.
    pub async fn delete_student(&self, id: i32) -> Result<DeleteStudentResponse, Error> {
        let resp = self.client.delete(self.student_url(id)).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let text = resp.text().await.unwrap_or_default();
        Err(error_from_body(status, &text))
    }
}

/// Builds a client error from a non-success status and its body.
fn error_from_body(status: StatusCode, text: &str) -> Error {
    let body: Option<ErrorBody> = serde_json::from_str(text).ok();

    if status == StatusCode::NOT_FOUND {
        let message = body.map_or_else(|| text.to_string(), |b| b.error);
        return Error::NotFound(message);
    }

    match body {
        Some(body) => Error::Api {
            status: status.as_u16(),
            code: body.code,
            message: body.error,
        },
        None => Error::Api {
            status: status.as_u16(),
            code: None,
            message: text.to_string(),
        },
    }
}
