//! JSON error bodies for the HTTP API.
//!
//! Every error response carries a fixed `message` per failure class, so
//! clients can branch on it, plus optional `detail` and `instance` fields for
//! humans and log correlation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use schoolfinder_lib::Error as LibError;

use crate::request::Endpoint;

/// Message for a rejected add-school body.
pub const MESSAGE_INVALID_INPUT: &str = "Invalid input data";

/// Message for rejected list-schools query coordinates.
pub const MESSAGE_INVALID_COORDINATES: &str = "Invalid coordinates";

/// Message for any storage or internal failure.
pub const MESSAGE_SERVER_ERROR: &str = "Server error";

/// Error response body.
///
/// # Example
///
/// ```
/// use schoolfinder_service_shared::ApiError;
///
/// let error = ApiError::invalid_input("The 'name' field is required", "req-12345");
/// assert_eq!(error.message, "Invalid input data");
/// assert_eq!(error.status(), axum::http::StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable, client-facing summary of the failure class.
    pub message: String,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request identifier for correlating with server logs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    #[serde(skip)]
    status: u16,
}

impl ApiError {
    /// Create an error with the given status and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
            instance: None,
            status: status.as_u16(),
        }
    }

    /// Add a detailed explanation of this specific occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// HTTP status this error is sent with.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// 400 for a malformed add-school body.
    pub fn invalid_input(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, MESSAGE_INVALID_INPUT)
            .with_detail(detail)
            .with_request_id(request_id)
    }

    /// 400 for unusable list-schools query coordinates.
    pub fn invalid_coordinates(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, MESSAGE_INVALID_COORDINATES)
            .with_detail(detail)
            .with_request_id(request_id)
    }

    /// 500 for storage failures. The underlying cause is logged, not returned.
    pub fn server_error(request_id: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, MESSAGE_SERVER_ERROR)
            .with_request_id(request_id)
    }

    /// Map a library error raised while serving `endpoint`.
    pub fn from_lib_error(error: &LibError, endpoint: Endpoint, request_id: &str) -> Self {
        if !error.is_validation() {
            return Self::server_error(request_id);
        }
        endpoint.rejection(error.to_string(), request_id)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.message, detail),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input() {
        let error = ApiError::invalid_input("Missing 'name'", "req-123");
        assert_eq!(error.message, MESSAGE_INVALID_INPUT);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.detail.as_deref(), Some("Missing 'name'"));
        assert_eq!(error.instance.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_invalid_coordinates() {
        let error = ApiError::invalid_coordinates("bad latitude", "req-1");
        assert_eq!(error.message, MESSAGE_INVALID_COORDINATES);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_error_has_no_detail() {
        let error = ApiError::server_error("req-500");
        assert_eq!(error.message, MESSAGE_SERVER_ERROR);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.detail.is_none());
    }

    #[test]
    fn test_serialization_omits_status_and_empty_fields() {
        let error = ApiError::new(StatusCode::BAD_REQUEST, MESSAGE_INVALID_INPUT);
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, r#"{"message":"Invalid input data"}"#);
    }

    #[test]
    fn test_from_lib_validation_error_depends_on_endpoint() {
        let error = schoolfinder_lib::Coordinates::new(100.0, 0.0).unwrap_err();

        let add = ApiError::from_lib_error(&error, Endpoint::AddSchool, "req-a");
        assert_eq!(add.message, MESSAGE_INVALID_INPUT);
        assert!(add.detail.as_deref().unwrap().contains("latitude"));

        let list = ApiError::from_lib_error(&error, Endpoint::ListSchools, "req-l");
        assert_eq!(list.message, MESSAGE_INVALID_COORDINATES);
    }

    #[test]
    fn test_from_lib_storage_error_hides_cause() {
        let error = LibError::StorageUnavailable("disk on fire".to_string());
        let api = ApiError::from_lib_error(&error, Endpoint::ListSchools, "req-s");
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, MESSAGE_SERVER_ERROR);
        assert!(!api.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::invalid_input("x", "req").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }
}
