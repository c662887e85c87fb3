//! Response wrapper for successful HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use schoolfinder_lib::SchoolId;

/// Confirmation message returned after a school is stored.
pub const MESSAGE_SCHOOL_ADDED: &str = "School added successfully";

/// Wrapper pairing a JSON payload with its success status.
///
/// The payload is serialized as-is, so arrays stay top-level arrays.
///
/// # Example
///
/// ```
/// use schoolfinder_service_shared::{AddSchoolResponse, ServiceResponse};
///
/// let response = ServiceResponse::created(AddSchoolResponse::new(42));
/// assert_eq!(response.status, axum::http::StatusCode::CREATED);
/// ```
#[derive(Debug, Clone)]
pub struct ServiceResponse<T> {
    /// HTTP status to send.
    pub status: StatusCode,

    /// The actual response payload.
    pub data: T,
}

impl<T> ServiceResponse<T> {
    /// 200 OK with the given payload.
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    /// 201 Created with the given payload.
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::ok(data)
    }
}

/// Implement IntoResponse for axum to return ServiceResponse as HTTP responses.
impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.data)).into_response()
    }
}

/// Body returned by `POST /api/schools`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddSchoolResponse {
    pub message: String,
    /// Identifier generated by the store.
    pub id: SchoolId,
}

impl AddSchoolResponse {
    pub fn new(id: SchoolId) -> Self {
        Self {
            message: MESSAGE_SCHOOL_ADDED.to_string(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_and_created_statuses() {
        assert_eq!(ServiceResponse::ok(1).status, StatusCode::OK);
        assert_eq!(ServiceResponse::created(1).status, StatusCode::CREATED);
    }

    #[test]
    fn test_response_from_trait() {
        let response: ServiceResponse<Vec<i32>> = vec![1, 2].into();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.data, vec![1, 2]);
    }

    #[test]
    fn test_into_response_uses_status() {
        let response = ServiceResponse::created(AddSchoolResponse::new(3)).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_add_school_response_serialization() {
        let json = serde_json::to_string(&AddSchoolResponse::new(7)).unwrap();
        assert_eq!(json, r#"{"message":"School added successfully","id":7}"#);
    }
}
