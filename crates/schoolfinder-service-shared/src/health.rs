//! Health check handlers for liveness and readiness probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses. Readiness performs one store round-trip.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// RFC 3339 timestamp of the check.
    pub checked_at: String,

    /// Number of schools in the store (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schools_stored: Option<usize>,
}

impl HealthStatus {
    fn base(status: String, service: &str, version: &str) -> Self {
        Self {
            status,
            service: service.to_string(),
            version: version.to_string(),
            checked_at: chrono::Utc::now().to_rfc3339(),
            schools_stored: None,
        }
    }

    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self::base("ok".to_string(), service, version)
    }

    /// Create a ready status with the stored school count.
    pub fn ready(service: &str, version: &str, schools: usize) -> Self {
        Self {
            schools_stored: Some(schools),
            ..Self::base("ok".to_string(), service, version)
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self::base(format!("not_ready: {}", reason), service, version)
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK if the service is running. This is a simple check that does
/// not touch the store.
///
/// # Example
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"schoolfinder-service-shared","version":"0.1.0","checked_at":"..."}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 OK if the store answers a count query, 503 otherwise.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match state.with_store(|store| store.count_schools()).await {
        Ok(count) => {
            let status = HealthStatus::ready(service, version, count);
            (StatusCode::OK, Json(status)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            let status = HealthStatus::not_ready(service, version, "store unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
    }
}
