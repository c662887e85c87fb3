//! Shared infrastructure for the SchoolFinder HTTP service.
//!
//! This crate provides the HTTP glue around `schoolfinder-lib`:
//!
//! - [`AppState`]: the injected school store, shared by all handlers
//! - [`health`]: liveness/readiness handlers
//! - [`ApiError`]: JSON error bodies with stable `message` values
//! - [`ServiceResponse`]: success payloads paired with their status
//! - [`config`]: environment-driven service configuration
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request ID and metrics middleware
//! - Request types with validation for each endpoint
//!
//! # Architecture
//!
//! The service follows a thin-handler pattern where all business logic resides
//! in `schoolfinder-lib`. This crate provides only HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON / query string                        │
//! │  - Validate into library types                              │
//! │  - Call schoolfinder-lib on the blocking pool               │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides in-memory and failing state for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod config;
mod error;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ConfigError, ServiceConfig};
pub use error::{
    ApiError, MESSAGE_INVALID_COORDINATES, MESSAGE_INVALID_INPUT, MESSAGE_SERVER_ERROR,
};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_request_rejected, record_school_added,
    record_schools_ranked, record_storage_error, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, RequestId, RequestTrackingLayer};
pub use request::{AddSchoolRequest, CoordinateInput, Endpoint, ListSchoolsQuery, Validate};
pub use response::{AddSchoolResponse, ServiceResponse, MESSAGE_SCHOOL_ADDED};
pub use state::{AppState, AppStateError, IN_MEMORY_DATABASE};
