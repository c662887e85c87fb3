//! Prometheus metrics infrastructure for the SchoolFinder service.
//!
//! This module provides:
//! - [`MetricsConfig`]: Configuration for the metrics system
//! - [`init_metrics`]: Initialize the Prometheus metrics recorder
//! - [`metrics_handler`]: Axum handler for the metrics endpoint
//! - Business metric helpers for the school endpoints
//!
//! # Example
//!
//! ```no_run
//! use schoolfinder_service_shared::metrics::{MetricsConfig, init_metrics, metrics_handler};
//! use axum::{Router, routing::get};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new()
//!     .route(&config.path, get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::request::Endpoint;

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Configuration for the metrics system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Whether metrics collection is enabled.
    pub enabled: bool,
    /// Path for the metrics endpoint (e.g., "/metrics").
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
        }
    }
}

impl MetricsConfig {
    /// Create configuration from environment variables.
    ///
    /// - `METRICS_ENABLED`: "true" or "false" (default: true)
    /// - `METRICS_PATH`: Path for metrics endpoint (default: "/metrics")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| v.trim().to_lowercase() != "false")
            .unwrap_or(true);

        let path = lookup("METRICS_PATH")
            .filter(|p| p.starts_with('/'))
            .unwrap_or_else(|| "/metrics".to_string());

        Self { enabled, path }
    }
}

/// Initialize the Prometheus metrics recorder.
///
/// This must be called once at application startup before any metrics are recorded.
/// Subsequent calls will return an error.
///
/// # Errors
///
/// Returns an error if:
/// - Metrics are disabled in configuration
/// - The recorder has already been installed
/// - The Prometheus builder fails to install
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)?;

    Ok(())
}

/// Axum handler for the metrics endpoint.
///
/// Returns Prometheus exposition format text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone)]
pub enum MetricsError {
    /// Metrics are disabled in configuration.
    Disabled,
    /// The recorder has already been installed.
    AlreadyInitialized,
    /// The Prometheus builder failed to install.
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Business Metrics Helpers
// =============================================================================

/// Record a school stored through the add endpoint.
///
/// Increments the `schoolfinder_schools_added_total` counter.
pub fn record_school_added() {
    metrics::counter!("schoolfinder_schools_added_total").increment(1);
}

/// Record a request rejected before reaching the store.
///
/// Increments the `schoolfinder_requests_rejected_total` counter.
///
/// # Arguments
///
/// * `reason` - Short label, e.g. "validation_error" or "malformed_body"
/// * `endpoint` - The endpoint that rejected the request
pub fn record_request_rejected(reason: &str, endpoint: Endpoint) {
    metrics::counter!(
        "schoolfinder_requests_rejected_total",
        "reason" => reason.to_string(),
        "endpoint" => endpoint.as_str()
    )
    .increment(1);
}

/// Record a storage failure surfaced as a server error.
///
/// Increments the `schoolfinder_storage_errors_total` counter.
pub fn record_storage_error(endpoint: Endpoint) {
    metrics::counter!(
        "schoolfinder_storage_errors_total",
        "endpoint" => endpoint.as_str()
    )
    .increment(1);
}

/// Record how many schools a list request ranked.
///
/// Records to the `schoolfinder_schools_ranked` histogram.
pub fn record_schools_ranked(count: usize) {
    metrics::histogram!("schoolfinder_schools_ranked").record(count as f64);
}
