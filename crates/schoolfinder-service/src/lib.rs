//! SchoolFinder HTTP service: router and request handlers.
//!
//! # Endpoints
//!
//! - `POST /api/schools` - Register a school
//! - `GET /api/schools?latitude=..&longitude=..` - List schools nearest first
//! - `GET /` - Plain-text liveness banner
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe (one store round-trip)
//! - `GET /metrics` - Prometheus metrics endpoint (path configurable)

#![deny(warnings)]

use std::path::Path;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use schoolfinder_lib::{register_school, schools_near, Error as LibError, RankedSchool};
use schoolfinder_service_shared::{
    health_live, health_ready, init_metrics, metrics_handler, record_request_rejected,
    record_school_added, record_schools_ranked, record_storage_error, AddSchoolRequest,
    AddSchoolResponse, ApiError, AppState, Endpoint, ListSchoolsQuery, MetricsConfig,
    MetricsError, RequestId, RequestTrackingLayer, ServiceResponse, Validate,
};

/// Body of `GET /`.
pub const ROOT_MESSAGE: &str = "School Management API is running";

/// Seed the process environment from the `.env` file at `path`.
///
/// Variables that are already set keep their values. Returns `Ok(false)` when
/// the file does not exist.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<bool, dotenvy::Error> {
    match dotenvy::from_path(path.as_ref()) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

/// Install the Prometheus recorder, returning whether one is live.
///
/// Metrics switched off through configuration are logged at `info`; only a
/// failed install is a warning.
pub fn install_metrics(config: &MetricsConfig) -> bool {
    match init_metrics(config) {
        Ok(()) => {
            info!(path = %config.path, "metrics recorder installed");
            true
        }
        Err(MetricsError::Disabled) => {
            info!("metrics disabled by configuration");
            false
        }
        Err(e) => {
            warn!(error = %e, "metrics unavailable, continuing without them");
            false
        }
    }
}

/// Build the service router around `state`.
///
/// The metrics route is only mounted when metrics are enabled.
pub fn app(state: AppState, metrics: &MetricsConfig) -> Router {
    let mut router = Router::new()
        .route("/", get(root_handler))
        .route(
            "/api/schools",
            get(list_schools_handler).post(add_school_handler),
        )
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready));

    if metrics.enabled {
        router = router.route(&metrics.path, get(metrics_handler));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(RequestTrackingLayer)
        .with_state(state)
}

async fn root_handler() -> &'static str {
    ROOT_MESSAGE
}

/// Handle `POST /api/schools`.
async fn add_school_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<AddSchoolRequest>, JsonRejection>,
) -> Result<ServiceResponse<AddSchoolResponse>, ApiError> {
    let endpoint = Endpoint::AddSchool;

    let Json(request) = payload.map_err(|rejection| {
        warn!(
            request_id = %request_id,
            error = %rejection.body_text(),
            "rejected malformed add-school body"
        );
        record_request_rejected("malformed_body", endpoint);
        endpoint.rejection(rejection.body_text(), request_id.as_str())
    })?;

    let school = request.validate(request_id.as_str()).map_err(|problem| {
        info!(
            request_id = %request_id,
            detail = problem.detail.as_deref().unwrap_or(""),
            "rejected invalid school"
        );
        record_request_rejected("validation_error", endpoint);
        *problem
    })?;

    info!(
        request_id = %request_id,
        name = %school.name(),
        latitude = school.location().latitude(),
        longitude = school.location().longitude(),
        "adding school"
    );

    let id = state
        .with_store(move |store| register_school(store, &school))
        .await
        .map_err(|e| storage_failure(&e, endpoint, &request_id))?;

    record_school_added();
    info!(request_id = %request_id, id, "school added");

    Ok(ServiceResponse::created(AddSchoolResponse::new(id)))
}

/// Handle `GET /api/schools`.
async fn list_schools_handler(
    State(state): State<AppState>,
    request_id: RequestId,
    query: Result<Query<ListSchoolsQuery>, QueryRejection>,
) -> Result<ServiceResponse<Vec<RankedSchool>>, ApiError> {
    let endpoint = Endpoint::ListSchools;

    let Query(query) = query.map_err(|rejection| {
        warn!(
            request_id = %request_id,
            error = %rejection.body_text(),
            "rejected malformed list-schools query"
        );
        record_request_rejected("malformed_query", endpoint);
        endpoint.rejection(rejection.body_text(), request_id.as_str())
    })?;

    let origin = query.validate(request_id.as_str()).map_err(|problem| {
        info!(
            request_id = %request_id,
            detail = problem.detail.as_deref().unwrap_or(""),
            "rejected invalid coordinates"
        );
        record_request_rejected("validation_error", endpoint);
        *problem
    })?;

    let ranked = state
        .with_store(move |store| schools_near(store, origin))
        .await
        .map_err(|e| storage_failure(&e, endpoint, &request_id))?;

    record_schools_ranked(ranked.len());
    info!(
        request_id = %request_id,
        latitude = origin.latitude(),
        longitude = origin.longitude(),
        count = ranked.len(),
        "schools listed"
    );

    Ok(ServiceResponse::ok(ranked))
}

fn storage_failure(error: &LibError, endpoint: Endpoint, request_id: &RequestId) -> ApiError {
    error!(
        request_id = %request_id,
        endpoint = endpoint.as_str(),
        error = %error,
        "store operation failed"
    );
    record_storage_error(endpoint);
    ApiError::from_lib_error(error, endpoint, request_id.as_str())
}
