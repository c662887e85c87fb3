//! HTTP middleware for the SchoolFinder service.
//!
//! This module provides:
//! - [`RequestId`]: correlation ID, usable directly as an axum extractor
//! - [`extract_or_generate_request_id`]: read `X-Request-ID` or generate a UUID v7
//! - [`RequestTrackingLayer`]: Tower middleware that assigns request IDs,
//!   opens a tracing span per request and records HTTP metrics
//!
//! # Request ID Propagation
//!
//! The layer takes `X-Request-ID` from the incoming request when present,
//! otherwise generates a UUID v7. The ID is stored in the request extensions
//! (where the [`RequestId`] extractor finds it), attached to the request span
//! and echoed back in the response `X-Request-ID` header.
//!
//! # Metrics Recording
//!
//! - `http_requests_total`: Counter by method, path, status bucket
//! - `http_request_duration_seconds`: Histogram by method, path
//! - `http_request_size_bytes`: Histogram by method, path
//! - `http_response_size_bytes`: Histogram by method, path
//!
//! The `path` label is the matched route template (`/api/schools`), or
//! `unmatched` for requests no route accepted.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::{FromRequestParts, MatchedPath};
use axum::http::{request::Parts, HeaderMap, HeaderName, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Newtype wrapper for request correlation IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new UUID v7 request ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the request ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Extract the request ID from headers or generate a new UUID v7.
///
/// Empty or non-UTF-8 header values are ignored.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RequestId::from)
        .unwrap_or_else(RequestId::generate)
}

/// Handlers take the ID assigned by [`RequestTrackingLayer`], falling back to
/// the headers when the layer is not installed.
impl<S: Send + Sync> FromRequestParts<S> for RequestId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| extract_or_generate_request_id(&parts.headers)))
    }
}

/// Metric label for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Route template used as the metric `path` label.
fn route_label<B>(req: &Request<B>) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

/// Groups status codes into buckets: "2xx", "3xx", "4xx", "5xx".
fn status_bucket(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

fn content_length(headers: &HeaderMap) -> Option<f64> {
    headers
        .get(http::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

// =============================================================================
// RequestTrackingLayer
// =============================================================================

/// Tower layer assigning request IDs and recording HTTP metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestTrackingLayer;

impl<S> Layer<S> for RequestTrackingLayer {
    type Service = RequestTracking<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestTracking { inner }
    }
}

/// Middleware service produced by [`RequestTrackingLayer`].
#[derive(Debug, Clone)]
pub struct RequestTracking<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestTracking<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: http_body::Body + Send + 'static,
    ResBody: http_body::Body + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = RequestTrackingFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();

        let method = req.method().to_string();
        let path = route_label(&req);

        if let Some(size) = content_length(req.headers()) {
            metrics::histogram!(
                "http_request_size_bytes",
                "method" => method.clone(),
                "path" => path.clone()
            )
            .record(size);
        }

        let request_id = extract_or_generate_request_id(req.headers());
        req.extensions_mut().insert(request_id.clone());

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %req.uri().path(),
        );

        {
            let _enter = span.enter();
            tracing::debug!("request received");
        }

        let future = self.inner.call(req);

        RequestTrackingFuture {
            inner: future,
            start,
            method,
            path,
            request_id,
            span,
        }
    }
}

pin_project! {
    /// Future wrapper that records metrics on completion.
    pub struct RequestTrackingFuture<F> {
        #[pin]
        inner: F,
        start: Instant,
        method: String,
        path: String,
        request_id: RequestId,
        span: Span,
    }
}

impl<F, ResBody, E> Future for RequestTrackingFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    ResBody: http_body::Body,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        let mut result = match this.inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(result) => result,
        };

        let duration_secs = this.start.elapsed().as_secs_f64();
        let latency_ms = duration_secs * 1000.0;

        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => this.method.clone(),
            "path" => this.path.clone()
        )
        .record(duration_secs);

        match &mut result {
            Ok(response) => {
                let status = response.status().as_u16();

                metrics::counter!(
                    "http_requests_total",
                    "method" => this.method.clone(),
                    "path" => this.path.clone(),
                    "status" => status_bucket(status)
                )
                .increment(1);

                if let Some(size) = content_length(response.headers()) {
                    metrics::histogram!(
                        "http_response_size_bytes",
                        "method" => this.method.clone(),
                        "path" => this.path.clone()
                    )
                    .record(size);
                }

                if let Ok(value) = HeaderValue::from_str(this.request_id.as_str()) {
                    response
                        .headers_mut()
                        .insert(REQUEST_ID_HEADER.clone(), value);
                }

                tracing::info!(status, latency_ms, "request completed");
            }
            Err(_) => {
                metrics::counter!(
                    "http_requests_total",
                    "method" => this.method.clone(),
                    "path" => this.path.clone(),
                    "status" => "5xx"
                )
                .increment(1);

                tracing::error!(latency_ms, "request failed");
            }
        }

        Poll::Ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    #[test]
    fn test_request_id_generate() {
        let id1 = RequestId::generate();
        let id2 = RequestId::generate();

        assert_ne!(id1, id2);
        assert_eq!(id1.as_str().len(), 36);
    }

    #[test]
    fn test_extract_request_id_from_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Request-ID", HeaderValue::from_static("test-123"));

        let id = extract_or_generate_request_id(&headers);
        assert_eq!(id.as_str(), "test-123");
    }

    #[test]
    fn test_extract_request_id_generates_when_blank() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("  "));

        let id = extract_or_generate_request_id(&headers);
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn test_path_label_uses_route_template() {
        async fn ok() -> &'static str {
            "ok"
        }

        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let app = Router::new()
            .route("/schools/{id}", get(ok))
            .layer(RequestTrackingLayer);

        metrics::with_local_recorder(&recorder, || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();
            for uri in ["/schools/42", "/schools/43", "/nope/123"] {
                let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
                runtime.block_on(app.clone().oneshot(request)).unwrap();
            }
        });

        let rendered = handle.render();
        assert!(rendered.contains(r#"path="/schools/{id}""#), "{rendered}");
        assert!(rendered.contains(r#"path="unmatched""#), "{rendered}");
        assert!(!rendered.contains("/schools/42"), "{rendered}");
        assert!(!rendered.contains("/nope/123"), "{rendered}");
    }

    #[test]
    fn test_status_bucket() {
        assert_eq!(status_bucket(200), "2xx");
        assert_eq!(status_bucket(201), "2xx");
        assert_eq!(status_bucket(301), "3xx");
        assert_eq!(status_bucket(400), "4xx");
        assert_eq!(status_bucket(500), "5xx");
        assert_eq!(status_bucket(99), "other");
    }

    async fn echo_id(id: RequestId) -> String {
        id.0
    }

    #[tokio::test]
    async fn test_layer_propagates_incoming_id() {
        let app = Router::new()
            .route("/", get(echo_id))
            .layer(RequestTrackingLayer);

        let request = Request::builder()
            .uri("/")
            .header("x-request-id", "abc-1")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-request-id"], "abc-1");
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"abc-1");
    }

    #[tokio::test]
    async fn test_layer_generated_id_matches_handler_id() {
        let app = Router::new()
            .route("/", get(echo_id))
            .layer(RequestTrackingLayer);

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        let header = response.headers()["x-request-id"]
            .to_str()
            .unwrap()
            .to_string();
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(header.as_bytes(), &body[..]);
        assert_eq!(header.len(), 36);
    }
}
