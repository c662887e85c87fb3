//! Tracing subscriber setup for the school service.
//!
//! Reads `LOG_FORMAT` (`json`, or `text`/`pretty`), `RUST_LOG` (filter
//! directives, default `info`) and `SERVICE_NAME`.
//!
//! ```no_run
//! use schoolfinder_service_shared::logging::{init_logging, LoggingConfig};
//!
//! init_logging(&LoggingConfig::from_env().with_default_service("schoolfinder"));
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Log line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Text,
}

impl LogFormat {
    /// `text` and `pretty` select [`LogFormat::Text`]; anything else is JSON.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directives, e.g. `info` or `schoolfinder_lib=debug,info`.
    pub filter: String,
    /// Stamped on the startup event.
    pub service: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            filter: DEFAULT_FILTER.to_string(),
            service: None,
        }
    }
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            format: value("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            filter: value("RUST_LOG").unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            service: value("SERVICE_NAME"),
        }
    }

    /// Use `service` unless `SERVICE_NAME` already provided one.
    pub fn with_default_service(mut self, service: impl Into<String>) -> Self {
        if self.service.is_none() {
            self.service = Some(service.into());
        }
        self
    }
}

/// Install the global subscriber. Call once, before anything logs.
///
/// Invalid filter directives fall back to `info` and are reported once the
/// subscriber is up.
pub fn init_logging(config: &LoggingConfig) {
    let (filter, bad_filter) = match EnvFilter::try_new(&config.filter) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_FILTER), Some(e)),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .init(),
    }

    if let Some(e) = bad_filter {
        tracing::warn!(filter = %config.filter, error = %e, "invalid RUST_LOG, using info");
    }
    tracing::info!(
        service = config.service.as_deref().unwrap_or("-"),
        format = ?config.format,
        "logging initialized"
    );
}
