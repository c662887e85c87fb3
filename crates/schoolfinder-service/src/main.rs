//! SchoolFinder HTTP service entry point.
//!
//! # Configuration
//!
//! Variables may also come from a `.env` file in the working directory; values
//! already present in the environment take precedence.
//!
//! - `PORT` - HTTP port (default: 5000)
//! - `BIND_ADDRESS` - listen address (default: 0.0.0.0)
//! - `SCHOOLFINDER_DATABASE_PATH` - SQLite database file, or `:memory:` (default: schools.db)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus endpoint toggle and path

use anyhow::Context;
use tracing::{info, warn};

use schoolfinder_service::{app, install_metrics, load_env_file};
use schoolfinder_service_shared::{
    init_logging, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
};

const ENV_FILE: &str = ".env";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file = load_env_file(ENV_FILE);

    let logging_config = LoggingConfig::from_env().with_default_service("schoolfinder");
    init_logging(&logging_config);

    match env_file {
        Ok(true) => info!(file = ENV_FILE, "environment file loaded"),
        Ok(false) => {}
        Err(e) => warn!(error = %e, file = ENV_FILE, "ignoring unreadable environment file"),
    }

    let metrics_config = MetricsConfig::from_env();
    install_metrics(&metrics_config);

    let config = ServiceConfig::from_env().context("invalid service configuration")?;
    info!(
        database = %config.database_path.display(),
        addr = %config.socket_addr(),
        "starting school service"
    );

    let state = AppState::open(&config.database_path).with_context(|| {
        format!(
            "failed to initialize store at {}",
            config.database_path.display()
        )
    })?;

    let router = app(state, &metrics_config);

    let listener = tokio::net::TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.socket_addr()))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("school service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install shutdown handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
