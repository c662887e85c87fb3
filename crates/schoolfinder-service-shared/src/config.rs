//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `PORT`: HTTP listen port (default: `5000`)
//! - `BIND_ADDRESS`: listen address (default: `0.0.0.0`)
//! - `SCHOOLFINDER_DATABASE_PATH`: SQLite file, or `:memory:` (default: `schools.db`)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_PATH: &str = "schools.db";

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub bind_address: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl ServiceConfig {
    /// Create configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    ///
    /// Unset or empty variables fall back to defaults; set but unparseable
    /// values are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("PORT") {
            config.port = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = get("BIND_ADDRESS") {
            config.bind_address = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDRESS",
                value: raw.clone(),
            })?;
        }

        if let Some(path) = get("SCHOOLFINDER_DATABASE_PATH") {
            config.database_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Address the HTTP listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed.
    Invalid { key: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
