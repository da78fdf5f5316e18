//! Configuration loading and management
//!
//! The server reads an optional YAML file, then applies environment
//! overrides:
//!
//! | Variable             | Field              |
//! |----------------------|--------------------|
//! | `HOTEL_BOOKING_HOST` | `server.host`      |
//! | `HOTEL_BOOKING_PORT` | `server.port`      |
//! | `MONGODB_URL`        | `storage.uri` (and selects the `mongodb` backend) |
//! | `MONGODB_DB`         | `storage.database` |
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8000
//! storage:
//!   backend: mongodb
//!   uri: mongodb://localhost:27017
//!   database: hotel_booking
//! pagination:
//!   page_size: 10
//! ```

use crate::core::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const HOST_ENV: &str = "HOTEL_BOOKING_HOST";
pub const PORT_ENV: &str = "HOTEL_BOOKING_PORT";
pub const MONGODB_URL_ENV: &str = "MONGODB_URL";
pub const MONGODB_DB_ENV: &str = "MONGODB_DB";

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which document store backs the services
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Mongodb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Connection string, required for `mongodb`
    pub uri: Option<String>,
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            uri: None,
            database: "hotel_booking".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub pagination: PaginationConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional file, then apply the process environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, then validate
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(PORT_ENV, format!("'{}' is not a port", port)))?;
        }
        if let Some(uri) = lookup(MONGODB_URL_ENV) {
            self.storage.uri = Some(uri);
            self.storage.backend = StorageBackend::Mongodb;
        }
        if let Some(database) = lookup(MONGODB_DB_ENV) {
            self.storage.database = database;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::invalid("server.host", "must not be empty"));
        }
        if self.pagination.page_size == 0 {
            return Err(ConfigError::invalid(
                "pagination.page_size",
                "must be at least 1",
            ));
        }
        if self.storage.database.trim().is_empty() {
            return Err(ConfigError::invalid("storage.database", "must not be empty"));
        }
        if self.storage.backend == StorageBackend::Mongodb
            && self.storage.uri.as_deref().is_none_or(|u| u.trim().is_empty())
        {
            return Err(ConfigError::invalid(
                "storage.uri",
                "is required for the mongodb backend",
            ));
        }
        Ok(())
    }
}
