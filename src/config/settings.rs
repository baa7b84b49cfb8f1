//! Application settings loaded from environment variables.

use std::env;

use thiserror::Error;

use super::constants::{
    DEFAULT_MONGODB_DATABASE, DEFAULT_MONGODB_URI, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};
use crate::validation::Strictness;

/// Configuration parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}, expected one of: {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    mongodb_uri: String,
    pub database_name: String,
    pub server_host: String,
    pub server_port: u16,
    /// How validation treats payload fields it does not know
    pub unknown_fields: Strictness,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("mongodb_uri", &"[REDACTED]")
            .field("database_name", &self.database_name)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("unknown_fields", &self.unknown_fields)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            database_name: DEFAULT_MONGODB_DATABASE.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            unknown_fields: Strictness::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Values that fail to parse fall back to their defaults with a warning.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let unknown_fields = match env::var("VALIDATION_UNKNOWN_FIELDS") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to default", e);
                Strictness::default()
            }),
            Err(_) => Strictness::default(),
        };

        Self {
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| DEFAULT_MONGODB_URI.to_string()),
            database_name: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| DEFAULT_MONGODB_DATABASE.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            unknown_fields,
        }
    }

    /// Get the MongoDB connection string.
    pub fn mongodb_uri(&self) -> &str {
        &self.mongodb_uri
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
