//! Listen addresses and collaborator locations.
//!
//! - `HOST` (default `0.0.0.0`), `PORT` (default `3000`)
//! - `METRICS_PORT` (default `9090`)
//! - `USER_DIRECTORY_PATH`: JSON file with the login directory (optional)

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::parse_or;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
    pub user_directory_path: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: lookup("HOST")
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            metrics_port: parse_or(&lookup, "METRICS_PORT", 9090)?,
            user_directory_path: lookup("USER_DIRECTORY_PATH")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn metrics_bind_address(&self) -> String {
        format!("{}:{}", self.host, self.metrics_port)
    }
}
