//! services/api/src/config.rs
//!
//! Defines the service's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Connection settings for the remote store. Present only when both the
/// URL and the key are set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteSettings {
    pub url: String,
    pub key: String,
}

impl RemoteSettings {
    /// Returns `None` unless both parts are non-blank.
    pub fn from_parts(url: Option<String>, key: Option<String>) -> Option<Self> {
        let url = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())?;
        let key = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())?;
        Some(Self { url, key })
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub local_store_path: PathBuf,
    pub remote: Option<RemoteSettings>,
    pub remote_read_timeout: Duration,
    pub openai_api_key: Option<String>,
    pub analysis_model: String,
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to keep tests hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin =
            var("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        // --- Storage Settings ---
        let local_store_path = var("LOCAL_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/local_store.json"));

        let remote = RemoteSettings::from_parts(
            var("REMOTE_DATABASE_URL"),
            var("REMOTE_DATABASE_KEY"),
        );

        let remote_read_timeout = match var("REMOTE_READ_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| {
                    ConfigError::InvalidValue("REMOTE_READ_TIMEOUT_MS".to_string(), e.to_string())
                })?,
            None => study_planner_core::sync::DEFAULT_READ_TIMEOUT,
        };

        // --- Analysis Settings ---
        let openai_api_key = var("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());
        let analysis_model =
            var("ANALYSIS_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string());

        Ok(Self {
            bind_address,
            log_level,
            local_store_path,
            remote,
            remote_read_timeout,
            openai_api_key,
            analysis_model,
            cors_origin,
        })
    }
}
