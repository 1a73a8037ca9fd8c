//! services/api/src/error.rs
//!
//! Startup failures of the API service. Once the server is running, request
//! handlers answer with status codes and the repositories absorb store errors.

use crate::config::ConfigError;
use study_planner_core::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required environment variable is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The local store file could not be opened or created.
    #[error("Local store error: {0}")]
    Port(#[from] PortError),

    /// The remote database URL could not be parsed into connect options.
    #[error("Remote store error: {0}")]
    Database(#[from] sqlx::Error),

    /// Binding the listener or serving connections failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else, such as an invalid CORS origin.
    #[error("Startup error: {0}")]
    Internal(String),
}
