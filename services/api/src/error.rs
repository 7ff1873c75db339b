//! services/api/src/error.rs
//!
//! Startup failures of the Momo server. Request-level failures never reach
//! this type; handlers turn a `PortError` into an HTTP status directly.

use crate::config::ConfigError;
use momo_core::ports::PortError;

/// Why `main` gave up.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An environment variable held a value that could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The text-generation adapter could not be built.
    #[error("Adapter setup failed: {0}")]
    Port(#[from] PortError),

    /// Binding the listener or serving failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Startup values that are only checked when wiring the server, such as the CORS origin.
    #[error("Startup error: {0}")]
    Internal(String),
}
