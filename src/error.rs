//! Error definitions for setup and lifecycle operations.
//!
//! Failures while answering a single request never show up here; they are
//! turned into HTTP responses by the fallback router.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while installing or running the asset bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Socket or process I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration was rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The dev server process could not be launched.
    #[error("Failed to spawn dev server `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The dev server never started accepting connections.
    #[error("Dev server at {url} not reachable after {secs} seconds")]
    DevServerTimeout { url: String, secs: u64 },

    /// The spawned dev server exited during startup.
    #[error("Dev server exited before becoming ready ({status})")]
    DevServerExited { status: String },

    /// The dev server URL cannot be proxied to.
    #[error("Invalid dev server URL: {0}")]
    InvalidDevServerUrl(String),

    /// The serving task panicked or was cancelled.
    #[error("Server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
