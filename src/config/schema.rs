//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Environment variable selecting development or production behavior.
pub const MODE_ENV_VAR: &str = "NODE_ENV";

/// Which asset source answers requests the host app does not claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Proxy to the front-end dev server.
    Development,
    /// Serve files from the build output directory.
    Production,
}

impl Mode {
    /// Read the mode from `NODE_ENV`.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    /// Only `production` selects production; unset or anything else is development.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("production") => Mode::Production,
            _ => Mode::Development,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}

/// Root configuration for the asset bridge.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BridgeConfig {
    /// Explicit mode. When absent, `NODE_ENV` decides.
    pub mode: Option<Mode>,

    /// Development server settings.
    pub dev_server: DevServerConfig,

    /// Build output settings.
    pub static_files: StaticConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl BridgeConfig {
    /// Resolve the effective mode. Reads the environment at most once per call.
    pub fn resolve_mode(&self) -> Mode {
        self.mode.unwrap_or_else(Mode::from_env)
    }
}

/// Front-end development server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Base URL the dev server listens on.
    pub url: String,

    /// Spawn the dev server as a child process. When false the server is
    /// expected to be managed externally.
    pub spawn: bool,

    /// Program to launch.
    pub command: String,

    /// Arguments passed to `command`.
    pub args: Vec<String>,

    /// Working directory for the child process (defaults to the current one).
    pub working_dir: Option<PathBuf>,

    /// How long to wait for the dev server to accept connections.
    pub startup_timeout_secs: u64,

    /// Delay between readiness checks.
    pub poll_interval_ms: u64,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5173".to_string(),
            spawn: true,
            command: "npx".to_string(),
            args: vec![
                "vite".to_string(),
                "--port".to_string(),
                "5173".to_string(),
                "--strictPort".to_string(),
            ],
            working_dir: None,
            startup_timeout_secs: 30,
            poll_interval_ms: 100,
        }
    }
}

/// Build output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Directory produced by the front-end build.
    pub root: PathBuf,

    /// Document served for directories and page routes.
    pub index: String,

    /// Serve `index` for missing extension-less paths (client-side routes).
    pub spa_fallback: bool,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("dist"),
            index: "index.html".to_string(),
            spa_fallback: true,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upper bound for a single fallback request in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
