//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Dev server URL must be a plain `http` URL with a host
//! - Value ranges (timeouts > 0, non-empty paths)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::BridgeConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("dev_server.url `{0}` is not a valid http URL")]
    InvalidDevServerUrl(String),

    #[error("dev_server.command must not be empty when spawn is enabled")]
    EmptyCommand,

    #[error("dev_server.startup_timeout_secs must be greater than zero")]
    ZeroStartupTimeout,

    #[error("dev_server.poll_interval_ms must be greater than zero")]
    ZeroPollInterval,

    #[error("static_files.root must not be empty")]
    EmptyStaticRoot,

    #[error("static_files.index must not be empty")]
    EmptyIndex,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
}

pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let dev = &config.dev_server;

    if !is_http_url(&dev.url) {
        errors.push(ValidationError::InvalidDevServerUrl(dev.url.clone()));
    }
    if dev.spawn && dev.command.trim().is_empty() {
        errors.push(ValidationError::EmptyCommand);
    }
    if dev.startup_timeout_secs == 0 {
        errors.push(ValidationError::ZeroStartupTimeout);
    }
    if dev.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }
    if config.static_files.root.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyStaticRoot);
    }
    if config.static_files.index.trim().is_empty() {
        errors.push(ValidationError::EmptyIndex);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => url.scheme() == "http" && url.host_str().is_some(),
        Err(_) => false,
    }
}
