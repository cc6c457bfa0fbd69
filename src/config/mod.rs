//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or BridgeConfig::default()
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BridgeConfig (validated, immutable)
//!     → mode resolved once (explicit value or NODE_ENV)
//!     → AssetBridge built from it
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is a valid config
//! - Validation separates syntactic (serde) from semantic checks
//! - The mode is plain configuration, read once at setup

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BridgeConfig;
pub use schema::DevServerConfig;
pub use schema::Mode;
pub use schema::StaticConfig;
pub use validation::{validate_config, ValidationError};
