//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TcpListener (created by listen, or supplied to bind)
//!     → server.rs (axum::serve, graceful close)
//!     → host app routes
//!     → fallback.rs (unmatched requests only)
//!         → proxy.rs (development)
//!         → static_files.rs (production)
//! ```

pub mod fallback;
pub mod proxy;
pub mod server;
pub mod static_files;

pub use fallback::{install, AssetBridge};
pub use server::{bind, listen, ServerHandle};
