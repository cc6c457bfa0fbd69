//! Serve a front-end build tool's assets behind an axum application.
//!
//! Requests the host app does not route fall through to the asset layer:
//! proxied to the dev server in development, served from the build output
//! in production. The mode comes from `NODE_ENV` unless set explicitly.
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use vite_axum::BridgeConfig;
//!
//! # async fn run() -> Result<(), vite_axum::BridgeError> {
//! let app = Router::new().route("/api", get(|| async { "Response from API!" }));
//! let server = vite_axum::listen(app, 3000, &BridgeConfig::default(), |addr| {
//!     println!("listening on {addr}");
//! })
//! .await?;
//! server.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod devserver;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{BridgeConfig, Mode};
pub use error::{BridgeError, BridgeResult};
pub use http::{bind, install, listen, AssetBridge, ServerHandle};
