//! The last-resort handler bridging unmatched requests to the asset layer.
//!
//! # Data Flow
//! ```text
//! request → host app routes (first match wins)
//!     → no match → fallback router
//!         development → proxy.rs → dev server → relayed response
//!         production  → static_files.rs → build output / index / 404
//! ```
//!
//! # Design Decisions
//! - Installed with `Router::fallback_service`, so host routes always win
//!   no matter where they appear in the builder chain
//! - Mode is resolved once when the bridge is built
//! - Per-request failures become responses, never errors

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{validate_config, BridgeConfig, ConfigError, Mode};
use crate::devserver::DevServer;
use crate::error::{BridgeError, BridgeResult};
use crate::http::proxy::DevProxy;
use crate::http::static_files::StaticFiles;

enum AssetSource {
    DevServer { process: DevServer, proxy: DevProxy },
    Static(StaticFiles),
}

/// Mode-specific asset source shared by every fallback request.
pub struct AssetBridge {
    mode: Mode,
    assets: AssetSource,
    request_timeout: Duration,
}

impl AssetBridge {
    /// Validate `config`, resolve the mode and prepare the asset source.
    ///
    /// In development this starts (or waits for) the dev server.
    pub async fn from_config(config: &BridgeConfig) -> BridgeResult<Self> {
        validate_config(config).map_err(|errors| BridgeError::Config(ConfigError::Validation(errors)))?;

        let mode = config.resolve_mode();
        let assets = match mode {
            Mode::Development => {
                let process = DevServer::start(&config.dev_server).await?;
                let proxy = DevProxy::new(process.url())?;
                AssetSource::DevServer { process, proxy }
            }
            Mode::Production => AssetSource::Static(StaticFiles::new(&config.static_files)),
        };

        tracing::info!(mode = %mode, "Asset bridge ready");

        Ok(Self {
            mode,
            assets,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The dev server in use, if running in development.
    pub fn dev_server(&self) -> Option<&DevServer> {
        match &self.assets {
            AssetSource::DevServer { process, .. } => Some(process),
            AssetSource::Static(_) => None,
        }
    }

    /// Answer a request no host route claimed.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        tracing::debug!(
            mode = %self.mode,
            method = %request.method(),
            path = %request.uri().path(),
            "Fallback request"
        );

        match &self.assets {
            AssetSource::DevServer { proxy, .. } => proxy.forward(request).await,
            AssetSource::Static(files) => files.serve(request).await,
        }
    }

    /// Release the dev server process, if any.
    pub async fn shutdown(&self) {
        if let Some(process) = self.dev_server() {
            process.shutdown().await;
        }
    }
}

async fn fallback_handler(State(bridge): State<Arc<AssetBridge>>, request: Request<Body>) -> Response {
    bridge.handle(request).await
}

/// Append the asset fallback to `app`.
///
/// Register every host route on `app` before calling this: axum routers are
/// values, so routes added to the original builder afterwards are not seen.
/// Any fallback already set on `app` is replaced.
#[allow(deprecated)]
pub fn install(app: Router, bridge: Arc<AssetBridge>) -> Router {
    let timeout = bridge.request_timeout;
    let fallback = Router::new()
        .fallback(fallback_handler)
        .with_state(bridge)
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http());

    app.fallback_service(fallback)
}
