//! Server entry points.
//!
//! # Responsibilities
//! - `listen`: bind a new listener on a port, install the fallback, serve
//! - `bind`: same, on a listener the caller already bound
//! - Invoke the ready callback once the app is installed and accepting
//! - Graceful close through `ServerHandle`
//!
//! Both entry points share `start`; they differ only in who creates the socket.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::BridgeConfig;
use crate::error::BridgeResult;
use crate::http::fallback::{install, AssetBridge};
use crate::lifecycle::CloseSignal;

/// A running server. Dropping the handle also closes the server.
pub struct ServerHandle {
    local_addr: SocketAddr,
    close: CloseSignal,
    finished: CloseSignal,
    task: JoinHandle<std::io::Result<()>>,
    bridge: Arc<AssetBridge>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn bridge(&self) -> &AssetBridge {
        &self.bridge
    }

    /// Resolves once the serve task has stopped, whether through `close` or
    /// because serving failed. Does not borrow the handle.
    pub fn closed(&self) -> impl Future<Output = ()> + Send + 'static {
        self.finished.subscribe().wait()
    }

    /// Stop accepting connections, let in-flight requests finish, then stop
    /// the dev server if this bridge spawned it.
    pub async fn close(self) -> BridgeResult<()> {
        self.close.trigger();
        let joined = self.task.await;
        self.bridge.shutdown().await;

        tracing::info!(address = %self.local_addr, "Server closed");
        joined??;
        Ok(())
    }
}

/// Bind `app` to a new listener on `port` (all interfaces; 0 picks a free port).
pub async fn listen<F>(app: Router, port: u16, config: &BridgeConfig, on_ready: F) -> BridgeResult<ServerHandle>
where
    F: FnOnce(SocketAddr),
{
    let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await?;
    start(app, listener, config, on_ready).await
}

/// Install the fallback on `app` and serve it on a listener the caller owns.
///
/// Other handlers on `app`, such as WebSocket upgrade routes, keep working.
pub async fn bind<F>(app: Router, listener: TcpListener, config: &BridgeConfig, on_ready: F) -> BridgeResult<ServerHandle>
where
    F: FnOnce(SocketAddr),
{
    start(app, listener, config, on_ready).await
}

async fn start<F>(app: Router, listener: TcpListener, config: &BridgeConfig, on_ready: F) -> BridgeResult<ServerHandle>
where
    F: FnOnce(SocketAddr),
{
    let local_addr = listener.local_addr()?;
    let bridge = Arc::new(AssetBridge::from_config(config).await?);
    let router = install(app, Arc::clone(&bridge));

    let close = CloseSignal::new();
    let closed = close.subscribe();
    let finished = CloseSignal::new();
    let done = finished.clone();
    let task = tokio::spawn(async move {
        let served = axum::serve(listener, router)
            .with_graceful_shutdown(closed.wait())
            .await;
        if let Err(e) = &served {
            tracing::error!(address = %local_addr, error = %e, "Server stopped with error");
        }
        done.trigger();
        served
    });

    tracing::info!(
        address = %local_addr,
        mode = %bridge.mode(),
        "Server accepting connections"
    );
    // The listener is already bound, so connections made from the callback queue up.
    on_ready(local_addr);

    Ok(ServerHandle {
        local_addr,
        close,
        finished,
        task,
        bridge,
    })
}
