//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use vite_axum::{BridgeConfig, Mode};

pub const HTML_SHELL: &str = "<!doctype html><html><head>\
<script type=\"module\" src=\"/@vite/client\"></script></head>\
<body><div id=\"app\"></div><script type=\"module\" src=\"/src/main.ts\"></script></body></html>";

/// How long the mock dev server stalls on paths under `/slow`.
pub const SLOW_RESPONSE: Duration = Duration::from_secs(3);

/// A stand-in for a front-end dev server.
///
/// Page routes get the HTML shell, source modules get JavaScript, and any
/// other file gets a `302 Found` redirect, as a real dev server does for
/// files it does not treat as modules.
pub struct MockDevServer {
    pub addr: SocketAddr,
    stop: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl MockDevServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (stop, stopped) = oneshot::channel::<()>();

        let app = Router::new().fallback(dev_server_handler);
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = stopped.await;
                })
                .await;
        });

        Self { addr, stop, task }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shut the mock down and wait until its port is released.
    pub async fn stop(self) {
        let _ = self.stop.send(());
        let _ = self.task.await;
    }
}

async fn dev_server_handler(uri: Uri) -> Response {
    let path = uri.path();

    if path.starts_with("/slow") {
        tokio::time::sleep(SLOW_RESPONSE).await;
    }
    let last = path.rsplit('/').next().unwrap_or_default();

    if !last.contains('.') {
        return ([(header::CONTENT_TYPE, "text/html")], HTML_SHELL).into_response();
    }
    if path.ends_with(".ts") || path.ends_with(".js") {
        return (
            [(header::CONTENT_TYPE, "application/javascript")],
            "export default 42;",
        )
            .into_response();
    }

    let target = format!("/public{}", path);
    (
        StatusCode::FOUND,
        [(header::LOCATION, target.clone())],
        format!("Found. Redirecting to {}", target),
    )
        .into_response()
}

/// Development config pointed at an externally managed dev server.
pub fn dev_config(url: &str) -> BridgeConfig {
    let mut config = BridgeConfig {
        mode: Some(Mode::Development),
        ..Default::default()
    };
    config.dev_server.url = url.to_string();
    config.dev_server.spawn = false;
    config.dev_server.startup_timeout_secs = 5;
    config
}

/// Production config serving `root`.
pub fn production_config(root: &Path) -> BridgeConfig {
    let mut config = BridgeConfig {
        mode: Some(Mode::Production),
        ..Default::default()
    };
    config.static_files.root = root.to_path_buf();
    config
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// Pick a port that nothing is listening on.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap().port()
}
