//! Dev server process lifecycle.
//!
//! # Responsibilities
//! - Launch the configured command (when `spawn` is enabled)
//! - Wait until the dev server accepts connections
//! - Detect a child that dies during startup
//! - Kill the child on shutdown

use std::process::Stdio;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tokio::time::Instant;
use url::{Host, Url};

use crate::config::DevServerConfig;
use crate::error::{BridgeError, BridgeResult};

/// A running (or externally managed) dev server.
#[derive(Debug)]
pub struct DevServer {
    url: Url,
    child: Mutex<Option<Child>>,
}

impl DevServer {
    /// Start the dev server and wait until it is reachable.
    pub async fn start(config: &DevServerConfig) -> BridgeResult<Self> {
        let url = Url::parse(&config.url)
            .map_err(|_| BridgeError::InvalidDevServerUrl(config.url.clone()))?;
        let (host, port) = dial_target(&url)?;

        let mut child = if config.spawn {
            Some(spawn(config)?)
        } else {
            None
        };

        // On error the child is dropped here, which kills it.
        wait_until_ready(&host, port, &url, config, child.as_mut()).await?;

        tracing::info!(
            url = %url,
            managed = child.is_some(),
            "Dev server ready"
        );

        Ok(Self {
            url,
            child: Mutex::new(child),
        })
    }

    /// Base URL of the dev server.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether this process owns the dev server.
    pub async fn is_managed(&self) -> bool {
        self.child.lock().await.is_some()
    }

    /// Kill the child process, if this bridge spawned one.
    pub async fn shutdown(&self) {
        let Some(mut child) = self.child.lock().await.take() else {
            return;
        };
        match child.kill().await {
            Ok(()) => tracing::info!(url = %self.url, "Dev server stopped"),
            Err(e) => tracing::warn!(url = %self.url, error = %e, "Failed to stop dev server"),
        }
    }
}

fn spawn(config: &DevServerConfig) -> BridgeResult<Child> {
    let mut command = Command::new(&config.command);
    command
        .args(&config.args)
        .stdin(Stdio::null())
        .kill_on_drop(true);
    if let Some(dir) = &config.working_dir {
        command.current_dir(dir);
    }

    let child = command.spawn().map_err(|source| BridgeError::Spawn {
        command: config.command.clone(),
        source,
    })?;

    tracing::info!(
        command = %config.command,
        args = ?config.args,
        pid = ?child.id(),
        "Spawned dev server"
    );
    Ok(child)
}

fn dial_target(url: &Url) -> BridgeResult<(String, u16)> {
    let host = match url.host() {
        Some(Host::Domain(domain)) => domain.to_string(),
        Some(Host::Ipv4(ip)) => ip.to_string(),
        Some(Host::Ipv6(ip)) => ip.to_string(),
        None => return Err(BridgeError::InvalidDevServerUrl(url.to_string())),
    };
    let port = url
        .port_or_known_default()
        .ok_or_else(|| BridgeError::InvalidDevServerUrl(url.to_string()))?;
    Ok((host, port))
}

async fn wait_until_ready(
    host: &str,
    port: u16,
    url: &Url,
    config: &DevServerConfig,
    mut child: Option<&mut Child>,
) -> BridgeResult<()> {
    let poll = Duration::from_millis(config.poll_interval_ms);
    let deadline = Instant::now() + Duration::from_secs(config.startup_timeout_secs);

    loop {
        if let Some(child) = child.as_deref_mut() {
            if let Some(status) = child.try_wait()? {
                return Err(BridgeError::DevServerExited {
                    status: status.to_string(),
                });
            }
        }

        if let Ok(Ok(_)) = tokio::time::timeout(poll, TcpStream::connect((host, port))).await {
            return Ok(());
        }

        if Instant::now() >= deadline {
            return Err(BridgeError::DevServerTimeout {
                url: url.to_string(),
                secs: config.startup_timeout_secs,
            });
        }

        tracing::trace!(host = %host, port, "Dev server not reachable yet");
        tokio::time::sleep(poll).await;
    }
}
