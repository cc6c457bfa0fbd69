//! Close coordination for a served app.

use std::sync::Arc;

use tokio::sync::watch;

/// One-shot close trigger shared between a `ServerHandle` and its serve task.
///
/// Built on a watch channel so a listener subscribed after `trigger` still
/// observes it. Dropping every `CloseSignal` also releases waiting listeners.
#[derive(Debug, Clone)]
pub struct CloseSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl CloseSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> CloseListener {
        CloseListener {
            rx: self.tx.subscribe(),
        }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for CloseSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of a `CloseSignal`.
#[derive(Debug)]
pub struct CloseListener {
    rx: watch::Receiver<bool>,
}

impl CloseListener {
    /// Resolve once the signal fires or every sender is gone.
    pub async fn wait(mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}
