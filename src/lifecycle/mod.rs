//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Close (shutdown.rs):
//!     ServerHandle::close → CloseSignal::trigger
//!     → axum graceful shutdown: stop accept, drain in-flight
//!     → dev server child killed
//!
//! Signals (signals.rs):
//!     SIGINT → binary calls ServerHandle::close
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{CloseListener, CloseSignal};
