//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (server start/close, dev server readiness,
//!       per-request fallback decisions, proxy failures)
//!     → TraceLayer spans around every fallback request
//!
//! Consumers:
//!     → logging.rs (fmt subscriber with env filter)
//! ```

pub mod logging;

pub use logging::init_logging;
