//! Front-end dev server management.
//!
//! # Data Flow
//! ```text
//! DevServerConfig
//!     → process.rs (spawn child, poll until it accepts TCP)
//!     → DevServer (url + owned child)
//!     → http::proxy forwards unmatched requests to it
//!
//! Shutdown:
//!     ServerHandle::close → DevServer::shutdown → kill child
//!     (kill_on_drop covers every other exit path)
//! ```

pub mod process;

pub use process::DevServer;
