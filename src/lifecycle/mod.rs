//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Bootstrap store → start scheduler → bind listener → serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → scheduler abandons in-flight fetch,
//!     server drains, process exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger the shutdown broadcast
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
