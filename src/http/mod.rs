//! HTTP surface of the service.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: timeout, request ID, trace)
//!     → handlers.rs (config push/view, health, version)
//!     → config subsystem (ConfigStore merge / get)
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
