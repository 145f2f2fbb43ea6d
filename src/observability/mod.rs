//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config subsystem produces:
//!     → tracing events (structured, request ID correlated)
//!     → metrics.rs (counters for merges, refreshes, pushes)
//!
//! Consumers:
//!     → stdout log stream (tracing-subscriber, EnvFilter)
//!     → Prometheus scrape of the exporter listener
//! ```
//!
//! # Design Decisions
//! - Metric updates are cheap (atomic increments behind the facade)
//! - The exporter runs on its own listener so scrapes never contend with
//!   service traffic

pub mod metrics;
