//! users-api — user-facing REST microservice with dynamic configuration.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────┐
//!                    │                  USERS-API                      │
//!                    │                                                 │
//!   config provider  │  ┌───────────┐   fetch    ┌─────────────┐      │
//!   ◀────────────────┼──│ scheduler │───────────▶│   fetcher   │      │
//!                    │  └─────┬─────┘            └──────┬──────┘      │
//!                    │        │ merge (scheduled-fetch) │ translate    │
//!                    │        ▼                         ▼              │
//!                    │  ┌─────────────────────────────────────┐       │
//!   POST /config/    │  │            ConfigStore              │       │
//!   update ──────────┼─▶│   ArcSwap<ConfigSnapshot>, merges   │       │
//!   (push-request)   │  │   serialized, reads lock-free       │       │
//!                    │  └─────────────────┬───────────────────┘       │
//!                    │                    │ get()                      │
//!                    │                    ▼                            │
//!                    │   JWT signing · listener port · trace export    │
//!                    │                                                 │
//!                    │  ┌──────────────────────────────────────────┐  │
//!                    │  │          Cross-Cutting Concerns           │  │
//!                    │  │   lifecycle (shutdown)  observability     │  │
//!                    │  └──────────────────────────────────────────┘  │
//!                    └────────────────────────────────────────────────┘
//! ```
//!
//! The configuration subsystem is the core: a locally-cached, consistently
//! readable snapshot updated concurrently by a background polling timer
//! and an administrative push endpoint, read by request handlers without
//! blocking or observing partial updates.

// Core subsystem
pub mod config;

// HTTP surface
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::{ConfigSnapshot, ConfigStore};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
