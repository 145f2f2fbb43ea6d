//! Dynamic configuration synchronization subsystem.
//!
//! # Data Flow
//! ```text
//! environment defaults
//!     → bootstrap.rs (seed once, before anything reads)
//!     → ConfigStore (ArcSwap'd immutable snapshot)
//!
//! On each scheduler tick:
//!     scheduler.rs → fetcher.rs (one provider round trip)
//!     → schema.rs (key translation, closed set)
//!     → ConfigStore.merge (partial overlay, atomic install)
//!
//! On POST /config/update (any time, concurrent with the scheduler):
//!     push.rs → schema.rs → ConfigStore.merge
//!
//! All other components read via ConfigStore.get() at the moment of use.
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable; an update installs a new `Arc`, readers see
//!   either the prior or the new snapshot, never an interleaving
//! - Merges are serialized, last-writer-wins per key regardless of source
//! - Fetch failures leave the last-known-good snapshot authoritative

pub mod bootstrap;
pub mod fetcher;
pub mod push;
pub mod scheduler;
pub mod schema;
pub mod store;

pub use bootstrap::BootstrapSettings;
pub use fetcher::{ConfigFetcher, FetchError};
pub use push::PushStatus;
pub use scheduler::RefreshScheduler;
pub use schema::{ConfigSnapshot, ConfigUpdate, UpdateSource};
pub use store::ConfigStore;
