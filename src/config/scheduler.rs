//! Periodic configuration refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, MissedTickBehavior};

use crate::config::fetcher::ConfigFetcher;
use crate::config::schema::UpdateSource;
use crate::config::store::ConfigStore;
use crate::observability::metrics;

/// Drives [`ConfigFetcher::fetch_once`] on a fixed period and merges
/// successful results into the store tagged `scheduled-fetch`.
///
/// A failed fetch never stops the schedule: it is logged and the previous
/// snapshot stays authoritative until the next tick. Overlap policy is
/// skip-if-busy: the fetch is awaited inside the loop body so two fetches
/// can never run concurrently, and ticks that would have fired during a
/// slow fetch are skipped rather than bursted afterwards.
pub struct RefreshScheduler {
    fetcher: ConfigFetcher,
    store: Arc<ConfigStore>,
    period: Duration,
}

impl RefreshScheduler {
    pub fn new(fetcher: ConfigFetcher, store: Arc<ConfigStore>, period: Duration) -> Self {
        Self {
            fetcher,
            store,
            period,
        }
    }

    /// Run until the shutdown broadcast fires. The first tick fires
    /// immediately, so the initial fetch happens at startup with the
    /// bootstrap defaults already in place as fallback.
    ///
    /// Shutdown mid-fetch abandons the in-flight request before its result
    /// can reach the store.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            endpoint = %self.fetcher.endpoint(),
            period_secs = self.period.as_secs(),
            "refresh scheduler starting"
        );

        let mut ticker = time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tokio::select! {
                        _ = self.refresh_once() => {}
                        _ = shutdown.recv() => {
                            tracing::info!("refresh scheduler shutting down, abandoning in-flight fetch");
                            break;
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("refresh scheduler shutting down");
                    break;
                }
            }
        }
    }

    /// One fetch-and-merge cycle. Failures are logged and swallowed; the
    /// store is only touched on success.
    pub async fn refresh_once(&self) {
        match self.fetcher.fetch_once().await {
            Ok(update) => {
                metrics::record_refresh("success");
                self.store.merge(&update, UpdateSource::ScheduledFetch);
            }
            Err(e) => {
                metrics::record_refresh("failure");
                tracing::warn!(
                    error = %e,
                    "config refresh failed, keeping last-known-good snapshot"
                );
            }
        }
    }
}
