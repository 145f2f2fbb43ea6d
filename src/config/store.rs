//! Process-wide configuration snapshot holder.

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;

use crate::config::schema::{ConfigSnapshot, ConfigUpdate, UpdateSource};
use crate::observability::metrics;

/// Holder of the current [`ConfigSnapshot`].
///
/// Reads are lock-free and always return a complete snapshot. Merges are
/// serialized by an internal mutex so concurrent writers produce one total
/// order of installs; within that order each key is last-writer-wins. The
/// mutex is held only across in-memory snapshot construction, never across
/// I/O.
///
/// One instance is created at bootstrap and shared as `Arc<ConfigStore>`;
/// there is no process-wide static.
pub struct ConfigStore {
    current: ArcSwap<ConfigSnapshot>,
    write_lock: Mutex<()>,
}

impl ConfigStore {
    /// Create a store holding `initial` as the current snapshot.
    pub fn new(initial: ConfigSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            write_lock: Mutex::new(()),
        }
    }

    /// The current snapshot. Never blocks on writers beyond the time to
    /// swap a reference.
    pub fn get(&self) -> Arc<ConfigSnapshot> {
        self.current.load_full()
    }

    /// Overlay the keys present in `update` onto the current snapshot and
    /// install the result atomically. Returns the snapshot now current.
    ///
    /// An empty update leaves the installed snapshot untouched (readers
    /// keep the exact same `Arc`). This operation never fails.
    pub fn merge(&self, update: &ConfigUpdate, source: UpdateSource) -> Arc<ConfigSnapshot> {
        if update.is_empty() {
            tracing::debug!(source = %source, "update carried no recognized keys, snapshot unchanged");
            return self.current.load_full();
        }

        let guard = self.write_lock.lock();
        // A poisoned lock only means another merge panicked mid-construction;
        // the installed snapshot is still consistent.
        let _guard = guard.unwrap_or_else(|poisoned| poisoned.into_inner());

        let next = Arc::new(self.current.load().with_update(update));
        self.current.store(next.clone());

        metrics::record_merge(source.as_str());
        tracing::info!(
            source = %source,
            keys = ?update.changed_keys(),
            "configuration snapshot updated"
        );
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> ConfigStore {
        ConfigStore::new(ConfigSnapshot {
            jwt_secret: "default".into(),
            server_port: "8083".into(),
            zipkin_base_url: "".into(),
        })
    }

    #[test]
    fn test_last_write_wins_per_key() {
        let store = seeded_store();

        store.merge(
            &ConfigUpdate {
                jwt_secret: Some("first".into()),
                ..Default::default()
            },
            UpdateSource::ScheduledFetch,
        );
        store.merge(
            &ConfigUpdate {
                jwt_secret: Some("second".into()),
                server_port: Some("9000".into()),
                ..Default::default()
            },
            UpdateSource::PushRequest,
        );

        let snapshot = store.get();
        assert_eq!(snapshot.jwt_secret, "second");
        assert_eq!(snapshot.server_port, "9000");
        assert_eq!(snapshot.zipkin_base_url, "");
    }

    #[test]
    fn test_empty_update_is_a_noop() {
        let store = seeded_store();
        let before = store.get();

        let after = store.merge(&ConfigUpdate::default(), UpdateSource::PushRequest);

        assert!(Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&before, &store.get()));
    }

    #[test]
    fn test_partial_update_keeps_other_keys() {
        let store = seeded_store();

        store.merge(
            &ConfigUpdate {
                jwt_secret: Some("newsecret".into()),
                ..Default::default()
            },
            UpdateSource::ScheduledFetch,
        );

        let snapshot = store.get();
        assert_eq!(snapshot.jwt_secret, "newsecret");
        assert_eq!(snapshot.server_port, "8083");
        assert_eq!(snapshot.zipkin_base_url, "");
    }

    #[test]
    fn test_concurrent_merges_lose_no_update() {
        let store = std::sync::Arc::new(seeded_store());

        let writers: Vec<_> = [
            ConfigUpdate {
                server_port: Some("9000".into()),
                ..Default::default()
            },
            ConfigUpdate {
                jwt_secret: Some("x".into()),
                ..Default::default()
            },
        ]
        .into_iter()
        .map(|update| {
            let store = store.clone();
            std::thread::spawn(move || {
                store.merge(&update, UpdateSource::PushRequest);
            })
        })
        .collect();

        for writer in writers {
            writer.join().expect("merge thread panicked");
        }

        let snapshot = store.get();
        assert_eq!(snapshot.server_port, "9000");
        assert_eq!(snapshot.jwt_secret, "x");
    }

    #[test]
    fn test_readers_see_prior_or_new_snapshot_never_a_mix() {
        let store = std::sync::Arc::new(seeded_store());
        let stop = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));

        // Writers flip both keys together; a reader must never observe one
        // flipped without the other within a single snapshot generation.
        let writer = {
            let store = store.clone();
            let stop = stop.clone();
            std::thread::spawn(move || {
                let mut n = 0u32;
                while !stop.load(std::sync::atomic::Ordering::Relaxed) {
                    let update = ConfigUpdate {
                        jwt_secret: Some(format!("gen-{n}")),
                        zipkin_base_url: Some(format!("gen-{n}")),
                        ..Default::default()
                    };
                    store.merge(&update, UpdateSource::ScheduledFetch);
                    n += 1;
                }
            })
        };

        for _ in 0..10_000 {
            let snapshot = store.get();
            if snapshot.jwt_secret != "default" {
                assert_eq!(snapshot.jwt_secret, snapshot.zipkin_base_url);
            }
        }

        stop.store(true, std::sync::atomic::Ordering::Relaxed);
        writer.join().expect("writer thread panicked");
    }
}
