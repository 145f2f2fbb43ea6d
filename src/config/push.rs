//! Administrative push updates.
//!
//! A push carries the same provider-keyed map a fetch would return and is
//! applied with identical partial-merge semantics, tagged `push-request`.
//! All outcomes are reported as a status value; nothing escapes past this
//! boundary.

use std::collections::HashMap;

use crate::config::schema::{ConfigUpdate, UpdateSource};
use crate::config::store::ConfigStore;
use crate::observability::metrics;

/// Outcome of a push update, rendered verbatim into the response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushStatus {
    /// The map was merged (possibly as a no-op if every key was
    /// unrecognized).
    Applied,
    /// The request carried no configuration map, or an empty one.
    NoData,
    /// The request could not be processed at all (e.g. malformed body).
    Failed(String),
}

impl PushStatus {
    /// Wire representation of the status.
    pub fn message(&self) -> String {
        match self {
            PushStatus::Applied => "Configuration updated successfully".to_string(),
            PushStatus::NoData => "No configuration data provided".to_string(),
            PushStatus::Failed(reason) => format!("Failed to update configuration: {reason}"),
        }
    }
}

/// Apply a pushed configuration map to the store.
///
/// A missing or empty map is reported as [`PushStatus::NoData`] and leaves
/// the store untouched. A non-empty map is translated through the closed
/// key set and merged; unrecognized keys are dropped with a warning.
pub fn apply_push(
    store: &ConfigStore,
    config: Option<&HashMap<String, serde_json::Value>>,
) -> PushStatus {
    let map = match config {
        Some(map) if !map.is_empty() => map,
        _ => {
            tracing::warn!("push update carried no configuration data");
            metrics::record_push("no_data");
            return PushStatus::NoData;
        }
    };

    let update = ConfigUpdate::from_provider_map(map);
    store.merge(&update, UpdateSource::PushRequest);
    metrics::record_push("applied");
    PushStatus::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ConfigSnapshot;
    use serde_json::json;
    use std::sync::Arc;

    fn seeded_store() -> ConfigStore {
        ConfigStore::new(ConfigSnapshot {
            jwt_secret: "default".into(),
            server_port: "8083".into(),
            zipkin_base_url: "".into(),
        })
    }

    #[test]
    fn test_missing_map_is_no_data() {
        let store = seeded_store();
        let before = store.get();

        assert_eq!(apply_push(&store, None), PushStatus::NoData);
        assert!(Arc::ptr_eq(&before, &store.get()));
    }

    #[test]
    fn test_empty_map_is_no_data() {
        let store = seeded_store();
        let before = store.get();

        let empty = HashMap::new();
        assert_eq!(apply_push(&store, Some(&empty)), PushStatus::NoData);
        assert!(Arc::ptr_eq(&before, &store.get()));
    }

    #[test]
    fn test_recognized_keys_are_applied() {
        let store = seeded_store();

        let map: HashMap<String, serde_json::Value> =
            [("JWT_SECRET".to_string(), json!("pushed"))].into();
        assert_eq!(apply_push(&store, Some(&map)), PushStatus::Applied);

        let snapshot = store.get();
        assert_eq!(snapshot.jwt_secret, "pushed");
        assert_eq!(snapshot.server_port, "8083");
    }

    #[test]
    fn test_all_unrecognized_keys_apply_as_noop() {
        let store = seeded_store();
        let before = store.get();

        let map: HashMap<String, serde_json::Value> =
            [("REDIS_HOST".to_string(), json!("redis"))].into();
        assert_eq!(apply_push(&store, Some(&map)), PushStatus::Applied);
        assert!(Arc::ptr_eq(&before, &store.get()));
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            PushStatus::Applied.message(),
            "Configuration updated successfully"
        );
        assert_eq!(
            PushStatus::NoData.message(),
            "No configuration data provided"
        );
        assert_eq!(
            PushStatus::Failed("bad body".into()).message(),
            "Failed to update configuration: bad body"
        );
    }
}
