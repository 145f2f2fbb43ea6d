//! Configuration data model.
//!
//! This module defines the snapshot type held by the store, the partial
//! update applied over it, and the translation from provider key spellings
//! to internal keys. The key set is closed: anything the provider or a push
//! request sends outside it is logged and dropped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An immutable, fully-populated configuration value set.
///
/// Readers always see a complete snapshot; updates produce a new snapshot
/// rather than mutating this one in place.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfigSnapshot {
    /// Secret used to sign JWTs issued by this service.
    pub jwt_secret: String,

    /// Port the HTTP listener binds to (kept as a string, provider values
    /// are strings).
    pub server_port: String,

    /// Base URL of the Zipkin collector traces are exported to.
    pub zipkin_base_url: String,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            jwt_secret: "myfancysecret".to_string(),
            server_port: "8083".to_string(),
            zipkin_base_url: "http://127.0.0.1:9411/".to_string(),
        }
    }
}

impl ConfigSnapshot {
    /// Derive a new snapshot by overlaying the keys present in `update`.
    /// Keys absent from the update keep their current values.
    pub fn with_update(&self, update: &ConfigUpdate) -> Self {
        Self {
            jwt_secret: update
                .jwt_secret
                .clone()
                .unwrap_or_else(|| self.jwt_secret.clone()),
            server_port: update
                .server_port
                .clone()
                .unwrap_or_else(|| self.server_port.clone()),
            zipkin_base_url: update
                .zipkin_base_url
                .clone()
                .unwrap_or_else(|| self.zipkin_base_url.clone()),
        }
    }
}

/// A partial configuration update: only the keys that are `Some` are
/// overlaid onto the current snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub jwt_secret: Option<String>,
    pub server_port: Option<String>,
    pub zipkin_base_url: Option<String>,
}

impl ConfigUpdate {
    /// True when the update carries no recognized keys at all.
    pub fn is_empty(&self) -> bool {
        self.jwt_secret.is_none() && self.server_port.is_none() && self.zipkin_base_url.is_none()
    }

    /// Internal names of the keys this update sets, for logging.
    pub fn changed_keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.jwt_secret.is_some() {
            keys.push("jwt_secret");
        }
        if self.server_port.is_some() {
            keys.push("server_port");
        }
        if self.zipkin_base_url.is_some() {
            keys.push("zipkin_base_url");
        }
        keys
    }

    /// Translate a provider-keyed map (`JWT_SECRET`, `SERVER_PORT` /
    /// `USERS_API_PORT`, `ZIPKIN_URL`) into an update over internal keys.
    ///
    /// Unrecognized keys and non-scalar values are logged and dropped.
    pub fn from_provider_map(map: &HashMap<String, serde_json::Value>) -> Self {
        let mut update = Self::default();
        for (key, value) in map {
            let Some(value) = coerce_value(key, value) else {
                continue;
            };
            match key.as_str() {
                "JWT_SECRET" => update.jwt_secret = Some(value),
                "SERVER_PORT" | "USERS_API_PORT" => update.server_port = Some(value),
                "ZIPKIN_URL" => update.zipkin_base_url = Some(value),
                _ => {
                    tracing::warn!(key = %key, "ignoring unrecognized configuration key");
                }
            }
        }
        update
    }
}

/// Accept strings as-is and coerce bare numbers/booleans to their string
/// form; reject arrays, objects and null.
fn coerce_value(key: &str, value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(_) | serde_json::Value::Bool(_) => Some(value.to_string()),
        _ => {
            tracing::warn!(key = %key, "ignoring configuration value with non-scalar JSON shape");
            None
        }
    }
}

/// Origin of a configuration update, used for logging and metrics only.
/// Merge semantics are last-writer-wins regardless of source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSource {
    /// Environment-supplied defaults applied once at startup.
    BootstrapDefault,
    /// Periodic fetch from the external config provider.
    ScheduledFetch,
    /// Administrative push via `POST /config/update`.
    PushRequest,
}

impl UpdateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateSource::BootstrapDefault => "bootstrap-default",
            UpdateSource::ScheduledFetch => "scheduled-fetch",
            UpdateSource::PushRequest => "push-request",
        }
    }
}

impl std::fmt::Display for UpdateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
