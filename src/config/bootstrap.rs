//! One-time startup configuration from the process environment.

use std::net::SocketAddr;
use std::time::Duration;

use crate::config::schema::{ConfigSnapshot, UpdateSource};
use crate::config::store::ConfigStore;

/// Everything read from the environment at process start: provider
/// location, scheduler cadence, metrics settings, and the default values
/// seeding the store before the first fetch.
#[derive(Debug, Clone)]
pub struct BootstrapSettings {
    /// Base URL of the external config provider.
    pub provider_base_url: String,

    /// Namespace this service fetches (`/config/<service_name>`).
    pub service_name: String,

    /// Period between scheduled fetches.
    pub refresh_interval: Duration,

    /// Per-request timeout for provider fetches.
    pub fetch_timeout: Duration,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Bind address of the Prometheus exporter.
    pub metrics_address: String,

    defaults: ConfigSnapshot,
}

impl BootstrapSettings {
    /// Read all settings from the environment, falling back to the
    /// defaults of [`ConfigSnapshot`] for the three config keys.
    pub fn from_env() -> Self {
        let fallback = ConfigSnapshot::default();
        Self {
            provider_base_url: env_or("CONFIG_PROVIDER_URL", "http://127.0.0.1:8888"),
            service_name: env_or("CONFIG_SERVICE_NAME", "users-api"),
            refresh_interval: Duration::from_secs(env_parse_or(
                "CONFIG_REFRESH_INTERVAL_SECS",
                60,
            )),
            fetch_timeout: Duration::from_secs(env_parse_or("CONFIG_FETCH_TIMEOUT_SECS", 10)),
            metrics_enabled: env_parse_or("METRICS_ENABLED", true),
            metrics_address: env_or("METRICS_ADDRESS", "0.0.0.0:9090"),
            defaults: ConfigSnapshot {
                jwt_secret: env_or("JWT_SECRET", &fallback.jwt_secret),
                server_port: env_or("SERVER_PORT", &fallback.server_port),
                zipkin_base_url: env_or("ZIPKIN_URL", &fallback.zipkin_base_url),
            },
        }
    }

    /// Metrics bind address, if metrics are enabled and the address parses.
    pub fn metrics_listener(&self) -> Option<SocketAddr> {
        if !self.metrics_enabled {
            return None;
        }
        match self.metrics_address.parse() {
            Ok(addr) => Some(addr),
            Err(e) => {
                tracing::error!(
                    metrics_address = %self.metrics_address,
                    error = %e,
                    "failed to parse metrics address, exporter disabled"
                );
                None
            }
        }
    }

    /// Seed a store with the environment defaults. Runs before the
    /// scheduler's first tick and before the listener binds.
    pub fn seed_store(&self) -> ConfigStore {
        tracing::info!(
            source = %UpdateSource::BootstrapDefault,
            server_port = %self.defaults.server_port,
            zipkin_base_url = %self.defaults.zipkin_base_url,
            "seeding configuration store with environment defaults"
        );
        ConfigStore::new(self.defaults.clone())
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key = %key, value = %raw, fallback = %default, "unparseable environment value");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back() {
        assert_eq!(env_or("USERS_API_TEST_UNSET_VAR", "fallback"), "fallback");
    }

    #[test]
    fn test_env_parse_or() {
        std::env::set_var("USERS_API_TEST_INTERVAL", "120");
        assert_eq!(env_parse_or("USERS_API_TEST_INTERVAL", 60u64), 120);

        std::env::set_var("USERS_API_TEST_INTERVAL_BAD", "not-a-number");
        assert_eq!(env_parse_or("USERS_API_TEST_INTERVAL_BAD", 60u64), 60);
    }

    #[test]
    fn test_seed_store_uses_defaults() {
        let settings = BootstrapSettings::from_env();
        let store = settings.seed_store();
        let snapshot = store.get();
        assert!(!snapshot.server_port.is_empty());
    }
}
