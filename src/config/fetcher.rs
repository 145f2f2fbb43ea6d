//! Single round-trip fetch from the external config provider.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::schema::ConfigUpdate;

/// Errors from one provider round trip, normalized at the component
/// boundary. None of these are fatal; callers log and keep the last
/// known-good snapshot.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout.
    #[error("config provider request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// Provider answered with a non-2xx status.
    #[error("config provider returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// Body was not the expected `{"config": {...}}` JSON shape.
    #[error("malformed config provider response: {0}")]
    Parse(#[source] reqwest::Error),
}

/// Response shape of `GET <provider>/config/<service>`.
#[derive(Debug, Deserialize)]
struct ProviderResponse {
    #[serde(default)]
    config: HashMap<String, serde_json::Value>,
}

/// Client for this service's configuration namespace on the provider.
pub struct ConfigFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl ConfigFetcher {
    /// Build a fetcher for `<base_url>/config/<service_name>` with a
    /// bounded per-request timeout.
    pub fn new(
        base_url: &str,
        service_name: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let endpoint = format!("{}/config/{}", base_url.trim_end_matches('/'), service_name);
        Ok(Self { client, endpoint })
    }

    /// The provider URL this fetcher polls.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Issue one request and return the recognized keys found under
    /// `config`. Keys absent from the response are left out of the update
    /// so the caller's merge retains their prior values.
    pub async fn fetch_once(&self) -> Result<ConfigUpdate, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body: ProviderResponse = response.json().await.map_err(FetchError::Parse)?;
        tracing::debug!(
            endpoint = %self.endpoint,
            keys = body.config.len(),
            "fetched configuration from provider"
        );
        Ok(ConfigUpdate::from_provider_map(&body.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_formatting() {
        let fetcher =
            ConfigFetcher::new("http://provider:8888/", "users-api", Duration::from_secs(5))
                .expect("client build");
        assert_eq!(fetcher.endpoint(), "http://provider:8888/config/users-api");

        let fetcher =
            ConfigFetcher::new("http://provider:8888", "users-api", Duration::from_secs(5))
                .expect("client build");
        assert_eq!(fetcher.endpoint(), "http://provider:8888/config/users-api");
    }

    #[test]
    fn test_provider_response_shape() {
        let body: ProviderResponse =
            serde_json::from_str(r#"{"config": {"JWT_SECRET": "s"}, "last_updated": {}}"#)
                .expect("parse");
        let update = ConfigUpdate::from_provider_map(&body.config);
        assert_eq!(update.jwt_secret.as_deref(), Some("s"));

        // A body without a config object is treated as carrying no keys.
        let body: ProviderResponse = serde_json::from_str("{}").expect("parse");
        assert!(ConfigUpdate::from_provider_map(&body.config).is_empty());
    }
}
