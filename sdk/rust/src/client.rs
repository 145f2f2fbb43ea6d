use std::collections::HashMap;

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Status body returned by `POST /config/update`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigUpdateStatus {
    pub status: String,
}

/// Thin typed client for the users-api HTTP surface.
pub struct ConfigClient {
    client: Client,
    base_url: String,
}

impl ConfigClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// True when `GET /health` answers 2xx.
    pub async fn health(&self) -> Result<bool, reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// The live configuration view (`GET /config/current`).
    pub async fn current_config(&self) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/config/current", self.base_url))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(format!("service returned error status {}: {}", status, text).into());
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Push configuration values in provider key spelling
    /// (`JWT_SECRET`, `SERVER_PORT`, `ZIPKIN_URL`).
    pub async fn push_config(
        &self,
        values: &HashMap<String, String>,
    ) -> Result<ConfigUpdateStatus, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(format!("{}/config/update", self.base_url))
            .json(&serde_json::json!({ "config": values }))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(format!("service returned error status {}: {}", status, text).into());
        }

        match serde_json::from_str::<ConfigUpdateStatus>(&text) {
            Ok(update_status) => Ok(update_status),
            Err(e) => Err(e.into()),
        }
    }
}
