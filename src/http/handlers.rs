//! Request handlers.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config::push::{apply_push, PushStatus};
use crate::http::server::AppState;
use crate::observability::metrics;

/// Body of `POST /config/update`: `{"config": {KEY: VALUE, ...}}`.
#[derive(Debug, Deserialize)]
pub struct ConfigUpdateRequest {
    #[serde(default)]
    pub config: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Serialize)]
pub struct ConfigUpdateResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ServiceVersion {
    pub service: &'static str,
    pub version: &'static str,
}

/// Apply a pushed configuration map.
///
/// Always answers 200 with a status body; a malformed JSON body becomes a
/// `Failed` status rather than an axum 4xx, so the status channel stays
/// available even on bad input.
pub async fn update_config(
    State(state): State<AppState>,
    payload: Result<Json<ConfigUpdateRequest>, JsonRejection>,
) -> Json<ConfigUpdateResponse> {
    let status = match payload {
        Ok(Json(request)) => apply_push(&state.store, request.config.as_ref()),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "rejecting malformed config update body");
            metrics::record_push("failed");
            PushStatus::Failed(rejection.body_text())
        }
    };
    Json(ConfigUpdateResponse {
        status: status.message(),
    })
}

/// Read-only view of the live snapshot. The signing secret is masked, the
/// surface is unauthenticated.
pub async fn current_config(State(state): State<AppState>) -> Json<serde_json::Value> {
    let snapshot = state.store.get();
    Json(serde_json::json!({
        "jwt_secret": mask(&snapshot.jwt_secret),
        "server_port": snapshot.server_port,
        "zipkin_base_url": snapshot.zipkin_base_url,
    }))
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub async fn version() -> Json<ServiceVersion> {
    Json(ServiceVersion {
        service: "users-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() {
        ""
    } else {
        "********"
    }
}
